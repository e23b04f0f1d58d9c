// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit aggregation and scoring.
//!
//! Partitions the flat finding list produced by the probe set and computes
//! the 0-100 score. The score depends only on the violation impact
//! multiset: order-independent, unaffected by passes, incomplete, or
//! inapplicable findings, and hand-verifiable from the violation list.

use crate::catalog::RuleCatalog;
use crate::finding::{Finding, FindingKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Penalty for a violation that carries no impact classification
const UNKNOWN_IMPACT_PENALTY: i32 = 2;

/// The partitioned outcome of one audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Audited URL, or "local" for string/file sources
    pub source_ref: String,
    /// Accessibility score in [0, 100]
    pub score: u8,
    /// Broken rules
    pub violations: Vec<Finding>,
    /// Rules evaluated and upheld
    pub passes: Vec<Finding>,
    /// Rules the probes could not evaluate
    pub incomplete: Vec<Finding>,
    /// Rules with nothing to apply to
    pub inapplicable: Vec<Finding>,
}

impl AuditResult {
    /// Total number of findings across all partitions
    pub fn total_findings(&self) -> usize {
        self.violations.len()
            + self.passes.len()
            + self.incomplete.len()
            + self.inapplicable.len()
    }
}

/// Partition findings by their probe-assigned kind and compute the score.
///
/// A finding whose rule id is not in the catalog is a programming defect in
/// the emitting probe; it is dropped with a warning so it cannot corrupt
/// the score, and the audit continues.
pub fn aggregate(source_ref: &str, findings: Vec<Finding>, catalog: &RuleCatalog) -> AuditResult {
    let mut violations = Vec::new();
    let mut passes = Vec::new();
    let mut incomplete = Vec::new();
    let mut inapplicable = Vec::new();

    for finding in findings {
        if !catalog.contains(&finding.rule_id) {
            warn!(
                rule_id = %finding.rule_id,
                "finding references unknown rule, dropping"
            );
            continue;
        }

        match finding.kind {
            FindingKind::Violation => violations.push(finding),
            FindingKind::Pass => passes.push(finding),
            FindingKind::Incomplete => incomplete.push(finding),
            FindingKind::Inapplicable => inapplicable.push(finding),
        }
    }

    let score = score_violations(&violations);

    AuditResult {
        source_ref: source_ref.to_string(),
        score,
        violations,
        passes,
        incomplete,
        inapplicable,
    }
}

/// Compute the score from the violation list alone: start at 100, subtract
/// a fixed penalty per violation, clamp to [0, 100].
pub fn score_violations(violations: &[Finding]) -> u8 {
    let penalty: i32 = violations
        .iter()
        .map(|v| match v.impact {
            Some(impact) => impact.score_penalty(),
            None => UNKNOWN_IMPACT_PENALTY,
        })
        .sum();

    (100 - penalty).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Impact;

    fn violation(impact: Impact) -> Finding {
        Finding::violation("1.1.1", impact, "broken").with_tags(&["wcag2a", "image"])
    }

    #[test]
    fn test_one_critical_scores_90() {
        assert_eq!(score_violations(&[violation(Impact::Critical)]), 90);
    }

    #[test]
    fn test_three_serious_score_85() {
        let violations = vec![
            violation(Impact::Serious),
            violation(Impact::Serious),
            violation(Impact::Serious),
        ];
        assert_eq!(score_violations(&violations), 85);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let violations: Vec<Finding> = (0..11).map(|_| violation(Impact::Critical)).collect();
        assert_eq!(score_violations(&violations), 0);
    }

    #[test]
    fn test_unknown_impact_costs_two() {
        let mut finding = violation(Impact::Minor);
        finding.impact = None;
        assert_eq!(score_violations(&[finding]), 98);
    }

    #[test]
    fn test_score_is_order_independent() {
        let mut violations = vec![
            violation(Impact::Critical),
            violation(Impact::Moderate),
            violation(Impact::Minor),
        ];
        let forward = score_violations(&violations);
        violations.reverse();
        assert_eq!(forward, score_violations(&violations));
    }

    #[test]
    fn test_aggregate_partitions_every_finding_once() {
        let catalog = RuleCatalog::default();
        let findings = vec![
            violation(Impact::Serious),
            Finding::pass("1.3.1", "ok").with_tags(&["wcag2a"]),
            Finding::incomplete("1.4.3", "could not evaluate"),
            Finding::inapplicable("3.3.2", "no forms"),
        ];
        let result = aggregate("local", findings, &catalog);

        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.passes.len(), 1);
        assert_eq!(result.incomplete.len(), 1);
        assert_eq!(result.inapplicable.len(), 1);
        assert_eq!(result.total_findings(), 4);
    }

    #[test]
    fn test_non_violations_never_move_the_score() {
        let catalog = RuleCatalog::default();
        let base = aggregate("local", vec![violation(Impact::Serious)], &catalog);
        let padded = aggregate(
            "local",
            vec![
                violation(Impact::Serious),
                Finding::pass("1.3.1", "ok"),
                Finding::inapplicable("3.3.2", "no forms"),
            ],
            &catalog,
        );
        assert_eq!(base.score, padded.score);
        assert_eq!(base.score, 95);
    }

    #[test]
    fn test_unknown_rule_id_is_dropped() {
        let catalog = RuleCatalog::default();
        let findings = vec![
            violation(Impact::Critical),
            Finding::violation("9.9.9", Impact::Critical, "phantom rule"),
        ];
        let result = aggregate("local", findings, &catalog);

        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.score, 90);
    }
}
