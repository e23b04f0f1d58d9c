// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding data model shared by probes, the aggregator, and the insight
//! layer.
//!
//! A finding is one observation about a document: a rule violation, a
//! passed check, an incomplete evaluation, or an inapplicable rule. Probes
//! classify every finding explicitly at emission time; nothing downstream
//! infers the kind.

use serde::{Deserialize, Serialize};

/// Severity of a violation, following the axe-core impact scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Blocks access entirely for affected users
    Critical,
    /// Serious barrier, workarounds are painful
    Serious,
    /// Noticeable barrier with reasonable workarounds
    Moderate,
    /// Inconvenience rather than a barrier
    Minor,
}

impl Impact {
    /// Points subtracted from the 0-100 audit score per violation.
    ///
    /// Intentionally simple so a score can be hand-verified from the
    /// violation list alone.
    pub fn score_penalty(self) -> i32 {
        match self {
            Impact::Critical => 10,
            Impact::Serious => 5,
            Impact::Moderate => 3,
            Impact::Minor => 1,
        }
    }

    /// Weight used by the severity summary in the insight layer
    pub fn severity_weight(self) -> u32 {
        match self {
            Impact::Critical => 10,
            Impact::Serious => 7,
            Impact::Moderate => 4,
            Impact::Minor => 1,
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Critical => write!(f, "critical"),
            Impact::Serious => write!(f, "serious"),
            Impact::Moderate => write!(f, "moderate"),
            Impact::Minor => write!(f, "minor"),
        }
    }
}

/// How a probe classified a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// The rule is broken
    Violation,
    /// The rule was evaluated and holds
    Pass,
    /// The probe could not evaluate the rule for this document
    Incomplete,
    /// The rule has nothing to apply to in this document
    Inapplicable,
}

/// Reference to an element responsible for a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Ancestor path in CSS selector syntax
    pub selector: String,
    /// Reconstructed opening tag of the element
    pub snippet: String,
}

/// One observation produced by evaluating a rule against a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Dotted WCAG rule identifier, e.g. "1.1.1"
    pub rule_id: String,
    /// Probe-assigned classification
    pub kind: FindingKind,
    /// Human-readable description of the observation
    pub description: String,
    /// Violation severity; absent for non-violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    /// Conformance and category tags, e.g. "wcag2a", "image"
    pub tags: Vec<String>,
    /// Elements responsible; empty for document-level findings
    pub nodes: Vec<Node>,
}

impl Finding {
    fn new(rule_id: &str, kind: FindingKind, description: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            kind,
            description: description.to_string(),
            impact: None,
            tags: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Create a violation finding
    pub fn violation(rule_id: &str, impact: Impact, description: &str) -> Self {
        let mut finding = Self::new(rule_id, FindingKind::Violation, description);
        finding.impact = Some(impact);
        finding
    }

    /// Create a pass finding
    pub fn pass(rule_id: &str, description: &str) -> Self {
        Self::new(rule_id, FindingKind::Pass, description)
    }

    /// Create an incomplete finding
    pub fn incomplete(rule_id: &str, description: &str) -> Self {
        Self::new(rule_id, FindingKind::Incomplete, description)
    }

    /// Create an inapplicable finding
    pub fn inapplicable(rule_id: &str, description: &str) -> Self {
        Self::new(rule_id, FindingKind::Inapplicable, description)
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Append an element reference
    pub fn with_node(mut self, selector: &str, snippet: &str) -> Self {
        self.nodes.push(Node {
            selector: selector.to_string(),
            snippet: snippet.to_string(),
        });
        self
    }

    /// Append element references
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Whether this finding carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_builder() {
        let finding = Finding::violation("1.1.1", Impact::Serious, "Images without alt text")
            .with_tags(&["wcag2a", "image"])
            .with_node("html > body > img", "<img src=\"a.png\">");

        assert_eq!(finding.kind, FindingKind::Violation);
        assert_eq!(finding.impact, Some(Impact::Serious));
        assert!(finding.has_tag("image"));
        assert!(!finding.has_tag("form"));
        assert_eq!(finding.nodes.len(), 1);
    }

    #[test]
    fn test_pass_has_no_impact() {
        let finding = Finding::pass("1.3.1", "Document has a top-level heading");
        assert_eq!(finding.kind, FindingKind::Pass);
        assert!(finding.impact.is_none());
    }

    #[test]
    fn test_impact_serialization() {
        let json = serde_json::to_string(&Impact::Serious).unwrap();
        assert_eq!(json, "\"serious\"");
    }

    #[test]
    fn test_impact_omitted_for_non_violations() {
        let finding = Finding::pass("1.1.1", "ok");
        let json = serde_json::to_value(&finding).unwrap();
        assert!(json.get("impact").is_none());
    }

    #[test]
    fn test_score_penalties() {
        assert_eq!(Impact::Critical.score_penalty(), 10);
        assert_eq!(Impact::Serious.score_penalty(), 5);
        assert_eq!(Impact::Moderate.score_penalty(), 3);
        assert_eq!(Impact::Minor.score_penalty(), 1);
    }
}
