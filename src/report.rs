// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report rendering for audit results.
//!
//! Two output formats:
//! - Text: human-readable summary with score, violations, and recommendations
//! - JSON: the full report structure for programmatic consumption

use crate::audit::AuditReport;
use crate::finding::Finding;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the requested format
pub fn generate_report(report: &AuditReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report),
    }
}

fn generate_text_report(report: &AuditReport) -> String {
    let result = &report.result;
    let mut output = String::new();

    output.push_str("=== Accessibility Audit Report ===\n\n");
    output.push_str(&format!("Source:  {}\n", result.source_ref));
    output.push_str(&format!("Score:   {}/100\n", result.score));
    output.push_str(&format!(
        "Checks:  {} violation(s), {} pass(es), {} incomplete, {} inapplicable\n\n",
        result.violations.len(),
        result.passes.len(),
        result.incomplete.len(),
        result.inapplicable.len()
    ));

    if result.violations.is_empty() {
        output.push_str("No accessibility violations found.\n");
    } else {
        output.push_str(&format!("--- Violations ({}) ---\n", result.violations.len()));
        for violation in &result.violations {
            push_finding(&mut output, violation);
        }
    }

    if !result.incomplete.is_empty() {
        output.push_str(&format!(
            "\n--- Needs manual review ({}) ---\n",
            result.incomplete.len()
        ));
        for finding in &result.incomplete {
            output.push_str(&format!("[{}] {}\n", finding.rule_id, finding.description));
        }
    }

    output.push_str(&format!("\nSeverity: {}\n", report.insights.severity.description));

    output.push_str("\n--- Recommendations ---\n");
    for recommendation in &report.insights.recommendations {
        output.push_str(&format!(
            "[{:?}] {}\n    {}\n",
            recommendation.priority, recommendation.title, recommendation.description
        ));
        for action in &recommendation.actions {
            output.push_str(&format!("    - {}\n", action));
        }
    }

    output
}

fn push_finding(output: &mut String, finding: &Finding) {
    let impact = finding
        .impact
        .map(|i| i.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    output.push_str(&format!(
        "[{}] ({}) {}\n",
        finding.rule_id, impact, finding.description
    ));
    for node in &finding.nodes {
        output.push_str(&format!("    at {}  {}\n", node.selector, node.snippet));
    }
}

fn generate_json_report(report: &AuditReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {}\"}}", e))
}
