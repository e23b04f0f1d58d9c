// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form label probe - WCAG 3.3.2 Labels or Instructions (Level A)
//!
//! Every `input`, `select`, and `textarea` needs an accessible name: an
//! id-bound `<label for>`, a wrapping `<label>`, `aria-label`,
//! `aria-labelledby`, or `title`. Hidden and button-like inputs are exempt;
//! their name comes from the value or content.

use crate::finding::{Finding, Impact};
use crate::probes::{css_path, opening_tag, Probe};
use scraper::{ElementRef, Html, Selector};

/// Input types that do not need a label
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

/// Probe for form control labeling
pub struct FormLabelProbe;

impl Probe for FormLabelProbe {
    fn name(&self) -> &str {
        "form-labels"
    }

    fn rule_ids(&self) -> &[&str] {
        &["3.3.2"]
    }

    fn evaluate(&self, document: &Html) -> Vec<Finding> {
        let control_selector =
            Selector::parse("input, select, textarea").expect("valid selector");
        let label_selector = Selector::parse("label").expect("valid selector");

        let label_fors: Vec<String> = document
            .select(&label_selector)
            .filter_map(|l| l.value().attr("for").map(String::from))
            .collect();

        let mut total = 0;
        let mut offenders = Vec::new();

        for control in document.select(&control_selector) {
            if control.value().name() == "input" {
                let input_type = control.value().attr("type").unwrap_or("text");
                if EXEMPT_INPUT_TYPES.contains(&input_type) {
                    continue;
                }
            }

            total += 1;
            if !has_accessible_name(control, &label_fors) {
                offenders.push((css_path(control), opening_tag(control)));
            }
        }

        if total == 0 {
            return Vec::new();
        }

        if offenders.is_empty() {
            return vec![
                Finding::pass("3.3.2", "All form fields have associated labels")
                    .with_tags(&["wcag2a", "form", "label"]),
            ];
        }

        let mut finding = Finding::violation(
            "3.3.2",
            Impact::Serious,
            "Form fields without associated labels",
        )
        .with_tags(&["wcag2a", "form", "label"]);
        for (selector, snippet) in offenders {
            finding = finding.with_node(&selector, &snippet);
        }
        vec![finding]
    }
}

/// Whether a control carries any accessible-name mechanism
fn has_accessible_name(control: ElementRef<'_>, label_fors: &[String]) -> bool {
    let value = control.value();

    if value.attr("aria-label").is_some()
        || value.attr("aria-labelledby").is_some()
        || value.attr("title").is_some()
    {
        return true;
    }

    if let Some(id) = value.attr("id") {
        if label_fors.iter().any(|f| f == id) {
            return true;
        }
    }

    // Wrapping <label> counts as an implicit association
    let mut current = control.parent().and_then(ElementRef::wrap);
    while let Some(ancestor) = current {
        if ancestor.value().name() == "label" {
            return true;
        }
        current = ancestor.parent().and_then(ElementRef::wrap);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;

    fn evaluate(html: &str) -> Vec<Finding> {
        FormLabelProbe.evaluate(&Html::parse_document(html))
    }

    #[test]
    fn test_no_controls_emits_nothing() {
        let findings = evaluate("<html><body><p>no forms here</p></body></html>");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unlabeled_input_is_serious_violation() {
        let findings = evaluate("<html><body><input type=\"text\"></body></html>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Violation);
        assert_eq!(findings[0].impact, Some(Impact::Serious));
        assert_eq!(findings[0].rule_id, "3.3.2");
    }

    #[test]
    fn test_label_for_association_passes() {
        let findings = evaluate(
            r#"<html><body>
                <label for="name">Name</label>
                <input type="text" id="name">
            </body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Pass);
    }

    #[test]
    fn test_wrapping_label_passes() {
        let findings = evaluate(
            r#"<html><body><label>Name <input type="text"></label></body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Pass);
    }

    #[test]
    fn test_aria_label_passes() {
        let findings = evaluate(
            r#"<html><body><select aria-label="Country"><option>BR</option></select></body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Pass);
    }

    #[test]
    fn test_exempt_types_are_skipped() {
        let findings = evaluate(
            r#"<html><body>
                <input type="hidden" name="token">
                <input type="submit" value="Send">
            </body></html>"#,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_mixed_controls_list_only_offenders() {
        let findings = evaluate(
            r#"<html><body>
                <label for="a">A</label><input id="a">
                <textarea></textarea>
                <select><option>x</option></select>
            </body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Violation);
        assert_eq!(findings[0].nodes.len(), 2);
    }
}
