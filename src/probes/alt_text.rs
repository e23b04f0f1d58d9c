// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text probe - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Every `<img>` must carry an `alt` attribute. An empty `alt=""` is valid
//! for decorative images; only a missing attribute is a violation.

use crate::finding::{Finding, Impact};
use crate::probes::{css_path, opening_tag, Probe};
use scraper::{Html, Selector};

/// Probe for image alternative text
pub struct AltTextProbe;

impl Probe for AltTextProbe {
    fn name(&self) -> &str {
        "alt-text"
    }

    fn rule_ids(&self) -> &[&str] {
        &["1.1.1"]
    }

    fn evaluate(&self, document: &Html) -> Vec<Finding> {
        let img_selector = Selector::parse("img").expect("valid selector");

        let mut total = 0;
        let mut offenders = Vec::new();

        for img in document.select(&img_selector) {
            total += 1;
            if img.value().attr("alt").is_none() {
                offenders.push((css_path(img), opening_tag(img)));
            }
        }

        if total == 0 {
            return Vec::new();
        }

        if offenders.is_empty() {
            return vec![
                Finding::pass("1.1.1", "All images have alternative text")
                    .with_tags(&["wcag2a", "image"]),
            ];
        }

        let mut finding =
            Finding::violation("1.1.1", Impact::Serious, "Images without alternative text")
                .with_tags(&["wcag2a", "image"]);
        for (selector, snippet) in offenders {
            finding = finding.with_node(&selector, &snippet);
        }
        vec![finding]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;

    fn evaluate(html: &str) -> Vec<Finding> {
        AltTextProbe.evaluate(&Html::parse_document(html))
    }

    #[test]
    fn test_no_images_emits_nothing() {
        let findings = evaluate("<html><body><p>text only</p></body></html>");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_alt_is_serious_violation() {
        let findings = evaluate("<html><body><img src=\"photo.jpg\"></body></html>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Violation);
        assert_eq!(findings[0].impact, Some(Impact::Serious));
        assert_eq!(findings[0].rule_id, "1.1.1");
        assert_eq!(findings[0].nodes.len(), 1);
        assert!(findings[0].nodes[0].selector.ends_with("img"));
    }

    #[test]
    fn test_all_alt_present_is_single_pass() {
        let findings = evaluate(
            r#"<html><body>
                <img src="logo.png" alt="Company logo">
                <img src="divider.png" alt="">
            </body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Pass);
    }

    #[test]
    fn test_one_violation_lists_every_offender() {
        let findings = evaluate(
            r#"<html><body>
                <img src="a.png">
                <img src="b.png" alt="fine">
                <img src="c.png">
            </body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].nodes.len(), 2);
    }
}
