// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading structure probe - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! A document that uses heading elements must have a single top-level
//! `<h1>` anchoring the hierarchy. A document without any headings is left
//! alone; other structure checks do not belong to this probe.

use crate::finding::{Finding, Impact};
use crate::probes::{css_path, opening_tag, Probe};
use scraper::{Html, Selector};

/// Probe for heading hierarchy
pub struct HeadingProbe;

impl Probe for HeadingProbe {
    fn name(&self) -> &str {
        "headings"
    }

    fn rule_ids(&self) -> &[&str] {
        &["1.3.1"]
    }

    fn evaluate(&self, document: &Html) -> Vec<Finding> {
        let heading_selector =
            Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
        let h1_selector = Selector::parse("h1").expect("valid selector");

        let headings: Vec<_> = document.select(&heading_selector).collect();
        if headings.is_empty() {
            return Vec::new();
        }

        if document.select(&h1_selector).next().is_some() {
            return vec![
                Finding::pass("1.3.1", "Document has a proper heading structure")
                    .with_tags(&["wcag2a", "heading"]),
            ];
        }

        let mut finding = Finding::violation(
            "1.3.1",
            Impact::Moderate,
            "Document has headings but no top-level heading (h1)",
        )
        .with_tags(&["wcag2a", "heading"]);
        for heading in headings {
            finding = finding.with_node(&css_path(heading), &opening_tag(heading));
        }
        vec![finding]
    }
}
