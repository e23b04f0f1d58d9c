// SPDX-License-Identifier: PMPL-1.0-or-later
//! DOM probes implementing the WCAG checks.
//!
//! Each probe is an independent, pure evaluation of one rule against a
//! parsed document. Probes never mutate the document, never panic on
//! malformed markup, and classify every finding they emit as violation,
//! pass, incomplete, or inapplicable. A probe that cannot evaluate its rule
//! emits an incomplete finding rather than aborting the audit.

pub mod alt_text;
pub mod contrast;
pub mod forms;
pub mod headings;

use crate::finding::Finding;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Trait implemented by all probes
pub trait Probe: Send + Sync {
    /// Human-readable name of this probe
    fn name(&self) -> &str;

    /// WCAG rule ids this probe reports under
    fn rule_ids(&self) -> &[&str];

    /// Evaluate the document and return classified findings
    fn evaluate(&self, document: &Html) -> Vec<Finding>;
}

/// The fixed probe registration list
pub fn default_probes() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(alt_text::AltTextProbe),
        Box::new(contrast::ContrastProbe),
        Box::new(headings::HeadingProbe),
        Box::new(forms::FormLabelProbe),
    ]
}

/// Run a probe set over a document and collect the flat finding list
pub fn run(probes: &[Box<dyn Probe>], document: &Html) -> Vec<Finding> {
    let mut findings = Vec::new();
    for probe in probes {
        let emitted = probe.evaluate(document);
        debug!(probe = probe.name(), count = emitted.len(), "probe finished");
        findings.extend(emitted);
    }
    findings
}

/// Build a CSS-ish ancestor path for an element, e.g.
/// `html > body > img:nth-of-type(2)`
pub(crate) fn css_path(element: ElementRef<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(element);

    while let Some(el) = current {
        let name = el.value().name();
        let mut nth = 1;
        for sibling in el.prev_siblings() {
            if let Some(sibling_el) = ElementRef::wrap(sibling) {
                if sibling_el.value().name() == name {
                    nth += 1;
                }
            }
        }
        if nth > 1 {
            parts.push(format!("{}:nth-of-type({})", name, nth));
        } else {
            parts.push(name.to_string());
        }
        current = el.parent().and_then(ElementRef::wrap);
    }

    parts.reverse();
    parts.join(" > ")
}

/// Reconstruct the opening tag of an element for display
pub(crate) fn opening_tag(element: ElementRef<'_>) -> String {
    let attrs: String = element
        .value()
        .attrs()
        .map(|(k, v)| format!(" {}=\"{}\"", k, v))
        .collect();
    format!("<{}{}>", element.value().name(), attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;
    use scraper::Selector;

    #[test]
    fn test_css_path_includes_ancestors() {
        let document = Html::parse_document(
            "<html><body><div><img src=\"a.png\"><img src=\"b.png\"></div></body></html>",
        );
        let selector = Selector::parse("img").expect("valid selector");
        let paths: Vec<String> = document.select(&selector).map(css_path).collect();
        assert_eq!(paths[0], "html > body > div > img");
        assert_eq!(paths[1], "html > body > div > img:nth-of-type(2)");
    }

    #[test]
    fn test_opening_tag_reconstruction() {
        let document = Html::parse_document("<html><body><img src=\"a.png\"></body></html>");
        let selector = Selector::parse("img").expect("valid selector");
        let img = document.select(&selector).next().unwrap();
        assert_eq!(opening_tag(img), "<img src=\"a.png\">");
    }

    #[test]
    fn test_run_collects_all_probe_output() {
        let probes = default_probes();
        let document = Html::parse_document(
            "<html><body><h1>Title</h1><img src=\"a.png\" alt=\"logo\"></body></html>",
        );
        let findings = run(&probes, &document);
        // alt-text pass, heading pass, contrast inapplicable
        assert_eq!(findings.len(), 3);
        assert_eq!(
            findings.iter().filter(|f| f.kind == FindingKind::Pass).count(),
            2
        );
    }

    #[test]
    fn test_probes_are_deterministic() {
        let probes = default_probes();
        let html = r#"
            <html><body>
                <h3>Sub</h3>
                <img src="a.png">
                <input type="text">
                <p style="color: #777; background-color: #888;">dim</p>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let first = run(&probes, &document);
        let second = run(&probes, &document);
        assert_eq!(first, second);
    }
}
