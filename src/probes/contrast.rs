// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast probe - WCAG 1.4.3 Contrast Minimum (Level AA)
//!
//! Deterministic heuristic in place of a full rendering pipeline: text and
//! background colors are collected from inline `style` attributes and from
//! declaration blocks inside `<style>` elements, and each pair is checked
//! against the 4.5:1 WCAG AA ratio using the relative-luminance algorithm.
//! Declared colors that cannot be parsed (custom properties, gradients)
//! make the evaluation incomplete; a document that declares no evaluable
//! color pair is inapplicable. The same input always yields the same
//! findings.

use crate::finding::{Finding, Impact, Node};
use crate::probes::{css_path, opening_tag, Probe};
use regex::Regex;
use scraper::{Html, Selector};

/// Minimum contrast ratio for normal text at level AA
const AA_MINIMUM_RATIO: f64 = 4.5;

/// Probe for text/background contrast
pub struct ContrastProbe;

impl Probe for ContrastProbe {
    fn name(&self) -> &str {
        "contrast"
    }

    fn rule_ids(&self) -> &[&str] {
        &["1.4.3"]
    }

    fn evaluate(&self, document: &Html) -> Vec<Finding> {
        let color_re = Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]+)").expect("valid regex");
        let bg_re =
            Regex::new(r"(?i)background(?:-color)?\s*:\s*([^;]+)").expect("valid regex");

        let mut evaluated = 0;
        let mut unparseable = 0;
        let mut offenders: Vec<Node> = Vec::new();

        // Inline style attributes
        let styled_selector = Selector::parse("[style]").expect("valid selector");
        for element in document.select(&styled_selector) {
            let style = element.value().attr("style").unwrap_or("");
            let fg = color_re.captures(style).map(|c| parse_color(c[1].trim()));
            let bg = bg_re.captures(style).map(|c| parse_color(c[1].trim()));

            match (fg, bg) {
                (Some(Some(fg)), Some(Some(bg))) => {
                    evaluated += 1;
                    if contrast_ratio(fg, bg) < AA_MINIMUM_RATIO {
                        offenders.push(Node {
                            selector: css_path(element),
                            snippet: opening_tag(element),
                        });
                    }
                }
                (Some(None), Some(_)) | (Some(_), Some(None)) => unparseable += 1,
                // Only one of the pair declared, nothing to compare
                _ => {}
            }
        }

        // Declaration blocks in <style> elements
        let style_selector = Selector::parse("style").expect("valid selector");
        let block_re = Regex::new(r"([^{}]+)\{([^}]+)\}").expect("valid regex");
        for style_el in document.select(&style_selector) {
            let css: String = style_el.text().collect();
            for caps in block_re.captures_iter(&css) {
                let selector = caps[1].trim().to_string();
                let declarations = &caps[2];
                let fg = color_re
                    .captures(declarations)
                    .map(|c| parse_color(c[1].trim()));
                let bg = bg_re
                    .captures(declarations)
                    .map(|c| parse_color(c[1].trim()));

                match (fg, bg) {
                    (Some(Some(fg)), Some(Some(bg))) => {
                        evaluated += 1;
                        if contrast_ratio(fg, bg) < AA_MINIMUM_RATIO {
                            offenders.push(Node {
                                selector,
                                snippet: declarations.trim().to_string(),
                            });
                        }
                    }
                    (Some(None), Some(_)) | (Some(_), Some(None)) => unparseable += 1,
                    _ => {}
                }
            }
        }

        if !offenders.is_empty() {
            return vec![Finding::violation(
                "1.4.3",
                Impact::Moderate,
                "Insufficient contrast between text and background (below 4.5:1)",
            )
            .with_tags(&["wcag2aa", "color-contrast"])
            .with_nodes(offenders)];
        }

        if unparseable > 0 {
            return vec![Finding::incomplete(
                "1.4.3",
                "Some declared colors could not be evaluated for contrast",
            )
            .with_tags(&["wcag2aa", "color-contrast"])];
        }

        if evaluated > 0 {
            return vec![Finding::pass(
                "1.4.3",
                "Adequate contrast between text and background",
            )
            .with_tags(&["wcag2aa", "color-contrast"])];
        }

        vec![Finding::inapplicable(
            "1.4.3",
            "No text/background color pairs declared in the document",
        )
        .with_tags(&["wcag2aa", "color-contrast"])]
    }
}

/// Parse a CSS hex color (#rgb, #rrggbb) into (r, g, b) components
fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse an rgb() or rgba() color into (r, g, b)
fn parse_rgb_color(value: &str) -> Option<(u8, u8, u8)> {
    let re = Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").ok()?;
    let caps = re.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

/// Parse a named CSS color
fn parse_named_color(name: &str) -> Option<(u8, u8, u8)> {
    match name {
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "yellow" => Some((255, 255, 0)),
        "gray" | "grey" => Some((128, 128, 128)),
        "silver" => Some((192, 192, 192)),
        "maroon" => Some((128, 0, 0)),
        "olive" => Some((128, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "aqua" | "cyan" => Some((0, 255, 255)),
        "teal" => Some((0, 128, 128)),
        "navy" => Some((0, 0, 128)),
        "fuchsia" | "magenta" => Some((255, 0, 255)),
        "purple" => Some((128, 0, 128)),
        "orange" => Some((255, 165, 0)),
        _ => None,
    }
}

/// Parse any CSS color value into (r, g, b)
fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.starts_with('#') {
        parse_hex_color(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else {
        parse_named_color(&trimmed)
    }
}

/// Relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let srgb = [r, g, b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
}

/// Contrast ratio between two colors, >= 1.0
fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;

    fn evaluate(html: &str) -> Vec<Finding> {
        ContrastProbe.evaluate(&Html::parse_document(html))
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1, "expected ~21:1, got {:.2}", ratio);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((128, 128, 128), (128, 128, 128));
        assert!((ratio - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_color("rgb(255, 0, 0)"), Some((255, 0, 0)));
        assert_eq!(parse_color("navy"), Some((0, 0, 128)));
        assert_eq!(parse_color("var(--fg)"), None);
    }

    #[test]
    fn test_no_colors_is_inapplicable() {
        let findings = evaluate("<html><body><p>plain text</p></body></html>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Inapplicable);
    }

    #[test]
    fn test_poor_inline_contrast_is_moderate_violation() {
        let findings = evaluate(
            r#"<html><body><p style="color: #aaa; background-color: #ccc;">dim</p></body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Violation);
        assert_eq!(findings[0].impact, Some(Impact::Moderate));
        assert_eq!(findings[0].nodes.len(), 1);
    }

    #[test]
    fn test_good_inline_contrast_is_pass() {
        let findings = evaluate(
            r#"<html><body><p style="color: #000; background-color: #fff;">crisp</p></body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Pass);
    }

    #[test]
    fn test_style_block_contrast() {
        let findings = evaluate(
            r#"<html><head><style>.dim { color: #aaa; background-color: #ccc; }</style></head>
               <body><p class="dim">dim</p></body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Violation);
        assert_eq!(findings[0].nodes[0].selector, ".dim");
    }

    #[test]
    fn test_unparseable_colors_are_incomplete() {
        let findings = evaluate(
            r#"<html><body><p style="color: var(--fg); background-color: #fff;">themed</p></body></html>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Incomplete);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let html = r#"<html><body><p style="color: #777; background: #888;">x</p></body></html>"#;
        assert_eq!(evaluate(html), evaluate(html));
    }
}
