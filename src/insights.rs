// SPDX-License-Identifier: PMPL-1.0-or-later
//! Derived analytics over an aggregated audit result.
//!
//! Four independent derivations, each total over any valid
//! [`AuditResult`]: category buckets, a severity summary, a WCAG
//! conformance map, and an ordered recommendation list. None of them can
//! fail; the aggregator guarantees well-formed input.

use crate::aggregate::AuditResult;
use crate::finding::Finding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issue category used for bucketing and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Contrast, color, and visual presentation
    Visual,
    /// Keyboard-only navigation
    Keyboard,
    /// HTML structure and semantics (also the fallback bucket)
    Structure,
    /// Forms and input fields
    Forms,
    /// Images, video, and audio
    Multimedia,
    /// Mobile-specific concerns
    Mobile,
    /// Cross-cutting advice; used by recommendations only
    General,
}

/// Ordered dispatch table: the first category whose tag set intersects a
/// violation's tags wins. Violations matching nothing land in Structure.
const CATEGORY_TAGS: &[(Category, &[&str])] = &[
    (Category::Visual, &["color-contrast", "color"]),
    (Category::Keyboard, &["keyboard", "focus", "tabindex"]),
    (Category::Forms, &["form", "label"]),
    (Category::Multimedia, &["image", "video", "audio"]),
    (Category::Mobile, &["mobile", "responsive"]),
];

/// Display name and description per category bucket
const CATEGORY_INFO: &[(Category, &str, &str)] = &[
    (
        Category::Visual,
        "Visual Issues",
        "Problems related to contrast, colors, and visual elements",
    ),
    (
        Category::Keyboard,
        "Keyboard Navigation",
        "Accessibility problems for users who navigate with the keyboard alone",
    ),
    (
        Category::Structure,
        "Structure and Semantics",
        "Problems in the HTML structure and semantic elements",
    ),
    (
        Category::Forms,
        "Forms",
        "Problems in forms and input fields",
    ),
    (
        Category::Multimedia,
        "Multimedia",
        "Problems with images, videos, and multimedia content",
    ),
    (
        Category::Mobile,
        "Mobile Devices",
        "Problems specific to mobile devices",
    ),
];

/// Assign a violation to exactly one category
pub fn categorize(finding: &Finding) -> Category {
    for (category, tags) in CATEGORY_TAGS {
        if tags.iter().any(|t| finding.has_tag(t)) {
            return *category;
        }
    }
    Category::Structure
}

/// One category bucket with its assigned violations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    /// Display name
    pub name: String,
    /// What this category covers
    pub description: String,
    /// Violations assigned to this bucket
    pub findings: Vec<Finding>,
}

/// Overall severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
}

/// Weighted severity summary over all violations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveritySummary {
    /// Sum of impact weights (critical 10, serious 7, moderate 4, minor 1)
    pub score: u32,
    /// High above 50, medium above 20, low otherwise
    pub level: SeverityLevel,
    /// Fixed human-readable description for the level
    pub description: String,
}

/// Violations grouped under one conformance tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceEntry {
    /// Conformance level label, e.g. "AA" or "2.1 AA"
    pub level: String,
    /// Violations carrying this tag
    pub violations: Vec<Finding>,
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// One remediation recommendation with a concrete action checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,
}

impl Recommendation {
    fn new(
        priority: Priority,
        category: Category,
        title: &str,
        description: &str,
        actions: &[&str],
    ) -> Self {
        Self {
            priority,
            category,
            title: title.to_string(),
            description: description.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// The full derived-analytics bundle attached to an audit result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBundle {
    /// All six category buckets, each violation in exactly one
    pub categories: BTreeMap<Category, CategoryBucket>,
    /// Weighted severity summary
    pub severity: SeveritySummary,
    /// Violations per conformance tag; every known tag is present
    pub wcag_compliance: BTreeMap<String, ComplianceEntry>,
    /// Recommendations ordered by descending priority
    pub recommendations: Vec<Recommendation>,
}

/// Derive the insight bundle from an aggregated result. Total: never fails.
pub fn derive_insights(result: &AuditResult) -> InsightBundle {
    InsightBundle {
        categories: categorize_violations(&result.violations),
        severity: summarize_severity(&result.violations),
        wcag_compliance: compliance_map(&result.violations),
        recommendations: recommend(&result.violations),
    }
}

fn categorize_violations(violations: &[Finding]) -> BTreeMap<Category, CategoryBucket> {
    let mut buckets: BTreeMap<Category, CategoryBucket> = CATEGORY_INFO
        .iter()
        .map(|(category, name, description)| {
            (
                *category,
                CategoryBucket {
                    name: name.to_string(),
                    description: description.to_string(),
                    findings: Vec::new(),
                },
            )
        })
        .collect();

    for violation in violations {
        let category = categorize(violation);
        if let Some(bucket) = buckets.get_mut(&category) {
            bucket.findings.push(violation.clone());
        }
    }

    buckets
}

fn summarize_severity(violations: &[Finding]) -> SeveritySummary {
    let score: u32 = violations
        .iter()
        .map(|v| v.impact.map_or(0, |i| i.severity_weight()))
        .sum();

    let level = if score > 50 {
        SeverityLevel::High
    } else if score > 20 {
        SeverityLevel::Medium
    } else {
        SeverityLevel::Low
    };

    let description = if score > 50 {
        "High risk - urgent fixes required"
    } else if score > 20 {
        "Moderate risk - fixes recommended"
    } else if score > 0 {
        "Low risk - improvements suggested"
    } else {
        "No critical issues identified"
    };

    SeveritySummary {
        score,
        level,
        description: description.to_string(),
    }
}

/// Known conformance tags and their level labels
const CONFORMANCE_TAGS: &[(&str, &str)] = &[
    ("wcag2a", "A"),
    ("wcag2aa", "AA"),
    ("wcag2aaa", "AAA"),
    ("wcag21a", "2.1 A"),
    ("wcag21aa", "2.1 AA"),
    ("wcag21aaa", "2.1 AAA"),
];

fn compliance_map(violations: &[Finding]) -> BTreeMap<String, ComplianceEntry> {
    let mut map: BTreeMap<String, ComplianceEntry> = CONFORMANCE_TAGS
        .iter()
        .map(|(tag, level)| {
            (
                tag.to_string(),
                ComplianceEntry {
                    level: level.to_string(),
                    violations: Vec::new(),
                },
            )
        })
        .collect();

    for violation in violations {
        for tag in &violation.tags {
            if let Some(entry) = map.get_mut(tag) {
                entry.violations.push(violation.clone());
            }
        }
    }

    map
}

fn recommend(violations: &[Finding]) -> Vec<Recommendation> {
    let has_tag = |tag: &str| violations.iter().any(|v| v.has_tag(tag));
    let mut recommendations = Vec::new();

    if has_tag("color-contrast") {
        recommendations.push(Recommendation::new(
            Priority::High,
            Category::Visual,
            "Improve Color Contrast",
            "Adjust colors to meet the minimum contrast requirements (4.5:1 for normal text, 3:1 for large text)",
            &[
                "Use tools such as the WebAIM Color Contrast Checker",
                "Account for users with color blindness",
                "Test under different lighting conditions",
            ],
        ));
    }

    if has_tag("keyboard") {
        recommendations.push(Recommendation::new(
            Priority::High,
            Category::Keyboard,
            "Improve Keyboard Navigation",
            "Ensure every interactive element is reachable with the keyboard",
            &[
                "Add visible focus indicators",
                "Implement a logical tab order",
                "Test the page using only the keyboard",
            ],
        ));
    }

    if has_tag("form") {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            Category::Forms,
            "Improve Form Accessibility",
            "Add proper labels and clear instructions to form fields",
            &[
                "Associate labels with fields using for/id",
                "Provide clear instructions and validation messages",
                "Group related fields with fieldsets",
            ],
        ));
    }

    if has_tag("image") {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            Category::Multimedia,
            "Improve Image Accessibility",
            "Add descriptive alternative text to every image",
            &[
                "Write concise, descriptive alt text",
                "Use alt=\"\" for purely decorative images",
                "Provide long descriptions for complex images",
            ],
        ));
    }

    // Always present, regardless of findings
    recommendations.push(Recommendation::new(
        Priority::Low,
        Category::General,
        "Automate Accessibility Testing",
        "Run automated accessibility checks as part of the development pipeline",
        &[
            "Integrate accessibility audits into unit tests",
            "Add checks to the CI/CD pipeline",
            "Schedule regular manual audits",
        ],
    ));

    // Stable sort keeps the trigger-check order on equal priorities
    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recommendations
}
