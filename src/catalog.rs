// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG rule catalog.
//!
//! The catalog is an explicitly constructed, read-only registry of WCAG
//! success criteria. It is injected wherever rule lookups are needed; there
//! is no module-level table and no mutation API after load.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// One WCAG success criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Dotted identifier, e.g. "1.1.1"
    pub id: String,
    /// Criterion name
    pub name: String,
    /// Criterion description
    pub description: String,
    /// Conformance level
    #[serde(rename = "wcag")]
    pub level: WcagLevel,
}

/// Built-in success criteria, seeded when no rule file is supplied
const DEFAULT_RULES: &[(&str, &str, &str, WcagLevel)] = &[
    (
        "1.1.1",
        "Non-text Content",
        "All non-text content presented to the user has a text alternative that serves the equivalent purpose.",
        WcagLevel::A,
    ),
    (
        "1.2.1",
        "Audio-only and Video-only (Prerecorded)",
        "For prerecorded audio-only and prerecorded video-only media, an alternative for time-based media is provided.",
        WcagLevel::A,
    ),
    (
        "1.3.1",
        "Info and Relationships",
        "Information, structure, and relationships conveyed through presentation can be programmatically determined or are available in text.",
        WcagLevel::A,
    ),
    (
        "1.4.1",
        "Use of Color",
        "Color is not used as the only visual means of conveying information, indicating an action, prompting a response, or distinguishing a visual element.",
        WcagLevel::A,
    ),
    (
        "1.4.3",
        "Contrast (Minimum)",
        "The visual presentation of text and images of text has a contrast ratio of at least 4.5:1.",
        WcagLevel::AA,
    ),
    (
        "2.1.1",
        "Keyboard",
        "All functionality of the content is operable through a keyboard interface without requiring specific timings for individual keystrokes.",
        WcagLevel::A,
    ),
    (
        "2.2.1",
        "Timing Adjustable",
        "For each time limit set by the content, at least one of the following is true: turn off, adjust, or extend.",
        WcagLevel::A,
    ),
    (
        "2.4.1",
        "Bypass Blocks",
        "A mechanism is available to bypass blocks of content that are repeated on multiple web pages.",
        WcagLevel::A,
    ),
    (
        "2.4.4",
        "Link Purpose (In Context)",
        "The purpose of each link can be determined from the link text alone or from the link text together with its programmatically determined context.",
        WcagLevel::A,
    ),
    (
        "3.1.1",
        "Language of Page",
        "The default human language of each web page can be programmatically determined.",
        WcagLevel::A,
    ),
    (
        "3.2.1",
        "On Focus",
        "When any component receives focus, it does not initiate a change of context.",
        WcagLevel::A,
    ),
    (
        "3.3.2",
        "Labels or Instructions",
        "Labels or instructions are provided when content requires user input.",
        WcagLevel::A,
    ),
    (
        "4.1.1",
        "Parsing",
        "In content implemented using markup languages, elements have complete start and end tags, are nested according to their specifications, do not contain duplicate attributes, and any IDs are unique.",
        WcagLevel::A,
    ),
    (
        "4.1.2",
        "Name, Role, Value",
        "For all user interface components, the name and role can be programmatically determined; states, properties, and values that can be set by the user can be programmatically set.",
        WcagLevel::A,
    ),
];

/// Read-only registry of WCAG rules, keyed by dotted identifier
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: BTreeMap<String, Rule>,
}

impl RuleCatalog {
    /// Build a catalog from an explicit rule list, last write wins per id
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        Self { rules }
    }

    /// Load a catalog from a JSON rule file.
    ///
    /// A missing or empty file seeds the built-in table instead of failing;
    /// a present but malformed file is an error.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "rule file not found, seeding built-in catalog");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let rules: Vec<Rule> = serde_json::from_str(&content)?;

        if rules.is_empty() {
            warn!(path = %path.display(), "rule file is empty, seeding built-in catalog");
            return Ok(Self::default());
        }

        Ok(Self::from_rules(rules))
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Whether a rule with the given id exists
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// All rules in id order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::from_rules(DEFAULT_RULES.iter().map(|(id, name, description, level)| Rule {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            level: *level,
        }))
    }
}
