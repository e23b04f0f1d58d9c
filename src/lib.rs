// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-auditor - Accessibility Audit & Scoring Engine
//!
//! Audits an HTML document (raw string, file content, or a fetched remote
//! page) against a catalog of WCAG success criteria and produces a scored,
//! partitioned report with derived insights.
//!
//! ## Pipeline
//!
//! - **Catalog**: injected, read-only registry of WCAG rules
//! - **Probes**: independent pure checks, each classifying its findings as
//!   violation / pass / incomplete / inapplicable
//! - **Aggregator**: partitions findings and computes the 0-100 score
//! - **Insights**: category buckets, severity summary, WCAG compliance map,
//!   and ordered recommendations
//! - **Auditor**: the single entry point composing the above
//!
//! ## Probes
//!
//! - **Alt Text** (1.1.1): images without alternative text
//! - **Contrast** (1.4.3): deterministic text/background contrast heuristic
//! - **Headings** (1.3.1): heading hierarchy without a top-level heading
//! - **Form Labels** (3.3.2): form controls without an accessible name

pub mod aggregate;
pub mod audit;
pub mod catalog;
pub mod error;
pub mod fetch;
pub mod finding;
pub mod history;
pub mod insights;
pub mod probes;
pub mod report;

pub use aggregate::AuditResult;
pub use audit::{AuditReport, AuditSource, Auditor};
pub use catalog::{Rule, RuleCatalog, WcagLevel};
pub use error::AuditError;
pub use finding::{Finding, FindingKind, Impact};
pub use insights::InsightBundle;
