// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit orchestration - the public entry point of the engine.
//!
//! An [`Auditor`] holds the injected rule catalog, page fetcher, and probe
//! set, and turns one document source into one immutable [`AuditReport`].
//! Every call is independent: no state is shared between audits, so
//! concurrent audits need no coordination. A retrieval failure aborts the
//! whole call; there is never a partially populated report.

use crate::aggregate::{aggregate, AuditResult};
use crate::catalog::RuleCatalog;
use crate::error::Result;
use crate::fetch::{normalize_url, HttpFetcher, PageFetcher};
use crate::insights::{derive_insights, InsightBundle};
use crate::probes::{self, Probe};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Source reference used for non-URL documents
const LOCAL_SOURCE: &str = "local";

/// A document source to audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuditSource {
    /// Raw HTML, from a string or an uploaded file
    Html {
        /// The document markup
        content: String,
    },
    /// A remote page to fetch and audit
    Url {
        /// Address of the page; scheme defaults to https
        address: String,
    },
}

/// The combined, immutable outcome of one audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Partitioned findings and score
    #[serde(flatten)]
    pub result: AuditResult,
    /// Derived analytics
    #[serde(flatten)]
    pub insights: InsightBundle,
    /// When the audit ran
    pub checked_at: DateTime<Utc>,
}

/// Runs audits over document sources
pub struct Auditor {
    catalog: RuleCatalog,
    fetcher: Box<dyn PageFetcher>,
    probes: Vec<Box<dyn Probe>>,
}

impl Auditor {
    /// Create an auditor with the given catalog, the default HTTP fetcher,
    /// and the default probe set
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            fetcher: Box::new(HttpFetcher::new()),
            probes: probes::default_probes(),
        }
    }

    /// Replace the page fetcher (tests, alternate retrieval strategies)
    pub fn with_fetcher(mut self, fetcher: Box<dyn PageFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// The injected rule catalog
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Audit one document source.
    ///
    /// Obtains the document (fetching remote pages through the injected
    /// fetcher), runs the probe set, aggregates, and derives insights.
    pub fn run(&self, source: &AuditSource) -> Result<AuditReport> {
        let (source_ref, html) = match source {
            AuditSource::Html { content } => (LOCAL_SOURCE.to_string(), content.clone()),
            AuditSource::Url { address } => {
                let url = normalize_url(address)?;
                let body = self.fetcher.fetch(&url)?;
                (url.to_string(), body)
            }
        };

        let document = scraper::Html::parse_document(&html);
        let findings = probes::run(&self.probes, &document);
        let result = aggregate(&source_ref, findings, &self.catalog);
        let insights = derive_insights(&result);

        info!(
            source = %result.source_ref,
            score = result.score,
            violations = result.violations.len(),
            "audit complete"
        );

        Ok(AuditReport {
            result,
            insights,
            checked_at: Utc::now(),
        })
    }
}
