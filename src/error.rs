// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the audit engine.
//!
//! Retrieval failures abort an audit with no partial result. Findings that
//! reference unknown rules are a separate concern, handled per-finding by
//! the aggregator (see [`crate::aggregate`]), and never surface here.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AuditError>;

/// Errors surfaced to callers of the audit engine
#[derive(Error, Debug)]
pub enum AuditError {
    /// The address could not be parsed as a URL
    #[error("invalid URL \"{address}\": {source}")]
    InvalidUrl {
        /// The address as supplied by the caller
        address: String,
        /// Underlying parse failure
        source: url::ParseError,
    },

    /// The remote page could not be retrieved
    #[error("failed to retrieve {address}: {source}")]
    Retrieval {
        /// Normalized address of the page
        address: String,
        /// Underlying transport failure
        source: reqwest::Error,
    },

    /// The retrieval exceeded the configured timeout
    #[error("request for {address} timed out")]
    Timeout {
        /// Normalized address of the page
        address: String,
    },

    /// The remote server answered with a non-success status
    #[error("{address} answered with HTTP {status}")]
    HttpStatus {
        /// Normalized address of the page
        address: String,
        /// Status code returned by the server
        status: u16,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
