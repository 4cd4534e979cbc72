//! Unified error types for the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for ticket-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing / serialization errors.
    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// XML parsing errors.
    #[error("xml parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The configured data directory does not exist or is not a directory.
    #[error("data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// Ticket metadata requires an explicit support category.
    #[error("support category is required and was not provided")]
    MissingCategory,

    /// The same ticket id appeared more than once across the corpus.
    #[error("duplicate ticket id: {0}")]
    DuplicateTicketId(String),

    /// Strict boundary gate: blank query at the answer layer.
    #[error("Query cannot be empty")]
    EmptyQuery,

    /// Strict boundary gate: query under the minimum length.
    #[error("Query too short. Please provide more details.")]
    QueryTooShort,

    /// Embedding provider failures and dimension mismatches.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Collection-level search failures.
    #[error("index error: {0}")]
    Index(String),

    /// Completion provider failures, propagated to the caller as-is.
    #[error("completion error: {0}")]
    Completion(String),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),
}
