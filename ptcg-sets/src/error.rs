//! Error types for ptcg-sets
//!
//! Per-set failures inside a pipeline are recorded and the run goes on.
//! A `SetsError` that escapes a pipeline function aborts the run.

use crate::services::catalog_client::CatalogError;
use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum SetsError {
    /// Remote catalog failure (after retries)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// ptcg-common error (I/O, JSON, config, missing input)
    #[error(transparent)]
    Common(#[from] ptcg_common::Error),
}

/// Result type for pipeline operations
pub type SetsResult<T> = Result<T, SetsError>;
