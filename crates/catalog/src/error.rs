//! Error types for the catalog crate.

use thiserror::Error;

/// Errors raised by catalog lookups.
///
/// Callers in the recommendation core treat any of these as a degraded
/// (empty) result; none of them is fatal to a request.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport-level failure (connection refused, timeout, bad TLS...)
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("catalog returned status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },
}

/// Convenience alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;
