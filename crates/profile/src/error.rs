//! Error types for the profile crate.

use thiserror::Error;

/// Errors raised while building user signals.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// No liked movies were supplied, so no profile can be derived.
    ///
    /// The calling layer enforces its own higher minimum before the
    /// pipeline runs; this variant is the builder's own guard.
    #[error("cannot build a taste profile from zero liked movies")]
    InsufficientData,
}
