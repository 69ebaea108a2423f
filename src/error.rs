//! Crate-level error types.

use thiserror::Error;

use crate::discovery::DiscoveryError;

/// Errors surfaced by the scanner and the descriptor API.
#[derive(Error, Debug)]
pub enum InterceptorError {
    /// A phase tag outside the fixed set of phases.
    #[error("Invalid phase: {0}")]
    InvalidPhase(String),

    /// The finder or the access relaxer failed for a scanned class.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A context bag value whose type disagrees with its key type.
    #[error("Type mismatch in context bag: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
