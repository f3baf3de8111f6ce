//! Error types for rating calculations
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Invalid match configuration: {reason}")]
    InvalidMatchConfiguration { reason: String },

    #[error("Invalid K-factor policy: {reason}")]
    InvalidPolicy { reason: String },
}
