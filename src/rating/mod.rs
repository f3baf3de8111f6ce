//! Multi-player Elo rating computation
//!
//! This module provides the generalized Elo algorithm: the expected-score
//! and rating-adjustment math, pluggable K-factor policies, and the match
//! aggregate that validates result specifications and orchestrates the
//! pairwise computation.

pub mod calculator;
pub mod game;
pub mod k_factor;

// Re-export commonly used types
pub use calculator::{expected_score, EloCalculator, EloConfig};
pub use game::{updated_ratings, Match, Participant};
pub use k_factor::{ConstantK, KFactorFn, KFactorPolicy, DEFAULT_K_FACTOR};
