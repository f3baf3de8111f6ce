//! Elo Arena - Multi-player Elo rating calculations
//!
//! This crate computes updated Elo ratings for the participants of a single
//! match by treating the match as a round-robin of pairwise comparisons,
//! generalizing the classic two-player algorithm to any number of players
//! ranked by place or by a single winner flag.
//!
//! ```
//! use elo_arena::Match;
//!
//! let mut game = Match::new();
//! game.add_player(2000.0, None, None)?;
//! game.add_player(2000.0, None, Some(true))?;
//! assert_eq!(game.updated_ratings()?, vec![1988.0, 2012.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::calculator::{expected_score, EloCalculator, EloConfig};
pub use rating::game::{updated_ratings, Match, Participant};
pub use rating::k_factor::{ConstantK, KFactorFn, KFactorPolicy, DEFAULT_K_FACTOR};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
