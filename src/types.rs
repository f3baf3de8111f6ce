//! Common types used throughout the rating library

use serde::{Deserialize, Serialize};

/// A player's Elo rating
pub type Rating = f64;

/// Result specifier for one participant in a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Standing {
    /// No explicit result; draws against other unranked participants and
    /// loses to a declared winner
    Unranked,
    /// Rank within the match; a lower value placed better
    Placed(f64),
    /// The single best-performing participant of a rankless match
    Winner,
}

/// Rounding applied to updated ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round updated ratings to the nearest whole number
    Nearest,
    /// Keep full fractional precision
    Exact,
}

/// Rating change information for a participant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub old_rating: Rating,
    pub new_rating: Rating,
    pub delta: f64,
}
