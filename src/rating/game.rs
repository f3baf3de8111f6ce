//! Match aggregation and orchestration
//!
//! A [`Match`] collects participants with their pre-match ratings and
//! result standings, validates that the result specification is consistent,
//! and computes every participant's updated rating as a round-robin of
//! pairwise Elo comparisons.

use crate::error::{RatingError, Result};
use crate::rating::calculator::{expected_score, EloCalculator, EloConfig};
use crate::types::{Rating, RatingChange, Rounding, Standing};
use tracing::debug;

/// One entrant in a match: a pre-match rating plus a result standing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant {
    rating: Rating,
    standing: Standing,
}

impl Participant {
    fn new(rating: Rating, standing: Standing) -> Self {
        Self { rating, standing }
    }

    /// Pre-match rating
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Result standing within the match
    pub fn standing(&self) -> Standing {
        self.standing
    }

    /// Derive this participant's actual score against an opponent
    ///
    /// Winner flags dominate, then strict place comparison; every other
    /// pairing is a draw. The derivation is symmetric: for any two
    /// participants the scores from both perspectives sum to 1.
    pub fn score_against(&self, opponent: &Participant) -> f64 {
        match (self.standing, opponent.standing) {
            // Two flagged winners are rejected by match validation; the
            // arm keeps the derivation total and symmetric regardless.
            (Standing::Winner, Standing::Winner) => 0.5,
            (Standing::Winner, _) => 1.0,
            (_, Standing::Winner) => 0.0,
            (Standing::Placed(own), Standing::Placed(other)) => {
                if own < other {
                    1.0
                } else if own > other {
                    0.0
                } else {
                    0.5
                }
            }
            _ => 0.5,
        }
    }

    /// Compute this participant's updated rating against a set of opponents
    ///
    /// Sums the pairwise rating adjustments over all opponents and applies
    /// the calculator's rounding. Reads only pre-match ratings; nothing is
    /// mutated.
    pub fn updated_rating(
        &self,
        calculator: &EloCalculator,
        opponents: &[Participant],
    ) -> Result<f64> {
        let mut total = 0.0;
        for opponent in opponents {
            total += calculator.rating_adjustment(
                expected_score(self.rating, opponent.rating),
                self.score_against(opponent),
                Some(self.rating),
                None,
            )?;
        }

        Ok(calculator.round(self.rating + total))
    }
}

/// A single match between any number of participants
///
/// Participants are appended in order; the output of [`updated_ratings`]
/// preserves that order. Cross-participant consistency (a single winner
/// flag, all-or-nothing place usage) is validated lazily when ratings are
/// requested.
///
/// [`updated_ratings`]: Match::updated_ratings
#[derive(Debug, Clone)]
pub struct Match {
    calculator: EloCalculator,
    participants: Vec<Participant>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Create an empty match with the default calculator (K-factor 24,
    /// ratings rounded to the nearest whole number)
    pub fn new() -> Self {
        Self::with_calculator(EloCalculator::default())
    }

    /// Create an empty match computing ratings with the given calculator
    pub fn with_calculator(calculator: EloCalculator) -> Self {
        Self {
            calculator,
            participants: Vec::new(),
        }
    }

    /// Create a ranked match from (rating, place) pairs, in order
    ///
    /// Updated ratings keep their fractional precision, matching the
    /// behavior of the [`updated_ratings`](crate::updated_ratings)
    /// convenience function.
    pub fn from_results(results: &[(Rating, f64)]) -> Result<Self> {
        let config = EloConfig {
            rounding: Rounding::Exact,
            ..EloConfig::default()
        };
        let mut game = Self::with_calculator(EloCalculator::new(config)?);
        for &(rating, place) in results {
            game.add_player(rating, Some(place), None)?;
        }

        Ok(game)
    }

    /// All participants, in insertion order
    pub fn players(&self) -> &[Participant] {
        &self.participants
    }

    /// The calculator used for rating computations
    pub fn calculator(&self) -> &EloCalculator {
        &self.calculator
    }

    /// Mutable access to the calculator, e.g. to install a K-factor policy
    pub fn calculator_mut(&mut self) -> &mut EloCalculator {
        &mut self.calculator
    }

    /// Add a participant to the match
    ///
    /// `place` ranks the participant within the match (lower is better);
    /// `winner` flags the single best performer of a rankless match. At
    /// most one of the two may be supplied. Returns the match itself so
    /// calls can be chained.
    pub fn add_player(
        &mut self,
        rating: Rating,
        place: Option<f64>,
        winner: Option<bool>,
    ) -> Result<&mut Self> {
        let standing = Self::standing_for(rating, place, winner)?;
        self.participants.push(Participant::new(rating, standing));
        Ok(self)
    }

    fn standing_for(rating: Rating, place: Option<f64>, winner: Option<bool>) -> Result<Standing> {
        if !rating.is_finite() {
            return Err(RatingError::InvalidArgument {
                reason: format!("rating must be a finite number, got {rating}"),
            }
            .into());
        }

        if let Some(p) = place {
            if !p.is_finite() {
                return Err(RatingError::InvalidArgument {
                    reason: format!("place must be a finite number, got {p}"),
                }
                .into());
            }
        }

        let winner = winner.unwrap_or(false);
        if winner && place.is_some() {
            return Err(RatingError::InvalidArgument {
                reason: "winner and place cannot both be specified".to_string(),
            }
            .into());
        }

        Ok(match place {
            Some(p) => Standing::Placed(p),
            None if winner => Standing::Winner,
            None => Standing::Unranked,
        })
    }

    /// Calculate the updated rating of every participant, in insertion order
    ///
    /// Validates the result specification first: at most one winner flag,
    /// and places set on either all participants or none. Each rating is
    /// recomputed from the original pre-match values; the match itself is
    /// never mutated, so repeated calls yield identical results.
    pub fn updated_ratings(&self) -> Result<Vec<f64>> {
        self.validate_players()?;
        debug!(
            participants = self.participants.len(),
            "computing updated ratings"
        );

        let mut updated = Vec::with_capacity(self.participants.len());
        for (index, player) in self.participants.iter().enumerate() {
            let opponents: Vec<Participant> = self
                .participants
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, opponent)| *opponent)
                .collect();
            updated.push(player.updated_rating(&self.calculator, &opponents)?);
        }

        Ok(updated)
    }

    /// Calculate per-participant rating changes, in insertion order
    pub fn rating_changes(&self) -> Result<Vec<RatingChange>> {
        let updated = self.updated_ratings()?;

        Ok(self
            .participants
            .iter()
            .zip(updated)
            .map(|(player, new_rating)| RatingChange {
                old_rating: player.rating(),
                new_rating,
                delta: new_rating - player.rating(),
            })
            .collect())
    }

    fn validate_players(&self) -> Result<()> {
        if self.multiple_winners() {
            return Err(RatingError::InvalidMatchConfiguration {
                reason: "only one player can be the winner".to_string(),
            }
            .into());
        }

        if self.inconsistent_places() {
            return Err(RatingError::InvalidMatchConfiguration {
                reason: "all players must have places if any do".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn multiple_winners(&self) -> bool {
        self.participants
            .iter()
            .filter(|p| matches!(p.standing(), Standing::Winner))
            .count()
            > 1
    }

    fn inconsistent_places(&self) -> bool {
        let placed = self
            .participants
            .iter()
            .filter(|p| matches!(p.standing(), Standing::Placed(_)))
            .count();

        placed > 0 && placed < self.participants.len()
    }
}

/// Calculate updated ratings for a ranked match in one call
///
/// `results` pairs each pre-match rating with its place (lower is better);
/// the output preserves the input order and keeps fractional precision.
pub fn updated_ratings(results: &[(Rating, f64)]) -> Result<Vec<f64>> {
    Match::from_results(results)?.updated_ratings()
}
