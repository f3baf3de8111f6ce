//! Elo calculator and its configuration
//!
//! This module provides the core Elo computations (expected score and
//! rating adjustment) together with the calculator that owns the K-factor
//! policy and rounding configuration.

use crate::error::{RatingError, Result};
use crate::rating::k_factor::{ConstantK, KFactorPolicy, DEFAULT_K_FACTOR};
use crate::types::{Rating, Rounding};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Configuration for an Elo calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EloConfig {
    /// K-factor used by the default constant policy
    pub k_factor: f64,
    /// Rounding applied to updated ratings
    pub rounding: Rounding,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            rounding: Rounding::Nearest,
        }
    }
}

impl EloConfig {
    /// Create a slow-moving configuration (smaller rating swings)
    pub fn stable() -> Self {
        Self {
            k_factor: 16.0,
            ..Self::default()
        }
    }

    /// Create a fast-moving configuration (larger rating swings)
    pub fn volatile() -> Self {
        Self {
            k_factor: 32.0,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(RatingError::InvalidPolicy {
                reason: format!(
                    "K-factor must be a positive finite number, got {}",
                    self.k_factor
                ),
            }
            .into());
        }

        Ok(())
    }
}

/// Calculate the expected score of a player against an opponent
///
/// Returns the modeled probability that the player outperforms the
/// opponent, derived solely from the rating gap. Strictly between 0 and 1
/// for finite ratings; 0.5 for equal ratings.
pub fn expected_score(player_rating: Rating, opponent_rating: Rating) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - player_rating) / 400.0))
}

/// Elo calculator owning the K-factor policy and rounding configuration
///
/// The policy is held behind an `Arc` and only read during a computation.
/// Reconfiguring a calculator shared across threads while a computation is
/// in flight requires external synchronization.
pub struct EloCalculator {
    config: EloConfig,
    policy: Arc<dyn KFactorPolicy>,
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self {
            config: EloConfig::default(),
            policy: Arc::new(ConstantK::default()),
        }
    }
}

impl Clone for EloCalculator {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            policy: Arc::clone(&self.policy),
        }
    }
}

impl std::fmt::Debug for EloCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EloCalculator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EloCalculator {
    /// Create a new calculator with the given configuration
    ///
    /// Installs a constant K-factor policy at the configured value.
    pub fn new(config: EloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            policy: Arc::new(ConstantK::new(config.k_factor)),
        })
    }

    /// Install a new K-factor policy
    ///
    /// The policy is probed once with an unknown rating before it is
    /// installed; if the probe fails or yields an unusable K-factor the
    /// previous policy remains active and an `InvalidPolicy` error is
    /// returned.
    pub fn set_k_factor<P>(&mut self, policy: P) -> Result<()>
    where
        P: KFactorPolicy + 'static,
    {
        match policy.k_factor(None) {
            Ok(k) if k.is_finite() && k > 0.0 => {
                self.policy = Arc::new(policy);
                Ok(())
            }
            Ok(k) => Err(RatingError::InvalidPolicy {
                reason: format!("policy returned an unusable K-factor {k} for an unknown rating"),
            }
            .into()),
            Err(e) => Err(RatingError::InvalidPolicy {
                reason: format!("policy failed for an unknown rating: {e}"),
            }
            .into()),
        }
    }

    /// Resolve the K-factor for a rating using the installed policy
    pub fn k_factor(&self, rating: Option<Rating>) -> Result<f64> {
        self.policy.k_factor(rating)
    }

    /// Rounding applied to updated ratings
    pub fn rounding(&self) -> Rounding {
        self.config.rounding
    }

    /// Calculate the amount a rating should change for one comparison
    ///
    /// An explicit `k_factor` takes precedence over the installed policy;
    /// otherwise the policy is invoked with `rating`, which may be `None`
    /// when the mover's rating is unknown. The actual score is
    /// conventionally one of 0, 0.5 or 1 but the range is not enforced.
    pub fn rating_adjustment(
        &self,
        expected_score: f64,
        actual_score: f64,
        rating: Option<Rating>,
        k_factor: Option<f64>,
    ) -> Result<f64> {
        if !(0.0..=1.0).contains(&actual_score) {
            warn!("actual score {actual_score} outside the conventional 0..=1 range");
        }

        let k = match k_factor {
            Some(k) => k,
            None => self.policy.k_factor(rating)?,
        };

        Ok(k * (actual_score - expected_score))
    }

    /// Apply the configured rounding to an updated rating
    pub fn round(&self, rating: f64) -> f64 {
        match self.config.rounding {
            Rounding::Nearest => rating.round(),
            Rounding::Exact => rating,
        }
    }

    /// Get the current configuration as JSON
    pub fn config(&self) -> serde_json::Value {
        serde_json::to_value(self.config).unwrap_or(serde_json::Value::Null)
    }

    /// Update configuration from JSON
    ///
    /// Replaces any custom K-factor policy with a constant policy at the
    /// new configuration's K-factor.
    pub fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let new_config: EloConfig = serde_json::from_value(config).map_err(|e| {
            RatingError::InvalidPolicy {
                reason: format!("invalid Elo configuration: {e}"),
            }
        })?;

        new_config.validate()?;
        self.policy = Arc::new(ConstantK::new(new_config.k_factor));
        self.config = new_config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::k_factor::KFactorFn;

    #[test]
    fn test_expected_score_known_value() {
        assert!((expected_score(1200.0, 1000.0) - 0.7597).abs() < 0.0001);
    }

    #[test]
    fn test_expected_score_equal_ratings() {
        assert_eq!(expected_score(1500.0, 1500.0), 0.5);
    }

    #[test]
    fn test_expected_score_complement() {
        let a = expected_score(1850.0, 1420.0);
        let b = expected_score(1420.0, 1850.0);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rating_adjustment_with_default_k() {
        let calculator = EloCalculator::default();
        let adjustment = calculator.rating_adjustment(0.75, 0.0, None, None).unwrap();
        assert!((adjustment + 18.0).abs() < 0.0001);
    }

    #[test]
    fn test_rating_adjustment_with_explicit_k() {
        let calculator = EloCalculator::default();
        let adjustment = calculator
            .rating_adjustment(0.75, 0.0, None, Some(24.0))
            .unwrap();
        assert!((adjustment + 18.0).abs() < 0.0001);
    }

    #[test]
    fn test_explicit_k_takes_precedence_over_policy() {
        let mut calculator = EloCalculator::default();
        calculator.set_k_factor(ConstantK::new(10.0)).unwrap();
        let adjustment = calculator
            .rating_adjustment(0.75, 0.0, None, Some(24.0))
            .unwrap();
        assert!((adjustment + 18.0).abs() < 0.0001);
    }

    #[test]
    fn test_rating_adjustment_with_constant_policy() {
        let mut calculator = EloCalculator::default();
        calculator.set_k_factor(ConstantK::new(10.0)).unwrap();
        let adjustment = calculator.rating_adjustment(0.75, 0.0, None, None).unwrap();
        assert!((adjustment + 7.5).abs() < 0.0001);
    }

    #[test]
    fn test_rating_adjustment_with_banded_policy() {
        let mut calculator = EloCalculator::default();
        calculator
            .set_k_factor(KFactorFn::new(|rating| {
                let rating = rating.unwrap_or(2000.0);
                Ok(if rating < 2100.0 {
                    32.0
                } else if rating <= 2400.0 {
                    24.0
                } else {
                    16.0
                })
            }))
            .unwrap();

        let unknown = calculator.rating_adjustment(0.75, 0.0, None, None).unwrap();
        assert!((unknown + 24.0).abs() < 0.0001);

        let mid = calculator
            .rating_adjustment(0.75, 0.0, Some(2200.0), None)
            .unwrap();
        assert!((mid + 18.0).abs() < 0.0001);

        let high = calculator
            .rating_adjustment(0.75, 0.0, Some(2500.0), None)
            .unwrap();
        assert!((high + 12.0).abs() < 0.0001);
    }

    #[test]
    fn test_set_k_factor_rejects_failing_policy() {
        let mut calculator = EloCalculator::default();
        let result = calculator.set_k_factor(KFactorFn::new(|rating| {
            let rating = rating.ok_or_else(|| anyhow::anyhow!("rating required"))?;
            Ok(rating / 100.0)
        }));

        assert!(result.is_err());
        // Previous policy stays active.
        assert_eq!(calculator.k_factor(None).unwrap(), DEFAULT_K_FACTOR);
    }

    #[test]
    fn test_set_k_factor_rejects_unusable_probe_result() {
        let mut calculator = EloCalculator::default();

        assert!(calculator
            .set_k_factor(KFactorFn::new(|_| Ok(f64::NAN)))
            .is_err());
        assert!(calculator.set_k_factor(ConstantK::new(-5.0)).is_err());
        assert_eq!(calculator.k_factor(None).unwrap(), DEFAULT_K_FACTOR);
    }

    #[test]
    fn test_config_validation() {
        assert!(EloConfig::default().validate().is_ok());

        let mut config = EloConfig::default();
        config.k_factor = 0.0;
        assert!(config.validate().is_err());

        config.k_factor = f64::NAN;
        assert!(config.validate().is_err());
        assert!(EloCalculator::new(config).is_err());
    }

    #[test]
    fn test_config_presets() {
        assert!(EloConfig::stable().k_factor < EloConfig::default().k_factor);
        assert!(EloConfig::volatile().k_factor > EloConfig::default().k_factor);
        assert!(EloConfig::stable().validate().is_ok());
        assert!(EloConfig::volatile().validate().is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let mut calculator = EloCalculator::default();
        let config = calculator.config();
        assert_eq!(config["k_factor"], 24.0);

        calculator
            .update_config(serde_json::json!({ "k_factor": 32.0, "rounding": "exact" }))
            .unwrap();
        assert_eq!(calculator.k_factor(None).unwrap(), 32.0);
        assert_eq!(calculator.rounding(), Rounding::Exact);
    }

    #[test]
    fn test_update_config_rejects_invalid() {
        let mut calculator = EloCalculator::default();
        let result =
            calculator.update_config(serde_json::json!({ "k_factor": -1.0, "rounding": "nearest" }));

        assert!(result.is_err());
        // Old configuration untouched.
        assert_eq!(calculator.k_factor(None).unwrap(), DEFAULT_K_FACTOR);
        assert_eq!(calculator.rounding(), Rounding::Nearest);
    }
}
