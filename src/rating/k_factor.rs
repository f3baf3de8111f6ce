//! K-factor policies
//!
//! This module defines the interface for resolving the K-factor applied to
//! a rating adjustment and provides the constant and closure-backed
//! implementations.

use crate::error::Result;
use crate::types::Rating;

/// Default K-factor when no policy has been configured
pub const DEFAULT_K_FACTOR: f64 = 24.0;

/// Trait for resolving the K-factor of a rating adjustment
///
/// The rating is optional: adjustments computed outside a match context do
/// not always know the mover's rating, and a usable policy must produce a
/// K-factor in that case too. Policies that cannot are rejected at
/// installation time.
pub trait KFactorPolicy: Send + Sync {
    /// Resolve the K-factor for a player with the given rating
    fn k_factor(&self, rating: Option<Rating>) -> Result<f64>;
}

/// Policy returning a fixed K-factor regardless of rating
#[derive(Debug, Clone, Copy)]
pub struct ConstantK {
    k: f64,
}

impl ConstantK {
    /// Create a constant policy with the given K-factor
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl Default for ConstantK {
    fn default() -> Self {
        Self::new(DEFAULT_K_FACTOR)
    }
}

impl KFactorPolicy for ConstantK {
    fn k_factor(&self, _rating: Option<Rating>) -> Result<f64> {
        Ok(self.k)
    }
}

/// Policy backed by a caller-supplied function of the mover's rating
pub struct KFactorFn {
    f: Box<dyn Fn(Option<Rating>) -> Result<f64> + Send + Sync>,
}

impl KFactorFn {
    /// Wrap a function as a K-factor policy
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<Rating>) -> Result<f64> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl KFactorPolicy for KFactorFn {
    fn k_factor(&self, rating: Option<Rating>) -> Result<f64> {
        (self.f)(rating)
    }
}

impl std::fmt::Debug for KFactorFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KFactorFn").finish_non_exhaustive()
    }
}
