use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use crate::ConfigError;

/// A positive, finite scaling factor.
///
/// Used for the band offset (ATR multiples) and for the signal marker
/// offsets (tick multiples).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct Multiplier(f64);

impl Multiplier {
    /// Creates a new multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMultiplier`] if `value` is zero,
    /// negative, infinite, or NaN.
    pub fn try_new(value: f64) -> Result<Self, ConfigError> {
        Self::named("multiplier", value)
    }

    pub(crate) fn named(name: &'static str, value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMultiplier { name, value })
        }
    }

    /// Only for compile-time defaults known to be valid.
    pub(crate) const fn from_const(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Multiplier {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Multiplier {}

impl Hash for Multiplier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
