use crate::{ConfigError, Ohlcv};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
    num::NonZero,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (period, multipliers, display toggles). Configs are value types: cheap to
/// clone, compare, and hash.
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Lookback period (number of bars).
    fn period(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the lookback period.
    #[must_use]
    fn period(self, period: NonZero<usize>) -> Self;

    /// Validates the collected parameters and builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required field is missing or a
    /// parameter is out of range.
    fn build(self) -> Result<Config, ConfigError>;
}

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call to
/// [`compute`](Indicator::compute). Output is `None` until enough data has been
/// received.
///
/// # Example
///
/// ```
/// use atr_bands::{Atr, AtrConfig, Indicator};
/// use std::num::NonZero;
/// # use atr_bands::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.1 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.1 }
/// #     fn open_time(&self) -> Timestamp { self.2 }
/// #     fn tick_size(&self) -> Price { 0.01 }
/// # }
///
/// let mut atr = Atr::new(AtrConfig::new(NonZero::new(2).unwrap()));
///
/// assert_eq!(atr.compute(&Bar(12.0, 10.0, 1)), None);
/// assert_eq!(atr.compute(&Bar(14.0, 10.0, 2)), Some(3.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. ATR bands).
    type Output: Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds a bar and returns the updated indicator value,
    /// or `None` if not yet available.
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed indicator value without advancing state,
    /// or `None` if not yet available.
    ///
    /// This is a cached field read, O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;
}
