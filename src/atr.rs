use std::{fmt::Display, num::NonZero};

use crate::{
    ConfigError, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, Timestamp,
    true_range::true_range,
};

/// Configuration for the Average True Range ([`Atr`]) indicator.
///
/// # Example
///
/// ```
/// use atr_bands::{AtrConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = AtrConfig::new(NonZero::new(14).unwrap());
/// assert_eq!(config.period(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AtrConfig {
    period: usize,
}

impl IndicatorConfig for AtrConfig {
    type Builder = AtrConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        AtrConfigBuilder::new()
    }

    #[inline]
    fn period(&self) -> usize {
        self.period
    }
}

impl AtrConfig {
    /// ATR with the given period.
    #[must_use]
    pub fn new(period: NonZero<usize>) -> Self {
        Self {
            period: period.get(),
        }
    }

    /// ATR(14), the conventional Wilder setting.
    #[must_use]
    pub fn default_14() -> Self {
        Self { period: 14 }
    }
}

impl Display for AtrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AtrConfig({})", self.period)
    }
}

/// Builder for [`AtrConfig`].
///
/// Period must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct AtrConfigBuilder {
    period: Option<usize>,
}

impl AtrConfigBuilder {
    fn new() -> Self {
        Self { period: None }
    }
}

impl IndicatorConfigBuilder<AtrConfig> for AtrConfigBuilder {
    #[inline]
    fn period(mut self, period: NonZero<usize>) -> Self {
        self.period = Some(period.get());
        self
    }

    #[inline]
    fn build(self) -> Result<AtrConfig, ConfigError> {
        let period = self.period.ok_or(ConfigError::MissingPeriod)?;

        Ok(AtrConfig { period })
    }
}

#[derive(Clone, Copy, Debug)]
enum AtrPhase {
    /// Summing true ranges for the SMA seed. `committed` holds the sum up
    /// to the previous bar so the current bar can be repainted.
    Seeding { committed: f64, sum: f64 },
    /// Wilder smoothing. `previous` is the ATR of the previous bar.
    Smoothing { previous: Price },
}

/// Average True Range (ATR) with Wilder's smoothing.
///
/// Measures volatility as the smoothed average of the true range:
/// `max(high − low, |high − prev_close|, |low − prev_close|)`, falling back
/// to `high − low` on the very first bar.
///
/// The first `period` true ranges are averaged with a simple mean (SMA
/// seed). After seeding, each bar is folded in with Wilder's method:
///
/// ```text
/// ATR = (prev_ATR × (period − 1) + TR) / period
/// ```
///
/// Output begins at bar `period`. Supports live repainting: feeding a bar
/// with the same `open_time` recomputes from the previous ATR and previous
/// close without advancing state.
///
/// # Example
///
/// ```
/// use atr_bands::{Atr, AtrConfig};
/// use std::num::NonZero;
/// # use atr_bands::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.2 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.2 }
/// #     fn open_time(&self) -> Timestamp { self.3 }
/// #     fn tick_size(&self) -> Price { 0.01 }
/// # }
///
/// let mut atr = Atr::new(AtrConfig::new(NonZero::new(2).unwrap()));
///
/// // TR = 101 − 99 = 2 (no previous close)
/// assert_eq!(atr.compute(&Bar(101.0, 99.0, 100.0, 1)), None);
/// // TR = max(2, |103 − 100|, |101 − 100|) = 3, seed = (2 + 3) / 2
/// assert_eq!(atr.compute(&Bar(103.0, 101.0, 102.0, 2)), Some(2.5));
/// // TR = max(13, |108 − 102|, |95 − 102|) = 13, (2.5 × 1 + 13) / 2
/// assert_eq!(atr.compute(&Bar(108.0, 95.0, 105.0, 3)), Some(7.75));
/// ```
#[derive(Clone, Debug)]
pub struct Atr {
    config: AtrConfig,
    period_reciprocal: f64,
    period_minus_one: f64,
    phase: AtrPhase,
    current: Option<Price>,
    cur_close: Option<Price>,
    prev_close: Option<Price>,
    last_open_time: Option<Timestamp>,
    bars_seen: usize,
}

impl Atr {
    /// Number of distinct bars (by `open_time`) fed so far. Repaints are not
    /// counted.
    #[inline]
    #[must_use]
    pub fn bars_seen(&self) -> usize {
        self.bars_seen
    }
}

impl Indicator for Atr {
    type Config = AtrConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            #[allow(clippy::cast_precision_loss)]
            period_reciprocal: 1.0 / config.period as f64,
            #[allow(clippy::cast_precision_loss)]
            period_minus_one: (config.period - 1) as f64,
            phase: AtrPhase::Seeding {
                committed: 0.0,
                sum: 0.0,
            },
            current: None,
            cur_close: None,
            prev_close: None,
            last_open_time: None,
            bars_seen: 0,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t <= ohlcv.open_time()),
            "open_time must be non-decreasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );

        if self.last_open_time.is_none_or(|t| t < ohlcv.open_time()) {
            self.prev_close = self.cur_close;
            self.last_open_time = Some(ohlcv.open_time());
            self.bars_seen += 1;

            self.phase = match (self.current, self.phase) {
                (Some(previous), _) => AtrPhase::Smoothing { previous },
                (None, AtrPhase::Seeding { sum, .. }) => AtrPhase::Seeding {
                    committed: sum,
                    sum,
                },
                (None, smoothing) => smoothing,
            };
        }

        let tr = true_range(ohlcv, self.prev_close);

        self.current = match &mut self.phase {
            AtrPhase::Seeding { committed, sum } => {
                *sum = *committed + tr;
                (self.bars_seen == self.config.period).then_some(*sum * self.period_reciprocal)
            }
            AtrPhase::Smoothing { previous } => {
                Some(previous.mul_add(self.period_minus_one, tr) * self.period_reciprocal)
            }
        };
        self.cur_close = Some(ohlcv.close());

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({})", self.config.period)
    }
}
