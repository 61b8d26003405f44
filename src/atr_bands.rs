use std::{fmt::Display, num::NonZero};

use crate::{
    Atr, AtrConfig, ConfigError, Diamond, Indicator, IndicatorConfig, IndicatorConfigBuilder,
    Multiplier, Ohlcv, Placement, Price, Signal, Timestamp, ohlcv::is_well_formed,
};

const DEFAULT_PERIOD: NonZero<usize> = NonZero::new(60).unwrap();
const DEFAULT_OFFSET: Multiplier = Multiplier::from_const(2.0);
const DEFAULT_SIGNAL_OFFSET_TICKS: Multiplier = Multiplier::from_const(20.0);

/// Configuration for the ATR Bands ([`AtrBands`]) indicator.
///
/// # Warm-up
///
/// Bands are anchored on the ATR of the bars *before* the evaluated one, so
/// the first value is produced on bar `period + 1`.
///
/// # Example
///
/// ```
/// use atr_bands::{AtrBandsConfig, IndicatorConfig, IndicatorConfigBuilder};
/// use std::num::NonZero;
///
/// // Defaults: offset 2.0, bands shown, painting and diamonds enabled,
/// // 20 ticks marker offset on both sides
/// let config = AtrBandsConfig::builder()
///     .period(NonZero::new(14).unwrap())
///     .offset(1.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.period(), 14);
/// assert!(config.show_bands());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AtrBandsConfig {
    period: NonZero<usize>,
    offset: Multiplier,
    show_bands: bool,
    enable_bar_painting: bool,
    show_diamond_signal: bool,
    short_signal_offset_ticks: Multiplier,
    long_signal_offset_ticks: Multiplier,
}

impl IndicatorConfig for AtrBandsConfig {
    type Builder = AtrBandsConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        AtrBandsConfigBuilder::new()
    }

    #[inline]
    fn period(&self) -> usize {
        self.period.get()
    }
}

impl AtrBandsConfig {
    /// Band distance from the close, in ATR multiples.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Multiplier {
        self.offset
    }

    /// When `false`, reported bands are NaN. Signals and bar painting are
    /// still evaluated against the computed bands.
    #[inline]
    #[must_use]
    pub fn show_bands(&self) -> bool {
        self.show_bands
    }

    #[inline]
    #[must_use]
    pub fn enable_bar_painting(&self) -> bool {
        self.enable_bar_painting
    }

    /// When `false`, no signal or diamond is produced.
    #[inline]
    #[must_use]
    pub fn show_diamond_signal(&self) -> bool {
        self.show_diamond_signal
    }

    /// Distance of the short diamond above the high, in ticks.
    #[inline]
    #[must_use]
    pub fn short_signal_offset_ticks(&self) -> Multiplier {
        self.short_signal_offset_ticks
    }

    /// Distance of the long diamond below the low, in ticks.
    #[inline]
    #[must_use]
    pub fn long_signal_offset_ticks(&self) -> Multiplier {
        self.long_signal_offset_ticks
    }

    /// ATR Bands(60, 2.0) with every output enabled.
    #[must_use]
    pub fn default_60() -> Self {
        Self::new(DEFAULT_PERIOD)
    }

    /// ATR Bands with custom period and default everything else.
    #[must_use]
    pub fn new(period: NonZero<usize>) -> Self {
        Self {
            period,
            offset: DEFAULT_OFFSET,
            show_bands: true,
            enable_bar_painting: true,
            show_diamond_signal: true,
            short_signal_offset_ticks: DEFAULT_SIGNAL_OFFSET_TICKS,
            long_signal_offset_ticks: DEFAULT_SIGNAL_OFFSET_TICKS,
        }
    }
}

impl Display for AtrBandsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AtrBandsConfig({}, {})", self.period, self.offset)
    }
}

/// Builder for [`AtrBandsConfig`].
///
/// Defaults: offset = `2.0`, all outputs enabled, signal offsets = `20`
/// ticks. Period must be set before calling
/// [`build`](IndicatorConfigBuilder::build); multipliers are validated there.
pub struct AtrBandsConfigBuilder {
    period: Option<NonZero<usize>>,
    offset: f64,
    show_bands: bool,
    enable_bar_painting: bool,
    show_diamond_signal: bool,
    short_signal_offset_ticks: f64,
    long_signal_offset_ticks: f64,
}

impl AtrBandsConfigBuilder {
    fn new() -> Self {
        Self {
            period: None,
            offset: DEFAULT_OFFSET.value(),
            show_bands: true,
            enable_bar_painting: true,
            show_diamond_signal: true,
            short_signal_offset_ticks: DEFAULT_SIGNAL_OFFSET_TICKS.value(),
            long_signal_offset_ticks: DEFAULT_SIGNAL_OFFSET_TICKS.value(),
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    #[must_use]
    pub fn show_bands(mut self, show: bool) -> Self {
        self.show_bands = show;
        self
    }

    #[inline]
    #[must_use]
    pub fn enable_bar_painting(mut self, enable: bool) -> Self {
        self.enable_bar_painting = enable;
        self
    }

    #[inline]
    #[must_use]
    pub fn show_diamond_signal(mut self, show: bool) -> Self {
        self.show_diamond_signal = show;
        self
    }

    #[inline]
    #[must_use]
    pub fn short_signal_offset_ticks(mut self, ticks: f64) -> Self {
        self.short_signal_offset_ticks = ticks;
        self
    }

    #[inline]
    #[must_use]
    pub fn long_signal_offset_ticks(mut self, ticks: f64) -> Self {
        self.long_signal_offset_ticks = ticks;
        self
    }
}

impl IndicatorConfigBuilder<AtrBandsConfig> for AtrBandsConfigBuilder {
    #[inline]
    fn period(mut self, period: NonZero<usize>) -> Self {
        self.period = Some(period);
        self
    }

    fn build(self) -> Result<AtrBandsConfig, ConfigError> {
        Ok(AtrBandsConfig {
            period: self.period.ok_or(ConfigError::MissingPeriod)?,
            offset: Multiplier::named("offset", self.offset)?,
            show_bands: self.show_bands,
            enable_bar_painting: self.enable_bar_painting,
            show_diamond_signal: self.show_diamond_signal,
            short_signal_offset_ticks: Multiplier::named(
                "short_signal_offset_ticks",
                self.short_signal_offset_ticks,
            )?,
            long_signal_offset_ticks: Multiplier::named(
                "long_signal_offset_ticks",
                self.long_signal_offset_ticks,
            )?,
        })
    }
}

/// ATR Bands output for one bar.
///
/// ```text
/// upper = close + offset × ATR
/// lower = close − offset × ATR
/// ```
///
/// `upper` and `lower` are NaN when bands are hidden by config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtrBandsValue {
    upper: Price,
    lower: Price,
    atr: Price,
    signal: Signal,
    paint_bar: bool,
    diamond: Option<Diamond>,
}

impl AtrBandsValue {
    /// Upper band, or NaN when bands are hidden.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Lower band, or NaN when bands are hidden.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// ATR the bands were derived from (as of the previous bar).
    #[inline]
    #[must_use]
    pub fn atr(&self) -> Price {
        self.atr
    }

    #[inline]
    #[must_use]
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// `true` when the bar touched or crossed a band and painting is
    /// enabled. Inclusive comparison, unlike the strict diamond test.
    #[inline]
    #[must_use]
    pub fn paint_bar(&self) -> bool {
        self.paint_bar
    }

    #[inline]
    #[must_use]
    pub fn diamond(&self) -> Option<Diamond> {
        self.diamond
    }
}

impl Display for AtrBandsValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ATRB(u: {}, l: {}, {}{})",
            self.upper,
            self.lower,
            self.signal,
            if self.paint_bar { ", painted" } else { "" }
        )
    }
}

/// ATR Bands: volatility envelope around the close with breach signals.
///
/// Each bar is classified against bands placed `offset × ATR` above and
/// below its close, where ATR is the Wilder [`Atr`] of the preceding bars:
///
/// - `high > upper` → [`Signal::Short`], diamond `short_signal_offset_ticks`
///   ticks above the high;
/// - else `low < lower` → [`Signal::Long`], diamond
///   `long_signal_offset_ticks` ticks below the low;
/// - bar painting uses the inclusive test `high >= upper || low <= lower`.
///
/// Returns `None` while warming up (the first `period` bars). Bars with
/// non-finite prices, `high < low`, or a non-positive tick size are skipped
/// with a warning and leave the state untouched.
///
/// Supports live repainting: feeding a bar with the same `open_time`
/// re-evaluates it against the same ATR.
///
/// # Example
///
/// ```
/// use atr_bands::{AtrBands, AtrBandsConfig, IndicatorConfig, IndicatorConfigBuilder, Signal};
/// use std::num::NonZero;
/// # use atr_bands::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.1 }
/// #     fn low(&self) -> Price { self.2 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.3 }
/// #     fn tick_size(&self) -> Price { 0.25 }
/// # }
///
/// let config = AtrBandsConfig::builder()
///     .period(NonZero::new(2).unwrap())
///     .offset(1.0)
///     .build()
///     .unwrap();
/// let mut bands = AtrBands::new(config);
///
/// // (close, high, low, time)
/// assert!(bands.compute(&Bar(100.0, 101.0, 99.0, 1)).is_none());
/// assert!(bands.compute(&Bar(102.0, 103.0, 101.0, 2)).is_none());
///
/// // ATR after two bars = 2.5 → upper = 107.5, high 108 breaches it
/// let value = bands.compute(&Bar(105.0, 108.0, 95.0, 3)).unwrap();
/// assert_eq!(value.upper(), 107.5);
/// assert_eq!(value.signal(), Signal::Short);
/// assert!(value.paint_bar());
/// ```
#[derive(Clone, Debug)]
pub struct AtrBands {
    config: AtrBandsConfig,
    offset: f64,
    short_offset_ticks: f64,
    long_offset_ticks: f64,
    atr: Atr,
    /// ATR through the previous bar. Fixed while the current bar repaints.
    anchor_atr: Option<Price>,
    last_open_time: Option<Timestamp>,
    current: Option<AtrBandsValue>,
}

impl AtrBands {
    /// `true` once the warm-up is over and every new bar yields a value.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor_atr.is_some()
    }

    /// Number of distinct bars accepted so far.
    #[inline]
    #[must_use]
    pub fn bars_seen(&self) -> usize {
        self.atr.bars_seen()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AtrBandsConfig {
        &self.config
    }

    fn evaluate(&self, ohlcv: &impl Ohlcv, atr: Price) -> AtrBandsValue {
        let width = self.offset * atr;
        let upper = ohlcv.close() + width;
        let lower = ohlcv.close() - width;
        let (high, low) = (ohlcv.high(), ohlcv.low());

        let (signal, diamond) = if !self.config.show_diamond_signal {
            (Signal::None, None)
        } else if high > upper {
            let price = high + ohlcv.tick_size() * self.short_offset_ticks;
            (
                Signal::Short,
                Some(Diamond {
                    price,
                    placement: Placement::Above,
                }),
            )
        } else if low < lower {
            let price = low - ohlcv.tick_size() * self.long_offset_ticks;
            (
                Signal::Long,
                Some(Diamond {
                    price,
                    placement: Placement::Below,
                }),
            )
        } else {
            (Signal::None, None)
        };

        let paint_bar = self.config.enable_bar_painting && (high >= upper || low <= lower);

        let (upper, lower) = if self.config.show_bands {
            (upper, lower)
        } else {
            (f64::NAN, f64::NAN)
        };

        AtrBandsValue {
            upper,
            lower,
            atr,
            signal,
            paint_bar,
            diamond,
        }
    }
}

impl Indicator for AtrBands {
    type Config = AtrBandsConfig;
    type Output = AtrBandsValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            offset: config.offset.value(),
            short_offset_ticks: config.short_signal_offset_ticks.value(),
            long_offset_ticks: config.long_signal_offset_ticks.value(),
            atr: Atr::new(AtrConfig::new(config.period)),
            anchor_atr: None,
            last_open_time: None,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        if !is_well_formed(ohlcv) {
            tracing::warn!(
                open_time = ohlcv.open_time(),
                high = ohlcv.high(),
                low = ohlcv.low(),
                close = ohlcv.close(),
                tick_size = ohlcv.tick_size(),
                "skipping malformed bar"
            );
            return None;
        }

        debug_assert!(
            self.last_open_time.is_none_or(|t| t <= ohlcv.open_time()),
            "open_time must be non-decreasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );

        if self.last_open_time.is_none_or(|t| t < ohlcv.open_time()) {
            let was_active = self.is_active();
            self.anchor_atr = self.atr.value();
            self.last_open_time = Some(ohlcv.open_time());

            if !was_active && self.is_active() {
                tracing::debug!(
                    indicator = %self,
                    open_time = ohlcv.open_time(),
                    "warm-up complete"
                );
            }
        }

        self.atr.compute(ohlcv);
        self.current = self.anchor_atr.map(|atr| self.evaluate(ohlcv, atr));

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for AtrBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATRB({}, {})", self.config.period, self.offset)
    }
}
