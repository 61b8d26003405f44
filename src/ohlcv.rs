/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Doubles as the bar index: marker ids are derived from it. Must be
/// non-decreasing between consecutive calls to [`Indicator::compute`].
///
/// [`Indicator::compute`]: crate::Indicator::compute
pub type Timestamp = u64;

/// OHLC bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Indicators accept `&impl Ohlcv`.
///
/// # Bar boundaries
///
/// Indicators detect new bars by comparing [`open_time`](Ohlcv::open_time)
/// values: same timestamp updates (repaints) the current bar, a new timestamp
/// advances the indicator.
///
/// # Example
///
/// ```
/// use atr_bands::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
///     fn tick_size(&self) -> Price { 0.25 }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp or sequence number.
    ///
    /// Used for bar boundary detection: consecutive calls with the same value
    /// repaint the current bar; a new value advances the indicator.
    ///
    /// Values must be non-decreasing between calls. Behaviour is undefined if
    /// `open_time` decreases.
    fn open_time(&self) -> Timestamp;

    /// Minimum price increment of the instrument. Must be positive.
    ///
    /// Signal markers are offset from the bar by a configured number of
    /// ticks.
    fn tick_size(&self) -> Price;
}

/// Returns `true` when the bar can be fed into band math without
/// producing NaNs or inverted ranges.
#[inline]
pub(crate) fn is_well_formed(ohlcv: &impl Ohlcv) -> bool {
    let (high, low) = (ohlcv.high(), ohlcv.low());
    let tick_size = ohlcv.tick_size();

    high.is_finite()
        && low.is_finite()
        && ohlcv.close().is_finite()
        && high >= low
        && tick_size.is_finite()
        && tick_size > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Bar;

    #[test]
    fn regular_bar_is_well_formed() {
        assert!(is_well_formed(&Bar::new(10.0, 12.0, 9.0, 11.0)));
    }

    #[test]
    fn flat_bar_is_well_formed() {
        assert!(is_well_formed(&Bar::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(!is_well_formed(&Bar::new(10.0, 9.0, 12.0, 11.0)));
    }

    #[test]
    fn nan_close_is_rejected() {
        assert!(!is_well_formed(&Bar::new(10.0, 12.0, 9.0, f64::NAN)));
    }

    #[test]
    fn infinite_high_is_rejected() {
        assert!(!is_well_formed(&Bar::new(10.0, f64::INFINITY, 9.0, 11.0)));
    }

    #[test]
    fn zero_tick_size_is_rejected() {
        assert!(!is_well_formed(
            &Bar::new(10.0, 12.0, 9.0, 11.0).with_tick_size(0.0)
        ));
    }
}
