//! Streaming ATR bands with breach signals for Rust.
//!
//! [`Atr`] maintains a Wilder-smoothed average true range. [`AtrBands`]
//! places bands `offset × ATR` around each bar's close, classifies the bar
//! as [`Signal::Short`], [`Signal::Long`], or [`Signal::None`], and decides
//! whether the bar should be painted. [`Overlay`] adapts the result for a
//! charting host: it resolves colors and sends diamond markers to a
//! [`MarkerSink`].
//!
//! Indicators accept any type implementing [`Ohlcv`] and return typed
//! results. Values are `None` until enough data has been received.
//!
//! Each indicator type ([`Atr`], [`AtrBands`]) exposes
//! [`new`](Atr::new), [`compute`](Atr::compute), and
//! [`value`](Atr::value) as inherent methods, no trait import
//! needed. Import [`Indicator`] only for generic code.

mod atr;
mod atr_bands;
mod color;
mod error;
mod indicator;
mod marker;
mod multiplier;
mod ohlcv;
mod overlay;
mod signal;
mod true_range;

pub use crate::error::ConfigError;
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::multiplier::Multiplier;
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::signal::{Diamond, Placement, Signal};

pub use crate::atr::{Atr, AtrConfig, AtrConfigBuilder};
pub use crate::atr_bands::{AtrBands, AtrBandsConfig, AtrBandsConfigBuilder, AtrBandsValue};

pub use crate::color::Color;
pub use crate::marker::{DiamondMarker, MarkerBook, MarkerId, MarkerSink};
pub use crate::overlay::{Overlay, OverlayFrame, OverlayStyle};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Atr, AtrConfig, Price);
impl_indicator_methods!(AtrBands, AtrBandsConfig, AtrBandsValue);

#[cfg(test)]
mod test_util;
