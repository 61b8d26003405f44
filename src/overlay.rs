use crate::{
    AtrBands, AtrBandsConfig, Color, DiamondMarker, MarkerId, MarkerSink, Ohlcv, Placement, Price,
    Signal, Timestamp,
};

/// Colors used by [`Overlay`] when resolving host-facing outputs.
///
/// Defaults: green upper band, red lower band, yellow volatility bars,
/// magenta diamonds on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayStyle {
    pub upper_band: Color,
    pub lower_band: Color,
    pub volatility_bar: Color,
    pub short_signal: Color,
    pub long_signal: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            upper_band: Color::GREEN,
            lower_band: Color::RED,
            volatility_bar: Color::YELLOW,
            short_signal: Color::MAGENTA,
            long_signal: Color::MAGENTA,
        }
    }
}

impl OverlayStyle {
    fn signal_color(&self, placement: Placement) -> Color {
        match placement {
            Placement::Above => self.short_signal,
            Placement::Below => self.long_signal,
        }
    }
}

/// Per-bar outputs for the host chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub bar_index: Timestamp,
    pub signal: Signal,
    /// Upper band plot value, NaN when suppressed.
    pub upper: Price,
    /// Lower band plot value, NaN when suppressed.
    pub lower: Price,
    pub upper_color: Color,
    pub lower_color: Color,
    /// Bar and candle outline override; `None` keeps the host default.
    pub bar_color: Option<Color>,
}

impl OverlayFrame {
    /// Signal as a plain numeric series value for strategy consumers.
    #[inline]
    #[must_use]
    pub fn signal_value(&self) -> i8 {
        self.signal.as_i8()
    }
}

/// Host adapter around [`AtrBands`].
///
/// Resolves colors from an [`OverlayStyle`] and forwards diamond markers to a
/// [`MarkerSink`]. Markers are addressed by [`MarkerId`], so a repainted bar
/// replaces its marker, and a repaint that changes or clears the signal
/// removes the stale one.
///
/// Use one overlay per instrument stream.
///
/// # Example
///
/// ```
/// use atr_bands::{AtrBandsConfig, MarkerBook, Overlay, OverlayStyle};
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
/// let config = AtrBandsConfig::new(NonZero::new(2).unwrap());
/// let mut overlay = Overlay::new(config, OverlayStyle::default(), MarkerBook::new());
///
/// overlay.on_bar(&Bar(100.0, 101.0, 99.0, 1));
/// overlay.on_bar(&Bar(102.0, 103.0, 101.0, 2));
///
/// // offset 2.0 × ATR 2.5 → upper 110, high 112 breaches it
/// let frame = overlay.on_bar(&Bar(105.0, 112.0, 104.0, 3)).unwrap();
/// assert_eq!(frame.signal_value(), -1);
/// assert_eq!(overlay.sink().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Overlay<S: MarkerSink> {
    bands: AtrBands,
    style: OverlayStyle,
    sink: S,
    /// Marker placed for the most recent bar, if any.
    last_marker: Option<MarkerId>,
}

impl<S: MarkerSink> Overlay<S> {
    #[must_use]
    pub fn new(config: AtrBandsConfig, style: OverlayStyle, sink: S) -> Self {
        Self {
            bands: AtrBands::new(config),
            style,
            sink,
            last_marker: None,
        }
    }

    /// Feeds a bar and returns the frame to render, or `None` while the
    /// bands warm up (and for skipped malformed bars).
    pub fn on_bar(&mut self, ohlcv: &impl Ohlcv) -> Option<OverlayFrame> {
        let value = self.bands.compute(ohlcv)?;
        let bar_index = ohlcv.open_time();
        let id = MarkerId::for_signal(value.signal(), bar_index);

        if let Some(stale) = self
            .last_marker
            .filter(|prev| prev.bar_index() == bar_index && Some(*prev) != id)
        {
            tracing::debug!(marker = %stale, "removing stale marker");
            self.sink.remove(stale);
        }

        self.last_marker = match (id, value.diamond()) {
            (Some(id), Some(diamond)) => {
                let marker = DiamondMarker {
                    id,
                    bar_index,
                    price: diamond.price(),
                    color: self.style.signal_color(diamond.placement()),
                    placement: diamond.placement(),
                };
                tracing::debug!(marker = %id, price = marker.price, "placing marker");
                self.sink.place(marker);
                Some(id)
            }
            _ => None,
        };

        let frame = OverlayFrame {
            bar_index,
            signal: value.signal(),
            upper: value.upper(),
            lower: value.lower(),
            upper_color: self.style.upper_band,
            lower_color: self.style.lower_band,
            bar_color: value.paint_bar().then_some(self.style.volatility_bar),
        };
        tracing::trace!(?frame, "frame");

        Some(frame)
    }

    #[inline]
    #[must_use]
    pub fn bands(&self) -> &AtrBands {
        &self.bands
    }

    #[inline]
    #[must_use]
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    #[inline]
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the overlay, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
