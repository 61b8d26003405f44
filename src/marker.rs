use std::{collections::BTreeMap, fmt::Display};

use crate::{Color, Placement, Price, Signal, Timestamp};

/// Stable identifier of a diamond marker.
///
/// Derived from the bar index and the signal direction, so re-evaluating the
/// same bar addresses the same marker instead of adding another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId {
    bar_index: Timestamp,
    placement: Placement,
}

impl MarkerId {
    /// Id for the marker `signal` would draw on `bar_index`, or `None` for
    /// [`Signal::None`].
    #[must_use]
    pub fn for_signal(signal: Signal, bar_index: Timestamp) -> Option<Self> {
        signal.placement().map(|placement| Self {
            bar_index,
            placement,
        })
    }

    #[inline]
    #[must_use]
    pub fn bar_index(&self) -> Timestamp {
        self.bar_index
    }

    #[inline]
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }
}

impl Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.placement {
            Placement::Above => "ShortSignal",
            Placement::Below => "LongSignal",
        };
        write!(f, "{prefix}{}", self.bar_index)
    }
}

/// Request to draw a diamond at `price` on bar `bar_index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondMarker {
    pub id: MarkerId,
    pub bar_index: Timestamp,
    pub price: Price,
    pub color: Color,
    pub placement: Placement,
}

/// Receiver of marker draw requests, implemented by the host's drawing
/// layer.
///
/// `place` must replace any marker already stored under the same id.
pub trait MarkerSink {
    fn place(&mut self, marker: DiamondMarker);

    fn remove(&mut self, id: MarkerId);
}

impl<S: MarkerSink + ?Sized> MarkerSink for &mut S {
    fn place(&mut self, marker: DiamondMarker) {
        (**self).place(marker);
    }

    fn remove(&mut self, id: MarkerId) {
        (**self).remove(id);
    }
}

/// In-memory [`MarkerSink`] keyed by [`MarkerId`], ordered by bar.
#[derive(Debug, Clone, Default)]
pub struct MarkerBook {
    markers: BTreeMap<MarkerId, DiamondMarker>,
}

impl MarkerBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&DiamondMarker> {
        self.markers.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> impl Iterator<Item = &DiamondMarker> {
        self.markers.values()
    }
}

impl MarkerSink for MarkerBook {
    fn place(&mut self, marker: DiamondMarker) {
        self.markers.insert(marker.id, marker);
    }

    fn remove(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }
}
