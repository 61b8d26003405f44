use std::fmt::Display;

use crate::Price;

/// Band breach classification of a single bar.
///
/// At most one direction is produced per bar. When a bar breaches both
/// bands, [`Signal::Short`] wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    /// No breach, or diamond signals are disabled.
    #[default]
    None,
    /// Low pierced the lower band.
    Long,
    /// High pierced the upper band.
    Short,
}

impl Signal {
    /// Numeric series value: `-1` short, `0` none, `+1` long.
    #[inline]
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::None => 0,
            Self::Long => 1,
            Self::Short => -1,
        }
    }

    /// Where the marker for this signal is drawn, or `None` for
    /// [`Signal::None`].
    #[inline]
    #[must_use]
    pub fn placement(self) -> Option<Placement> {
        match self {
            Self::None => None,
            Self::Long => Some(Placement::Below),
            Self::Short => Some(Placement::Above),
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Side of the bar a diamond marker is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placement {
    Above,
    Below,
}

/// Diamond marker position for a breaching bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diamond {
    pub(crate) price: Price,
    pub(crate) placement: Placement,
}

impl Diamond {
    /// Marker price, offset from the bar extreme by the configured ticks.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }
}
