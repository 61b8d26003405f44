use crate::{Ohlcv, Price};

/// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
///
/// On the first bar (no previous close), falls back to `high - low`.
#[inline]
pub(crate) fn true_range(ohlcv: &impl Ohlcv, prev_close: Option<Price>) -> Price {
    let hl = ohlcv.high() - ohlcv.low();

    match prev_close {
        Some(prev_close) => {
            let hc = (ohlcv.high() - prev_close).abs();
            let lc = (ohlcv.low() - prev_close).abs();
            hl.max(hc).max(lc)
        }
        None => hl,
    }
}
