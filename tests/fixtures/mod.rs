#![allow(dead_code)]

use atr_bands::{AtrBandsValue, Ohlcv, Price, Signal, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// Tick size of the instrument in the reference data.
pub const TICK_SIZE: f64 = 0.01;

/// OHLCV bar parsed from the reference CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    fn tick_size(&self) -> Price {
        TICK_SIZE
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    pub expected: f64,
}

/// Reference ATR bands row. `signal` uses the numeric series encoding
/// (`-1` short, `0` none, `+1` long); `diamond` is empty without a signal.
#[derive(Debug, Deserialize)]
pub struct RefBandsValue {
    pub open_time: u64,
    pub upper: f64,
    pub lower: f64,
    pub atr: f64,
    pub signal: i8,
    pub paint: u8,
    pub diamond: Option<f64>,
}

const OHLCV_PATH: &str = "tests/fixtures/data/synthetic-1h.csv";

/// Load reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load single-value reference data (ATR).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load ATR bands reference data.
pub fn load_bands_ref(path: &str) -> Vec<RefBandsValue> {
    load_records(path, "invalid ATR bands reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert a computed bands value matches a reference row.
pub fn assert_bands_match(value: &AtrBandsValue, reference: &RefBandsValue, tolerance: f64, ctx: &str) {
    assert_near(value.upper(), reference.upper, tolerance, &format!("{ctx} upper"));
    assert_near(value.lower(), reference.lower, tolerance, &format!("{ctx} lower"));
    assert_near(value.atr(), reference.atr, tolerance, &format!("{ctx} atr"));
    assert_eq!(value.signal().as_i8(), reference.signal, "{ctx} signal");
    assert_eq!(value.paint_bar(), reference.paint == 1, "{ctx} paint");

    match (value.diamond(), reference.diamond) {
        (None, None) => {}
        (Some(d), Some(expected)) => {
            assert_near(d.price(), expected, tolerance, &format!("{ctx} diamond"));
        }
        (d, expected) => panic!("{ctx} diamond mismatch: got {d:?}, expected {expected:?}"),
    }
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (with shifted close/high/low) followed
/// by the original bar. All share the same `open_time`.
pub fn repaint_sequence(bar: &RefBar) -> Vec<RefBar> {
    let t = bar.open_time;
    vec![
        // First tick: only open is known, close near open
        RefBar {
            open: bar.open,
            high: bar.open * 1.001,
            low: bar.open * 0.999,
            close: bar.open * 1.0005,
            open_time: t,
        },
        // Mid-bar: partial movement toward final values
        RefBar {
            open: bar.open,
            high: bar.open.midpoint(bar.high),
            low: bar.open.midpoint(bar.low),
            close: bar.open.midpoint(bar.close),
            open_time: t,
        },
        // Final: real OHLCV values
        RefBar {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            open_time: t,
        },
    ]
}

pub fn assert_values_match(
    bar_idx: usize,
    closed: Option<f64>,
    repainted: Option<f64>,
    tolerance: f64,
) {
    match (closed, repainted) {
        (None, None) => {} // both warming up, fine
        (Some(c), Some(r)) => {
            let diff = (c - r).abs();
            assert!(
                diff <= tolerance,
                "diverged at bar {bar_idx}: closed={c:.10}, repainted={r:.10}, diff={diff:.2e}"
            );
        }
        (c, r) => {
            panic!("warm-up mismatch at bar {bar_idx}: closed={c:?}, repainted={r:?}");
        }
    }
}

/// Counts of `(short, long, painted)` bars in a reference file.
pub fn signal_counts(reference: &[RefBandsValue]) -> (usize, usize, usize) {
    reference.iter().fold((0, 0, 0), |(s, l, p), r| {
        (
            s + usize::from(r.signal == Signal::Short.as_i8()),
            l + usize::from(r.signal == Signal::Long.as_i8()),
            p + usize::from(r.paint),
        )
    })
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
