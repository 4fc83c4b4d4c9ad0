//! Thresholds and wick/body comparisons shared by the detectors.

// ============================================================
// STAR / HAMMER THRESHOLDS
// ============================================================

/// Dominant wick must exceed `body * WICK_BODY_RATIO`
pub const WICK_BODY_RATIO: f64 = 2.0;
/// Opposite wick must stay below `dominant_wick * OPPOSITE_WICK_FACTOR`
pub const OPPOSITE_WICK_FACTOR: f64 = 0.2;
/// Smallest body (after flooring) that counts as a real candle body
pub const MIN_BODY: f64 = 0.0001;
/// Numeric floor for the body before dividing by it.
/// Independent of [`MIN_BODY`]; keeps doji ratios finite.
pub const BODY_FLOOR: f64 = 0.000001;

// ============================================================
// THREE-LINE STRIKE
// ============================================================

/// Candles in a three-line strike window: three momentum candles plus the strike
pub const STRIKE_WINDOW: usize = 4;

// ============================================================
// HELPER FUNCTIONS
// ============================================================

/// Body clamped from below to `floor`.
/// A NaN body also yields `floor`.
#[inline]
pub fn floored_body(body: f64, floor: f64) -> f64 {
    body.max(floor)
}

/// Wick length in units of (floored) body
#[inline]
pub fn wick_ratio(wick: f64, body: f64) -> f64 {
    wick / body
}

/// True when `wick` dominates the candle: longer than `ratio` bodies and
/// more than `1 / factor` times the opposite wick.
#[inline]
pub fn is_dominant_wick(wick: f64, opposite: f64, body: f64, ratio: f64, factor: f64) -> bool {
    wick_ratio(wick, body) > ratio && opposite < factor * wick
}
