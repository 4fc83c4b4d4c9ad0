//! Single-candle reversal shapes: shooting star (SELL) and hammer (BUY).
//!
//! ```text
//!   BUY      SELL
//!
//!    |        |
//!  |---|C     |
//!  |---|O     |
//!    |      O|---|
//!    |      C|---|
//!    |        |
//! ```
//!
//! A star/hammer has a small real body with one wick more than
//! `wick_body_ratio` bodies long and more than `1 / opposite_wick_factor`
//! times the opposite wick. The body must close against the signal: a
//! shooting star closes down, a hammer closes up.

use std::collections::HashMap;

use super::helpers::{self, floored_body, is_dominant_wick};
use crate::params::{check_known_params, get_param, ParamMeta, ParameterizedDetector};
use crate::{OHLCExt, PatternId, Result, ShapeSignal, WindowDetector, OHLC};

impl_with_defaults!(StarHammerDetector);

const WICK_BODY_RATIO_PARAM: ParamMeta = ParamMeta::factor(
    "wick_body_ratio",
    helpers::WICK_BODY_RATIO,
    (1.0, 5.0, 0.5),
    "Dominant wick must be longer than this many bodies",
);
const OPPOSITE_WICK_PARAM: ParamMeta = ParamMeta::ratio(
    "opposite_wick_factor",
    helpers::OPPOSITE_WICK_FACTOR,
    (0.0, 1.0, 0.05),
    "Opposite wick must be shorter than this fraction of the dominant wick",
);
const MIN_BODY_PARAM: ParamMeta = ParamMeta::price(
    "min_body",
    helpers::MIN_BODY,
    (0.0, 0.01, 0.0001),
    "Floored body must exceed this price distance",
);
const BODY_FLOOR_PARAM: ParamMeta = ParamMeta::price(
    "body_floor",
    helpers::BODY_FLOOR,
    (0.0000001, 0.00001, 0.0000001),
    "Lower clamp for the body before computing wick ratios",
);

const STAR_PARAMS: &[ParamMeta] = &[
    WICK_BODY_RATIO_PARAM,
    OPPOSITE_WICK_PARAM,
    MIN_BODY_PARAM,
    BODY_FLOOR_PARAM,
];

/// Shooting star / hammer detector
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StarHammerDetector {
    pub wick_body_ratio: f64,
    pub opposite_wick_factor: f64,
    pub min_body: f64,
    pub body_floor: f64,
}

impl Default for StarHammerDetector {
    fn default() -> Self {
        Self {
            wick_body_ratio: helpers::WICK_BODY_RATIO,
            opposite_wick_factor: helpers::OPPOSITE_WICK_FACTOR,
            min_body: helpers::MIN_BODY,
            body_floor: helpers::BODY_FLOOR,
        }
    }
}

impl StarHammerDetector {
    /// Classify one candle.
    ///
    /// Never fails: a zero body is clamped to `body_floor`, so degenerate
    /// and all-zero candles fall through to `ShapeSignal::None`.
    pub fn classify<T: OHLC + ?Sized>(&self, candle: &T) -> ShapeSignal {
        let upper = candle.upper_wick();
        let lower = candle.lower_wick();
        let body = floored_body(candle.body(), self.body_floor);

        // `min_body` is checked against the floored body
        let real_body = body > self.min_body;

        if real_body
            && candle.open() > candle.close()
            && is_dominant_wick(upper, lower, body, self.wick_body_ratio, self.opposite_wick_factor)
        {
            tracing::trace!(upper, lower, body, "shooting star");
            return ShapeSignal::Sell;
        }
        if real_body
            && candle.open() < candle.close()
            && is_dominant_wick(lower, upper, body, self.wick_body_ratio, self.opposite_wick_factor)
        {
            tracing::trace!(upper, lower, body, "hammer");
            return ShapeSignal::Buy;
        }

        ShapeSignal::None
    }
}

/// Classify one candle as shooting star (`Sell`), hammer (`Buy`) or neither,
/// using the default thresholds.
#[inline]
pub fn detect_star<T: OHLC + ?Sized>(candle: &T) -> ShapeSignal {
    StarHammerDetector::default().classify(candle)
}

impl WindowDetector for StarHammerDetector {
    type Signal = ShapeSignal;

    fn id(&self) -> PatternId {
        PatternId(Self::pattern_id_str())
    }

    fn window_len(&self) -> usize {
        1
    }

    /// Classifies the first candle; an empty window is `None`.
    fn detect<T: OHLC>(&self, window: &[T]) -> ShapeSignal {
        window
            .first()
            .map_or(ShapeSignal::None, |candle| self.classify(candle))
    }

    fn validate_config(&self) -> Result<()> {
        WICK_BODY_RATIO_PARAM.validate(self.wick_body_ratio)?;
        OPPOSITE_WICK_PARAM.validate(self.opposite_wick_factor)?;
        MIN_BODY_PARAM.validate(self.min_body)?;
        BODY_FLOOR_PARAM.validate(self.body_floor)
    }
}

impl ParameterizedDetector for StarHammerDetector {
    fn param_meta() -> &'static [ParamMeta] {
        STAR_PARAMS
    }

    fn with_params(params: &HashMap<&str, f64>) -> Result<Self> {
        check_known_params(params, STAR_PARAMS)?;
        Ok(Self {
            wick_body_ratio: get_param(params, &WICK_BODY_RATIO_PARAM)?,
            opposite_wick_factor: get_param(params, &OPPOSITE_WICK_PARAM)?,
            min_body: get_param(params, &MIN_BODY_PARAM)?,
            body_floor: get_param(params, &BODY_FLOOR_PARAM)?,
        })
    }

    fn pattern_id_str() -> &'static str {
        "STAR_HAMMER"
    }
}

// Missing fields take their defaults; the result is validated.
impl<'de> serde::Deserialize<'de> for StarHammerDetector {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(default, deny_unknown_fields)]
        struct Config {
            wick_body_ratio: f64,
            opposite_wick_factor: f64,
            min_body: f64,
            body_floor: f64,
        }

        impl Default for Config {
            fn default() -> Self {
                let defaults = StarHammerDetector::default();
                Self {
                    wick_body_ratio: defaults.wick_body_ratio,
                    opposite_wick_factor: defaults.opposite_wick_factor,
                    min_body: defaults.min_body,
                    body_floor: defaults.body_floor,
                }
            }
        }

        let config = Config::deserialize(d)?;
        let detector = Self {
            wick_body_ratio: config.wick_body_ratio,
            opposite_wick_factor: config.opposite_wick_factor,
            min_body: config.min_body,
            body_floor: config.body_floor,
        };
        detector
            .validate_config()
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(detector)
    }
}
