//! # candlesig - candlestick signal classifier
//!
//! Stateless classification of short OHLC candle windows into trading signals.
//!
//! ## Quick Start
//!
//! ```rust
//! use candlesig::prelude::*;
//!
//! // Hammer: small bullish body near the high, long lower wick
//! let candle = Candle::new(1.0000, 1.0006, 0.9950, 1.0005);
//! assert_eq!(detect_star(&candle), ShapeSignal::Buy);
//! assert_eq!(detect_star(&candle).code(), 2);
//!
//! // Three falling candles, then a rising candle that outgrows the third body
//! let window = [
//!     Candle::new(10.0, 10.2, 8.8, 9.0),
//!     Candle::new(9.0, 9.1, 7.9, 8.0),
//!     Candle::new(8.0, 8.1, 6.9, 7.0),
//!     Candle::new(7.0, 10.5, 6.9, 10.2),
//! ];
//! assert_eq!(detect_three_line_strike(&window), DirectionSignal::Buy);
//! assert_eq!(candle_direction(&window[..1]).code(), -1);
//! ```

pub mod detectors;
pub mod params;

pub mod prelude {
    pub use crate::{
        // Detectors
        detectors::*,
        // Parameters
        params::{get_param, ParamMeta, ParamType, ParameterizedDetector},
        // Parallel
        scan_parallel,
        validate_window,
        // Types
        Candle,
        DirectionSignal,
        OHLCExt,
        // Errors
        PatternError,
        PatternId,
        Result,
        ScanError,
        ScanResult,
        ShapeSignal,
        // Core traits
        WindowDetector,
        OHLC,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors raised by configuration and data validation.
///
/// Detectors themselves never fail; every well-typed window classifies.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid OHLC at index {index}: {reason}")]
    InvalidOHLC { index: usize, reason: &'static str },
}

// ============================================================
// OHLC TRAITS
// ============================================================

/// Core OHLC row accessor
pub trait OHLC {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
}

impl<T: OHLC + ?Sized> OHLC for &T {
    fn open(&self) -> f64 {
        (**self).open()
    }

    fn high(&self) -> f64 {
        (**self).high()
    }

    fn low(&self) -> f64 {
        (**self).low()
    }

    fn close(&self) -> f64 {
        (**self).close()
    }
}

/// Extension trait with computed properties for OHLC data
pub trait OHLCExt: OHLC {
    /// `close - open`; positive for a rising candle
    #[inline]
    fn signed_body(&self) -> f64 {
        self.close() - self.open()
    }

    #[inline]
    fn body(&self) -> f64 {
        self.signed_body().abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn upper_wick(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    #[inline]
    fn lower_wick(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Exact `open == close`, no epsilon
    #[inline]
    fn is_doji(&self) -> bool {
        self.signed_body() == 0.0
    }

    /// Sign of the body: rising `Buy`, falling `Sell`, doji (or NaN) `None`.
    ///
    /// A NaN body deliberately reports `None` rather than copying the sign
    /// bit of the NaN into `Buy`/`Sell`, so a corrupt row never emits a signal.
    #[inline]
    fn direction(&self) -> DirectionSignal {
        let body = self.signed_body();
        if body > 0.0 {
            DirectionSignal::Buy
        } else if body < 0.0 {
            DirectionSignal::Sell
        } else {
            DirectionSignal::None
        }
    }

    /// Validate OHLC data consistency
    fn validate(&self) -> Result<()> {
        let values = [self.open(), self.high(), self.low(), self.close()];
        if values.iter().any(|v| v.is_nan()) {
            return Err(PatternError::InvalidOHLC {
                index: 0,
                reason: "NaN in OHLC",
            });
        }
        if values.iter().any(|v| v.is_infinite()) {
            return Err(PatternError::InvalidOHLC {
                index: 0,
                reason: "Infinite value in OHLC",
            });
        }
        if self.high() < self.low() {
            return Err(PatternError::InvalidOHLC {
                index: 0,
                reason: "high < low",
            });
        }
        if self.high() < self.open().max(self.close()) {
            return Err(PatternError::InvalidOHLC {
                index: 0,
                reason: "high below body",
            });
        }
        if self.low() > self.open().min(self.close()) {
            return Err(PatternError::InvalidOHLC {
                index: 0,
                reason: "low above body",
            });
        }
        Ok(())
    }
}

impl<T: OHLC + ?Sized> OHLCExt for T {}

/// Validate every candle of a window, reporting the offending index.
pub fn validate_window<T: OHLC>(window: &[T]) -> Result<()> {
    for (i, candle) in window.iter().enumerate() {
        candle.validate().map_err(|e| match e {
            PatternError::InvalidOHLC { reason, .. } => PatternError::InvalidOHLC { index: i, reason },
            other => other,
        })?;
    }
    Ok(())
}

// ============================================================
// CANDLE
// ============================================================

/// One OHLC observation.
///
/// Serialized with the tabular column names `Open`, `High`, `Low`, `Close`;
/// lowercase names are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    #[serde(rename = "Open", alias = "open")]
    pub open: f64,
    #[serde(rename = "High", alias = "high")]
    pub high: f64,
    #[serde(rename = "Low", alias = "low")]
    pub low: f64,
    #[serde(rename = "Close", alias = "close")]
    pub close: f64,
}

impl Candle {
    /// Unchecked constructor; detectors accept inconsistent candles as-is.
    pub const fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Constructor that rejects NaN/infinite prices and wicks inverted around the body.
    pub fn try_new(open: f64, high: f64, low: f64, close: f64) -> Result<Self> {
        let candle = Self::new(open, high, low, close);
        candle.validate()?;
        Ok(candle)
    }
}

impl OHLC for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

// ============================================================
// SIGNALS
// ============================================================

/// Star/hammer output codes: `NONE = 0`, `SELL = 1`, `BUY = 2`.
///
/// Deliberately separate from [`DirectionSignal`], which numbers the same
/// actions differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeSignal {
    #[default]
    None,
    Sell,
    Buy,
}

impl ShapeSignal {
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Sell => 1,
            Self::Buy => 2,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Sell),
            2 => Some(Self::Buy),
            _ => None,
        }
    }

    #[inline]
    pub fn is_signal(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Direction and three-line-strike output codes: `SELL = -1`, `NONE = 0`, `BUY = 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DirectionSignal {
    Sell,
    #[default]
    None,
    Buy,
}

impl DirectionSignal {
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::Sell => -1,
            Self::None => 0,
            Self::Buy => 1,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Sell),
            0 => Some(Self::None),
            1 => Some(Self::Buy),
            _ => None,
        }
    }

    #[inline]
    pub fn is_signal(self) -> bool {
        !matches!(self, Self::None)
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Sell => Self::Buy,
            Self::None => Self::None,
            Self::Buy => Self::Sell,
        }
    }
}

macro_rules! impl_signal_traits {
    ($($signal:ident),* $(,)?) => {
        $(
            impl std::fmt::Display for $signal {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(match self {
                        Self::None => "NONE",
                        Self::Sell => "SELL",
                        Self::Buy => "BUY",
                    })
                }
            }

            impl serde::Serialize for $signal {
                fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                    s.serialize_i32(self.code())
                }
            }

            impl<'de> serde::Deserialize<'de> for $signal {
                fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
                    let code = <i32 as serde::Deserialize>::deserialize(d)?;
                    $signal::from_code(code).ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "invalid {} code {code}",
                            stringify!($signal)
                        ))
                    })
                }
            }
        )*
    };
}

impl_signal_traits!(ShapeSignal, DirectionSignal);

// ============================================================
// DETECTOR TRAIT
// ============================================================

/// Unique identifier for a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternId(pub &'static str);

impl PatternId {
    /// Returns the string identifier
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// A pure classifier over one candle window.
///
/// `detect` is total: windows of the wrong length yield the signal's default
/// (no pattern), never an error.
pub trait WindowDetector: Send + Sync {
    type Signal: Copy + Default + Send;

    fn id(&self) -> PatternId;

    /// Number of candles the detector reads.
    fn window_len(&self) -> usize;

    fn detect<T: OHLC>(&self, window: &[T]) -> Self::Signal;

    fn validate_config(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================
// PARALLEL SCANNING
// ============================================================

use rayon::prelude::*;

/// Signal for a single instrument's window
#[derive(Debug)]
pub struct ScanResult<S> {
    pub symbol: String,
    pub signal: S,
}

/// Error from validating a single instrument's window
#[derive(Debug)]
pub struct ScanError {
    pub symbol: String,
    pub error: PatternError,
}

/// Classify the current window of many instruments in parallel.
///
/// Each window is classified exactly once and independently. Results keep
/// the input order. With `validate_data`, windows containing an inconsistent
/// candle are reported in the error list instead of being classified.
pub fn scan_parallel<'a, T, I, D>(
    detector: &D,
    instruments: I,
    validate_data: bool,
) -> (Vec<ScanResult<D::Signal>>, Vec<ScanError>)
where
    T: OHLC + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
    D: WindowDetector,
{
    let results: Vec<_> = instruments
        .into_par_iter()
        .map(|(symbol, window)| -> std::result::Result<_, ScanError> {
            if validate_data {
                if let Err(error) = validate_window(window) {
                    tracing::warn!(symbol, %error, "instrument rejected by data validation");
                    return Err(ScanError {
                        symbol: symbol.to_string(),
                        error,
                    });
                }
            }
            Ok(ScanResult {
                symbol: symbol.to_string(),
                signal: detector.detect(window),
            })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    tracing::debug!(
        detector = detector.id().as_str(),
        classified = successes.len(),
        rejected = errors.len(),
        "parallel scan finished"
    );

    (successes, errors)
}

// ============================================================
// TESTS
// ============================================================
