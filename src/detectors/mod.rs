//! Candlestick signal detectors
//!
//! # Detectors
//!
//! - **Direction**: rising / falling / doji classification of one candle.
//! - **Star / hammer**: single-candle reversal shapes by wick-to-body ratio.
//! - **Three-line strike**: three candles in one direction, then a larger reversal candle.
//!
//! Each detector is exposed both as a free function using the default
//! thresholds and as a small config struct implementing [`crate::WindowDetector`].

pub mod helpers;

/// Generate `with_defaults()` -> `Self::default()` for multiple detector types.
macro_rules! impl_with_defaults {
  ($($detector:ty),* $(,)?) => {
    $(impl $detector {
      pub fn with_defaults() -> Self { Self::default() }
    })*
  };
}

pub mod direction;
pub mod star;
pub mod three_line;

// Re-export all detectors for convenience
pub use direction::*;
pub use helpers::*;
pub use star::*;
pub use three_line::*;
