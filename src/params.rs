//! Parameter metadata for signal detectors
//!
//! This module provides metadata about detector thresholds, enabling:
//! - Grid search over threshold values
//! - Parameter documentation
//! - Building detectors from loosely-typed configuration maps
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use candlesig::prelude::*;
//!
//! for param in StarHammerDetector::param_meta() {
//!     println!("{}: {:?} (default: {})", param.name, param.param_type, param.default);
//! }
//!
//! let mut params = HashMap::new();
//! params.insert("wick_body_ratio", 3.0);
//! let detector = StarHammerDetector::with_params(&params).unwrap();
//! assert_eq!(detector.wick_body_ratio, 3.0);
//! ```

use std::collections::HashMap;

use crate::{PatternError, Result};

// ============================================================
// PARAMETER TYPES
// ============================================================

/// Type of parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
  /// Multiplier compared against a candle measurement (e.g. wick / body > 2.0)
  Factor,
  /// Fraction in 0.0..=1.0
  Ratio,
  /// Absolute price distance
  Price,
}

/// Metadata for a single detector parameter
#[derive(Debug, Clone)]
pub struct ParamMeta {
  /// Parameter name (e.g., "wick_body_ratio")
  pub name: &'static str,
  pub param_type: ParamType,
  pub default: f64,
  /// Range for optimization: (min, max, step)
  pub range: (f64, f64, f64),
  pub description: &'static str,
}

impl ParamMeta {
  pub const fn factor(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type: ParamType::Factor, default, range, description }
  }

  pub const fn ratio(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type: ParamType::Ratio, default, range, description }
  }

  pub const fn price(
    name: &'static str,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type: ParamType::Price, default, range, description }
  }

  /// Generate all values for grid search
  ///
  /// A step that is not a positive finite number yields only `min`.
  pub fn generate_grid(&self) -> Vec<f64> {
    let (min, max, step) = self.range;
    if !(step > 0.0 && step.is_finite()) {
      return vec![min];
    }
    let mut values = Vec::new();
    let mut i = 0_u32;
    loop {
      let v = min + step * f64::from(i);
      if v > max + step * 1e-9 {
        break;
      }
      values.push(v.min(max));
      i += 1;
    }
    values
  }

  /// Validate a value for this parameter
  pub fn validate(&self, value: f64) -> Result<()> {
    if value.is_nan() || value.is_infinite() {
      return Err(PatternError::InvalidValue("Parameter cannot be NaN or infinite"));
    }
    let (min, max, _) = self.range;
    if value < min || value > max {
      return Err(PatternError::OutOfRange { field: self.name, value, min, max });
    }
    match self.param_type {
      ParamType::Ratio if !(0.0..=1.0).contains(&value) => {
        Err(PatternError::InvalidValue("Ratio must be within [0, 1]"))
      },
      ParamType::Price if value < 0.0 => {
        Err(PatternError::InvalidValue("Price distance must be non-negative"))
      },
      _ => Ok(()),
    }
  }
}

// ============================================================
// PARAMETERIZED DETECTOR TRAIT
// ============================================================

/// Trait for detectors whose thresholds can be tuned
pub trait ParameterizedDetector: Sized {
  /// Returns metadata for all configurable parameters
  fn param_meta() -> &'static [ParamMeta];

  /// Creates a detector with parameters from a HashMap
  ///
  /// Missing parameters use their default values; unknown names are rejected.
  fn with_params(params: &HashMap<&str, f64>) -> Result<Self>;

  /// Returns the pattern ID string
  fn pattern_id_str() -> &'static str;
}

// ============================================================
// PARAMETER VALUE HELPERS
// ============================================================

/// Get a validated value from params, falling back to the parameter's default
pub fn get_param(params: &HashMap<&str, f64>, meta: &ParamMeta) -> Result<f64> {
  let value = params.get(meta.name).copied().unwrap_or(meta.default);
  meta.validate(value)?;
  Ok(value)
}

/// Reject names that do not belong to `known`
pub fn check_known_params(params: &HashMap<&str, f64>, known: &[ParamMeta]) -> Result<()> {
  match params.keys().find(|key| !known.iter().any(|m| m.name == **key)) {
    Some(key) => Err(PatternError::InvalidConfig(format!("unknown parameter `{key}`"))),
    None => Ok(()),
  }
}

// ============================================================
// TESTS
// ============================================================
