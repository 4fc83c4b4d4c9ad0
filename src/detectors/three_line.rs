//! Four-candle three-line strike.
//!
//! Three candles moving the same way, then a strike candle that reverses
//! and whose body is at least as large as the third candle's body. The
//! signal is the strike candle's own direction.

use super::helpers::STRIKE_WINDOW;
use crate::{DirectionSignal, OHLCExt, PatternId, WindowDetector, OHLC};

impl_with_defaults!(ThreeLineStrikeDetector);

// ============================================================
// THREE LINE STRIKE
// ============================================================

/// Classify a window of exactly four candles, earliest first.
///
/// Returns `Buy` for a rising strike after three falling candles, `Sell`
/// for a falling strike after three rising candles and `None` otherwise,
/// including any window that is not four candles long.
pub fn detect_three_line_strike<T: OHLC>(window: &[T]) -> DirectionSignal {
  let [first, second, third, strike] = window else {
    tracing::trace!(len = window.len(), "three-line strike rejected: window is not four candles");
    return DirectionSignal::None;
  };

  let reference = first.direction();
  if reference == DirectionSignal::None {
    tracing::trace!("three-line strike rejected: lead candle is a doji");
    return DirectionSignal::None;
  }

  if second.direction() != reference || third.direction() != reference {
    tracing::trace!(%reference, "three-line strike rejected: momentum run broken");
    return DirectionSignal::None;
  }

  // a doji strike passes here and fails the body check below
  let direction = strike.direction();
  if direction == reference {
    tracing::trace!(%reference, "three-line strike rejected: strike continues the run");
    return DirectionSignal::None;
  }

  if strike.body() < third.body() {
    tracing::trace!(
      strike_body = strike.body(),
      third_body = third.body(),
      "three-line strike rejected: strike body smaller than third candle"
    );
    return DirectionSignal::None;
  }

  direction
}

/// [`detect_three_line_strike`] as a [`WindowDetector`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeLineStrikeDetector;

impl WindowDetector for ThreeLineStrikeDetector {
  type Signal = DirectionSignal;

  fn id(&self) -> PatternId {
    PatternId("THREE_LINE_STRIKE")
  }

  fn window_len(&self) -> usize {
    STRIKE_WINDOW
  }

  fn detect<T: OHLC>(&self, window: &[T]) -> DirectionSignal {
    detect_three_line_strike(window)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Candle;

  fn falling_run() -> Vec<Candle> {
    vec![
      Candle::new(10.0, 10.2, 8.8, 9.0),
      Candle::new(9.0, 9.1, 7.9, 8.0),
      Candle::new(8.0, 8.1, 6.9, 7.0),
    ]
  }

  fn rising_run() -> Vec<Candle> {
    vec![
      Candle::new(7.0, 8.1, 6.9, 8.0),
      Candle::new(8.0, 9.1, 7.9, 9.0),
      Candle::new(9.0, 10.1, 8.9, 10.0),
    ]
  }

  fn with_strike(mut run: Vec<Candle>, strike: Candle) -> Vec<Candle> {
    run.push(strike);
    run
  }

  #[test]
  fn test_bullish_strike() {
    let window = with_strike(falling_run(), Candle::new(7.0, 10.5, 6.9, 10.2));
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::Buy);
    assert_eq!(detect_three_line_strike(&window).code(), 1);
  }

  #[test]
  fn test_bearish_strike() {
    let window = with_strike(rising_run(), Candle::new(10.0, 10.1, 6.5, 6.8));
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::Sell);
    assert_eq!(detect_three_line_strike(&window).code(), -1);
  }

  #[test]
  fn test_strike_smaller_than_third_body() {
    let window = with_strike(falling_run(), Candle::new(7.0, 7.6, 6.9, 7.5));
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
  }

  #[test]
  fn test_strike_equal_to_third_body() {
    let window = with_strike(falling_run(), Candle::new(7.0, 8.1, 6.9, 8.0));
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::Buy);
  }

  #[test]
  fn test_strike_continuing_run() {
    let window = with_strike(falling_run(), Candle::new(7.0, 7.1, 3.9, 4.0));
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
  }

  #[test]
  fn test_doji_strike() {
    let window = with_strike(falling_run(), Candle::new(7.0, 8.0, 6.0, 7.0));
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
  }

  #[test]
  fn test_doji_lead() {
    let mut window = with_strike(falling_run(), Candle::new(7.0, 10.5, 6.9, 10.2));
    window[0] = Candle::new(10.0, 10.2, 8.8, 10.0);
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
  }

  #[test]
  fn test_broken_run() {
    for broken in 1..3 {
      let mut window = with_strike(falling_run(), Candle::new(7.0, 10.5, 6.9, 10.2));
      let c = window[broken];
      // flip the candle so it rises
      window[broken] = Candle::new(c.close, c.high, c.low, c.open);
      assert_eq!(detect_three_line_strike(&window), DirectionSignal::None, "candle {broken}");
    }
  }

  #[test]
  fn test_doji_in_run() {
    let mut window = with_strike(falling_run(), Candle::new(7.0, 10.5, 6.9, 10.2));
    window[2] = Candle::new(8.0, 8.1, 6.9, 8.0);
    assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
  }

  #[test]
  fn test_wrong_window_length() {
    let full = with_strike(falling_run(), Candle::new(7.0, 10.5, 6.9, 10.2));
    assert_eq!(detect_three_line_strike(&full[..3]), DirectionSignal::None);
    assert_eq!(detect_three_line_strike(&full[..0]), DirectionSignal::None);

    let mut five = full.clone();
    five.push(Candle::new(10.2, 10.3, 10.0, 10.1));
    assert_eq!(detect_three_line_strike(&five), DirectionSignal::None);

    // longer series must be sliced down to four candles by the caller
    assert_eq!(detect_three_line_strike(&five[..4]), DirectionSignal::Buy);
  }

  #[test]
  fn test_detector_trait() {
    let detector = ThreeLineStrikeDetector::with_defaults();
    assert_eq!(detector.window_len(), 4);
    assert_eq!(detector.id().as_str(), "THREE_LINE_STRIKE");
    let window = with_strike(rising_run(), Candle::new(10.0, 10.1, 6.5, 6.8));
    assert_eq!(detector.detect(&window), DirectionSignal::Sell);
  }
}
