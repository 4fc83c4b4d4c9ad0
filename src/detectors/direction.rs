//! Single-candle direction: rising, falling or doji.

use crate::{DirectionSignal, OHLCExt, PatternId, WindowDetector, OHLC};

impl_with_defaults!(CandleDirectionDetector);

/// Direction of the first candle in `window`.
///
/// An empty window has no direction. Only exact `open == close` counts as a
/// doji here, there is no tolerance.
#[inline]
pub fn candle_direction<T: OHLC>(window: &[T]) -> DirectionSignal {
    window
        .first()
        .map_or(DirectionSignal::None, |candle| candle.direction())
}

/// [`candle_direction`] as a [`WindowDetector`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CandleDirectionDetector;

impl WindowDetector for CandleDirectionDetector {
    type Signal = DirectionSignal;

    fn id(&self) -> PatternId {
        PatternId("CANDLE_DIRECTION")
    }

    fn window_len(&self) -> usize {
        1
    }

    fn detect<T: OHLC>(&self, window: &[T]) -> DirectionSignal {
        candle_direction(window)
    }
}
