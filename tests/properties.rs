//! Property tests for the signal detectors.

use candlesig::prelude::*;
use proptest::prelude::*;

fn price() -> impl Strategy<Value = f64> {
    0.01f64..10_000.0
}

/// Consistent candle: high above the body, low below it
fn candle() -> impl Strategy<Value = Candle> {
    (price(), price(), 0.0f64..50.0, 0.0f64..50.0).prop_map(|(open, close, up, down)| {
        Candle::new(open, open.max(close) + up, open.min(close) - down, close)
    })
}

/// Any four floats, including NaN and infinities
fn any_candle() -> impl Strategy<Value = Candle> {
    (
        proptest::num::f64::ANY,
        proptest::num::f64::ANY,
        proptest::num::f64::ANY,
        proptest::num::f64::ANY,
    )
        .prop_map(|(o, h, l, c)| Candle::new(o, h, l, c))
}

proptest! {
    #[test]
    fn doji_has_no_direction(open in price(), high in price(), low in price()) {
        let window = [Candle::new(open, high, low, open)];
        prop_assert_eq!(candle_direction(&window), DirectionSignal::None);
    }

    #[test]
    fn rising_candle_is_buy(open in price(), delta in 0.001f64..1000.0) {
        let window = [Candle::new(open, open + delta, open, open + delta)];
        prop_assert_eq!(candle_direction(&window).code(), 1);
    }

    #[test]
    fn falling_candle_is_sell(open in price(), delta in 0.001f64..1000.0) {
        let window = [Candle::new(open + delta, open + delta, open, open)];
        prop_assert_eq!(candle_direction(&window).code(), -1);
    }

    #[test]
    fn strike_needs_exactly_four(
        window in prop::collection::vec(candle(), 0..10).prop_filter("not four", |w| w.len() != 4)
    ) {
        prop_assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
    }

    #[test]
    fn doji_lead_rejects_strike(
        open in price(),
        rest in prop::collection::vec(candle(), 3),
    ) {
        let mut window = vec![Candle::new(open, open + 1.0, open - 1.0, open)];
        window.extend(rest);
        prop_assert_eq!(detect_three_line_strike(&window), DirectionSignal::None);
    }

    #[test]
    fn strike_reverses_the_run(window in prop::collection::vec(candle(), 4)) {
        let signal = detect_three_line_strike(&window);
        if signal.is_signal() {
            prop_assert_eq!(signal, window[0].direction().opposite());
            prop_assert_eq!(window[1].direction(), window[0].direction());
            prop_assert_eq!(window[2].direction(), window[0].direction());
            prop_assert!(window[3].body() >= window[2].body());
        }
    }

    #[test]
    fn star_signal_matches_close(c in candle()) {
        match detect_star(&c) {
            ShapeSignal::Sell => {
                prop_assert!(c.open > c.close);
                prop_assert!(c.upper_wick() > c.lower_wick());
            }
            ShapeSignal::Buy => {
                prop_assert!(c.open < c.close);
                prop_assert!(c.lower_wick() > c.upper_wick());
            }
            ShapeSignal::None => {}
        }
    }

    #[test]
    fn detectors_are_total(window in prop::collection::vec(any_candle(), 0..6)) {
        let star = StarHammerDetector::default().detect(&window);
        prop_assert!(ShapeSignal::from_code(star.code()).is_some());
        let direction = candle_direction(&window);
        prop_assert!((-1..=1).contains(&direction.code()));
        let strike = detect_three_line_strike(&window);
        prop_assert!((-1..=1).contains(&strike.code()));
    }

    #[test]
    fn detectors_are_idempotent(window in prop::collection::vec(candle(), 4)) {
        prop_assert_eq!(detect_star(&window[0]), detect_star(&window[0]));
        prop_assert_eq!(candle_direction(&window), candle_direction(&window));
        prop_assert_eq!(detect_three_line_strike(&window), detect_three_line_strike(&window));
    }
}
