use chart_select::api::{ChartEngine, ChartEngineConfig, ChartStyle};
use chart_select::core::{
    Insets, LinearScale, Range, Scalable, TimeGranularity, TimeScale, Viewport,
};
use chart_select::interaction::{GestureEvent, GestureTarget};
use chart_select::render::NullRenderer;
use proptest::prelude::*;

fn wide_engine(min: f64, span: f64) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 200))
        .with_style(ChartStyle::default().with_margin(Insets::default()))
        .with_x_range(min, min + span)
        .with_y_range(min, min + span);
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

proptest! {
    #[test]
    fn linear_scale_round_trips_pixels(
        min in -1_000_000.0f64..1_000_000.0,
        span in 1.0f64..1_000_000.0,
        extent in 1.0f64..4_000.0,
        fraction in 0.0f64..1.0
    ) {
        let scale = LinearScale::horizontal(Range::new(min, min + span), extent);
        let pixel = extent * fraction;
        let round_trip = scale.to_pixel(scale.to_data(pixel));
        prop_assert!((round_trip - pixel).abs() <= 1e-6);

        let vertical = LinearScale::vertical(Range::new(min, min + span), extent);
        let round_trip = vertical.to_pixel(vertical.to_data(pixel));
        prop_assert!((round_trip - pixel).abs() <= 1e-6);
    }

    #[test]
    fn wheel_zoom_keeps_value_under_cursor(
        min in -10_000.0f64..10_000.0,
        span in 1.0f64..10_000.0,
        offset in 0.0f64..800.0,
        zoom_in in any::<bool>()
    ) {
        let mut engine = wide_engine(min, span);
        let before = engine.x_scale().to_data(offset);
        let delta = if zoom_in { 120.0 } else { -120.0 };
        engine.on_gesture(
            GestureTarget::XAxis,
            &GestureEvent::Wheel { delta, offset_x: offset, offset_y: 0.0 },
        );
        let after = engine.x_scale().to_data(offset);

        let tolerance = 1e-9 * before.abs().max(span);
        prop_assert!((after - before).abs() <= tolerance);
        let expected_span = if zoom_in { span * 0.9 } else { span * 1.1 };
        prop_assert!((engine.x_range().span() - expected_span).abs() <= 1e-9 * span.max(1.0));
    }

    #[test]
    fn pan_translates_without_rescaling(
        min in -10_000.0f64..10_000.0,
        span in 1.0f64..10_000.0,
        movement in -400.0f64..400.0
    ) {
        let mut engine = wide_engine(min, span);
        engine.pan_start();
        engine.on_gesture(
            GestureTarget::XAxis,
            &GestureEvent::PointerMove { movement_x: movement, movement_y: 0.0 },
        );

        let range = engine.x_range();
        let expected_min = min - movement * span / 800.0;
        let tolerance = 1e-9 * min.abs().max(span);
        prop_assert!((range.span() - span).abs() <= tolerance);
        prop_assert!((range.min - expected_min).abs() <= tolerance);
    }

    #[test]
    fn coarser_spans_never_pick_finer_buckets(
        start in -1.0e12f64..1.0e12,
        a in 0.0f64..1.0e11,
        b in 0.0f64..1.0e11
    ) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let fine = TimeGranularity::select(start, start + short);
        let coarse = TimeGranularity::select(start, start + long);
        prop_assert!(fine.coarseness() <= coarse.coarseness());
    }

    #[test]
    fn time_ticks_stay_inside_domain(
        start in 0.0f64..2.0e12,
        span in 10.0f64..1.0e10
    ) {
        let scale = TimeScale::new(Range::new(start, start + span), 800.0);
        let ticks = scale.ticks();
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(ticks.iter().all(|tick| *tick >= start && *tick <= start + span));
    }
}
