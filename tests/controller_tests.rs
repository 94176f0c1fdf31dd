use approx::assert_abs_diff_eq;
use chart_select::api::{ChartEngine, ChartEngineConfig};
use chart_select::core::{DataPoint, Range, Scalable, SeriesKind, TimeMode, Viewport};
use chart_select::render::{Color, NullRenderer};
use chart_select::ChartError;

fn xy_engine(x: (f64, f64), y: (f64, f64)) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(400, 300))
        .with_x_range(x.0, x.1)
        .with_y_range(y.0, y.1);
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn points(xy: &[(f64, f64)]) -> Vec<DataPoint> {
    xy.iter().map(|(x, y)| DataPoint::new(*x, *y)).collect()
}

#[test]
fn invalid_viewport_is_rejected() {
    let result = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(0, 300)),
    );
    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 300
        })
    ));
}

#[test]
fn auto_fit_x_spans_all_series_ends() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    engine
        .add_series("a", SeriesKind::Line, points(&[(1.0, 0.0), (5.0, 0.0)]))
        .expect("series a");
    engine
        .add_series("b", SeriesKind::Line, points(&[(0.0, 0.0), (4.0, 0.0)]))
        .expect("series b");

    assert!(engine.auto_fit_x());
    assert_eq!(engine.x_range(), Range::new(0.0, 5.0));
}

#[test]
fn auto_fit_needs_data_in_first_series() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    assert!(!engine.auto_fit_x());
    assert!(!engine.auto_fit_y(1.0));

    engine
        .add_series("empty", SeriesKind::Line, Vec::new())
        .expect("empty series");
    assert!(!engine.auto_fit_x());
    assert_eq!(engine.x_range(), Range::new(0.0, 1.0));
}

#[test]
fn auto_fit_x_subtracts_relative_origin() {
    let config = ChartEngineConfig::time(Viewport::new(400, 300)).with_x_range(0.0, 1.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let start = 1_700_000_000_000.0;
    engine
        .add_series(
            "latency",
            SeriesKind::Line,
            points(&[(start, 1.0), (start + 2_500.0, 2.0), (start + 5_000.0, 3.0)]),
        )
        .expect("series");

    assert_eq!(engine.time_origin(), start);
    assert!(engine.auto_fit_x());
    assert_eq!(engine.x_range(), Range::new(0.0, 5_000.0));

    engine.set_time_mode(TimeMode::Absolute);
    assert_eq!(engine.time_origin(), 0.0);
    assert!(engine.auto_fit_x());
    assert_eq!(engine.x_range(), Range::new(start, start + 5_000.0));
}

#[test]
fn auto_fit_y_includes_zero_and_applies_factor() {
    let mut engine = xy_engine((0.0, 10.0), (0.0, 1.0));
    engine
        .add_series(
            "a",
            SeriesKind::Line,
            points(&[(1.0, -3.0), (4.0, 8.0), (9.0, 2.0)]),
        )
        .expect("series");

    assert!(engine.auto_fit_y(1.1));
    assert_abs_diff_eq!(engine.y_range().min, -3.3, epsilon = 1e-9);
    assert_abs_diff_eq!(engine.y_range().max, 8.8, epsilon = 1e-9);
}

#[test]
fn auto_fit_y_only_grows() {
    let mut engine = xy_engine((0.0, 10.0), (-50.0, 50.0));
    engine
        .add_series("a", SeriesKind::Line, points(&[(1.0, -3.0), (4.0, 8.0)]))
        .expect("series");

    assert!(!engine.auto_fit_y(1.0));
    assert_eq!(engine.y_range(), Range::new(-50.0, 50.0));

    engine
        .add_series("a", SeriesKind::Line, points(&[(1.0, -3.0), (4.0, 80.0)]))
        .expect("series replaced");
    assert!(engine.auto_fit_y(1.0));
    assert_eq!(engine.y_range(), Range::new(-50.0, 80.0));
}

#[test]
fn auto_fit_y_ignores_samples_outside_x_range() {
    let mut engine = xy_engine((0.0, 2.0), (0.0, 1.0));
    engine
        .add_series(
            "a",
            SeriesKind::Line,
            points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 100.0)]),
        )
        .expect("series");

    assert!(engine.auto_fit_y(1.0));
    assert_eq!(engine.y_range(), Range::new(0.0, 3.0));
}

#[test]
fn auto_fit_y_without_visible_samples_keeps_range() {
    let mut engine = xy_engine((100.0, 200.0), (0.0, 1.0));
    engine
        .add_series("a", SeriesKind::Line, points(&[(0.0, 40.0), (1.0, 50.0)]))
        .expect("series");

    assert!(!engine.auto_fit_y(1.0));
    assert_eq!(engine.y_range(), Range::new(0.0, 1.0));
}

#[test]
fn shift_into_view_follows_newest_sample() {
    let mut engine = xy_engine((0.0, 10.0), (0.0, 1.0));
    engine
        .add_series(
            "live",
            SeriesKind::Line,
            points(&[(0.0, 0.0), (5.0, 0.0), (9.0, 0.0)]),
        )
        .expect("series");
    assert!(!engine.shift_into_view());

    engine
        .add_series(
            "live",
            SeriesKind::Line,
            points(&[(0.0, 0.0), (5.0, 0.0), (9.0, 0.0), (12.0, 0.0)]),
        )
        .expect("series grown");
    assert!(engine.shift_into_view());
    assert_eq!(engine.x_range(), Range::new(2.0, 12.0));
}

#[test]
fn shift_into_view_respects_scrolled_back_window() {
    let mut engine = xy_engine((0.0, 5.0), (0.0, 1.0));
    engine
        .add_series(
            "live",
            SeriesKind::Line,
            points(&[(0.0, 0.0), (9.0, 0.0), (12.0, 0.0)]),
        )
        .expect("series");

    assert!(!engine.shift_into_view());
    assert_eq!(engine.x_range(), Range::new(0.0, 5.0));
}

#[test]
fn shift_into_view_in_relative_time() {
    let config = ChartEngineConfig::time(Viewport::new(400, 300)).with_x_range(0.0, 10_000.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let start = 1_000_000_000_000.0;
    engine
        .add_series(
            "live",
            SeriesKind::Line,
            points(&[(start, 0.0), (start + 9_000.0, 0.0), (start + 12_000.0, 0.0)]),
        )
        .expect("series");

    assert!(engine.shift_into_view());
    assert_eq!(engine.x_range(), Range::new(2_000.0, 12_000.0));
}

#[test]
fn shift_series_into_view_uses_named_series() {
    let mut engine = xy_engine((0.0, 10.0), (0.0, 1.0));
    engine
        .add_series("still", SeriesKind::Line, points(&[(0.0, 0.0), (1.0, 0.0)]))
        .expect("series");
    engine
        .add_series("live", SeriesKind::Line, points(&[(8.0, 0.0), (11.0, 0.0)]))
        .expect("series");

    assert!(!engine.shift_into_view());
    assert!(engine.shift_series_into_view("live").expect("known series"));
    assert_eq!(engine.x_range(), Range::new(1.0, 11.0));
    assert!(matches!(
        engine.shift_series_into_view("missing"),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn replacing_a_series_keeps_its_draw_position() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    let red = Color::rgb(1.0, 0.0, 0.0);
    engine
        .add_series("a", SeriesKind::Line, points(&[(0.0, 1.0)]))
        .expect("series a");
    engine
        .add_series("b", SeriesKind::Bar, points(&[(0.0, 2.0)]))
        .expect("series b");

    let replaced = engine
        .add_or_replace_series("a", SeriesKind::Scatter, points(&[(0.0, 3.0)]), red)
        .expect("series a replaced");
    assert!(replaced);

    let legend = engine.legend_entries();
    assert_eq!(legend.len(), 2);
    assert_eq!(legend[0].name, "a");
    assert_eq!(legend[0].kind, SeriesKind::Scatter);
    assert_eq!(legend[0].color, red);
    assert_eq!(legend[1].name, "b");
    assert_eq!(
        engine.series("a").expect("series a").points,
        points(&[(0.0, 3.0)])
    );
}

#[test]
fn set_data_overwrites_first_series() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    engine
        .add_series("a", SeriesKind::Line, points(&[(0.0, 1.0)]))
        .expect("series a");
    engine
        .add_series("b", SeriesKind::Line, points(&[(0.0, 2.0)]))
        .expect("series b");

    engine
        .set_data("c", SeriesKind::Area, points(&[(0.0, 5.0)]), Color::BLACK)
        .expect("set data");

    assert_eq!(engine.series_count(), 2);
    let first = engine.first_series().expect("first series");
    assert_eq!(first.name, "c");
    assert_eq!(first.kind, SeriesKind::Area);
    assert!(engine.series("a").is_none());
    assert!(engine.series("b").is_some());
}

#[test]
fn set_data_on_empty_chart_inserts() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    engine
        .set_data("only", SeriesKind::Line, points(&[(0.0, 1.0)]), Color::BLACK)
        .expect("set data");
    assert_eq!(engine.series_count(), 1);
}

#[test]
fn remove_and_clear_series() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    engine
        .add_series("a", SeriesKind::Line, points(&[(0.0, 1.0)]))
        .expect("series a");
    engine
        .add_series("b", SeriesKind::Line, points(&[(0.0, 2.0)]))
        .expect("series b");

    assert!(engine.remove_series("a").is_some());
    assert!(engine.remove_series("a").is_none());
    assert_eq!(engine.first_series().expect("first").name, "b");

    engine.clear_series();
    assert_eq!(engine.series_count(), 0);
}

#[test]
fn invalid_series_are_rejected() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    assert!(matches!(
        engine.add_series("nan", SeriesKind::Line, points(&[(0.0, f64::NAN)])),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        engine.add_series("", SeriesKind::Line, Vec::new()),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        engine.add_or_replace_series(
            "color",
            SeriesKind::Line,
            Vec::new(),
            Color::rgba(2.0, 0.0, 0.0, 1.0)
        ),
        Err(ChartError::InvalidData(_))
    ));
    assert_eq!(engine.series_count(), 0);
}

#[test]
fn explicit_ranges_must_be_finite() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    assert!(engine.set_x_range(f64::NEG_INFINITY, 1.0).is_err());
    assert!(engine.set_y_range(0.0, f64::NAN).is_err());
    assert_eq!(engine.x_range(), Range::new(0.0, 1.0));

    engine.set_x_range(-5.0, 5.0).expect("finite range");
    engine.set_y_range(3.0, 3.0).expect("degenerate range is allowed");
    assert_eq!(engine.x_range(), Range::new(-5.0, 5.0));
    assert!(engine.y_scale().is_degenerate());
}

#[test]
fn inverted_ranges_are_rejected() {
    let mut engine = xy_engine((0.0, 1.0), (0.0, 1.0));
    assert!(matches!(
        engine.set_x_range(10.0, 0.0),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        engine.set_y_range(1.0, -1.0),
        Err(ChartError::InvalidData(_))
    ));
    assert_eq!(engine.x_range(), Range::new(0.0, 1.0));
    assert_eq!(engine.y_range(), Range::new(0.0, 1.0));

    let inverted_x = ChartEngineConfig::new(Viewport::new(400, 300)).with_x_range(10.0, 0.0);
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), inverted_x),
        Err(ChartError::InvalidData(_))
    ));
    let inverted_y = ChartEngineConfig::new(Viewport::new(400, 300)).with_y_range(2.0, -2.0);
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), inverted_y),
        Err(ChartError::InvalidData(_))
    ));
}
