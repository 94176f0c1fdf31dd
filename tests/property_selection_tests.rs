use chart_select::api::{ChartEngine, ChartEngineConfig, ChartStyle};
use chart_select::core::{DataPoint, Insets, SeriesKind, Viewport};
use chart_select::interaction::{IndexRange, ValueBand, search_intervals};
use chart_select::render::NullRenderer;
use proptest::prelude::*;

fn selectable_engine(ys: &[f64]) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(100, 100))
        .with_style(ChartStyle::default().with_margin(Insets::default()))
        .with_x_range(0.0, ys.len() as f64)
        .with_y_range(-10.0, 10.0)
        .with_selection(true);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let points = ys
        .iter()
        .enumerate()
        .map(|(i, y)| DataPoint::new(i as f64, *y))
        .collect();
    engine
        .add_series("signal", SeriesKind::Line, points)
        .expect("series accepted");
    engine
}

fn ys(engine: &ChartEngine<NullRenderer>) -> Vec<f64> {
    engine
        .first_series()
        .expect("first series")
        .points
        .iter()
        .map(|point| point.y)
        .collect()
}

proptest! {
    #[test]
    fn runs_cover_exactly_the_matching_indices(
        values in prop::collection::vec(-10.0f64..10.0, 0..64),
        lo in -10.0f64..10.0,
        hi in -10.0f64..10.0,
        from in -8i64..72,
        to in -8i64..72
    ) {
        let points: Vec<DataPoint> = values
            .iter()
            .enumerate()
            .map(|(i, y)| DataPoint::new(i as f64, *y))
            .collect();
        let band = ValueBand::new(lo, hi);
        let runs = search_intervals(IndexRange::new(from, to), &points, |p| band.contains_strict(p.y));

        for pair in runs.windows(2) {
            prop_assert!(pair[0].to + 1 < pair[1].from);
        }

        let mut covered = vec![false; points.len()];
        for run in &runs {
            prop_assert!(run.from <= run.to);
            for flag in &mut covered[run.from..=run.to] {
                *flag = true;
            }
        }
        for (index, point) in points.iter().enumerate() {
            let in_range = (index as i64) >= from && (index as i64) <= to;
            let expected = in_range && band.contains_strict(point.y);
            prop_assert_eq!(covered[index], expected, "index {}", index);
        }
    }

    #[test]
    fn drag_result_depends_only_on_end_position(
        values in prop::collection::vec(-9.0f64..9.0, 2..24),
        path in prop::collection::vec(0.0f64..100.0, 0..12),
        end in 0.0f64..100.0
    ) {
        let mut stepped = selectable_engine(&values);
        let mut single = selectable_engine(&values);
        for engine in [&mut stepped, &mut single] {
            engine.selection_pointer_down(0.0, 0.0);
            engine.selection_pointer_up(100.0, 100.0);
            engine.selection_pointer_down(50.0, 50.0);
        }

        for y in &path {
            stepped.selection_pointer_drag(50.0, *y);
        }
        stepped.selection_pointer_up(50.0, end);
        single.selection_pointer_up(50.0, end);

        for (a, b) in ys(&stepped).iter().zip(ys(&single)) {
            prop_assert!((a - b).abs() <= 1e-9);
        }
        prop_assert_eq!(stepped.selection_rect(), single.selection_rect());
    }
}
