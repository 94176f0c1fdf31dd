pub mod projection;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use projection::{
    AreaGeometry, BarGeometry, LineSegment, ProjectionContext, Vertex, project_areas, project_bars,
    project_line_segments, project_scatter,
};
pub use scale::{LinearScale, Orientation, Scalable, Zoomable};
pub use series::{Series, SeriesKind, SeriesStore};
pub use ticks::{AXIS_TARGET_SPACING_PX, axis_tick_target_count, linear_ticks, nice_step};
pub use time_scale::{
    MIN_TIME_ZOOM_SPAN_MS, TimeGranularity, TimeMode, TimeScale, TimeUnit, d3_pattern_to_chrono,
    millis_to_datetime, validate_time_pattern,
};
pub use types::{DataPoint, Insets, Range, Viewport};
