use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::{
    DataPoint, LinearScale, Range, Scalable, TimeMode, TimeScale, Zoomable, linear_ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Axis;
use crate::render::Renderer;

use super::{ChartEngine, ChartKind, PluginEvent};

/// Horizontal scale of either chart kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XScale {
    Linear(LinearScale),
    Time(TimeScale),
}

impl XScale {
    #[must_use]
    pub fn as_time(&self) -> Option<&TimeScale> {
        match self {
            Self::Time(scale) => Some(scale),
            Self::Linear(_) => None,
        }
    }

    /// Tick positions in data units; empty for degenerate scales.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.is_degenerate() {
            return Vec::new();
        }
        match self {
            Self::Linear(scale) => {
                let domain = scale.domain();
                linear_ticks(domain.min, domain.max, count)
            }
            Self::Time(scale) => scale.ticks(),
        }
    }
}

impl Scalable for XScale {
    fn domain(&self) -> Range {
        match self {
            Self::Linear(scale) => scale.domain(),
            Self::Time(scale) => scale.domain(),
        }
    }

    fn extent(&self) -> f64 {
        match self {
            Self::Linear(scale) => scale.extent(),
            Self::Time(scale) => scale.extent(),
        }
    }

    fn to_pixel(&self, value: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.to_pixel(value),
            Self::Time(scale) => scale.to_pixel(value),
        }
    }

    fn to_data(&self, pixel: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.to_data(pixel),
            Self::Time(scale) => scale.to_data(pixel),
        }
    }

    fn is_degenerate(&self) -> bool {
        match self {
            Self::Linear(scale) => scale.is_degenerate(),
            Self::Time(scale) => scale.is_degenerate(),
        }
    }
}

impl Zoomable for XScale {
    fn zoom_range(&self, range: &mut Range, k: f64, anchor: f64) -> bool {
        match self {
            Self::Linear(scale) => scale.zoom_range(range, k, anchor),
            Self::Time(scale) => scale.zoom_range(range, k, anchor),
        }
    }

    fn pan_range(&self, range: &mut Range, delta: f64) {
        match self {
            Self::Linear(scale) => scale.pan_range(range, delta),
            Self::Time(scale) => scale.pan_range(range, delta),
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// X scale derived from the live X range.
    #[must_use]
    pub fn x_scale(&self) -> XScale {
        let (width, _) = self.chart_area();
        match self.kind {
            ChartKind::Xy => XScale::Linear(LinearScale::horizontal(self.x_range, width)),
            ChartKind::Time => XScale::Time(TimeScale::new(self.x_range, width)),
        }
    }

    /// Y scale derived from the live Y range. Pixel-Y grows downward.
    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        let (_, height) = self.chart_area();
        LinearScale::vertical(self.y_range, height)
    }

    #[must_use]
    pub fn x_range(&self) -> Range {
        self.x_range
    }

    #[must_use]
    pub fn y_range(&self) -> Range {
        self.y_range
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.x_range = checked_range(min, max, "x")?;
        self.emit_range_changed(Axis::X);
        Ok(())
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.y_range = checked_range(min, max, "y")?;
        self.emit_range_changed(Axis::Y);
        Ok(())
    }

    /// Value subtracted from sample X before it meets the X range: the first
    /// sample of the first series on relative time charts, `0` otherwise.
    #[must_use]
    pub fn time_origin(&self) -> f64 {
        if self.kind != ChartKind::Time || self.time_mode != TimeMode::Relative {
            return 0.0;
        }
        self.series
            .first()
            .and_then(|series| series.points.first())
            .map_or(0.0, |point| point.x)
    }

    /// Fits X to the earliest first sample and the latest last sample over
    /// all series. Returns `false` when the first series has no points.
    pub fn auto_fit_x(&mut self) -> bool {
        if !self.series.has_data() {
            return false;
        }

        let firsts = self
            .series
            .iter()
            .filter_map(|series| series.points.first())
            .map(|point| OrderedFloat(point.x));
        let lasts = self
            .series
            .iter()
            .filter_map(|series| series.points.last())
            .map(|point| OrderedFloat(point.x));
        let (Some(min), Some(max)) = (firsts.min(), lasts.max()) else {
            return false;
        };

        let origin = self.time_origin();
        self.x_range = Range::new(min.0 - origin, max.0 - origin);
        debug!(min = self.x_range.min, max = self.x_range.max, "auto-fit x");
        self.emit_range_changed(Axis::X);
        true
    }

    /// Grows Y to cover every sample visible in the X range, plus zero, each
    /// bound multiplied by `factor`. Bounds only ever move outward, so
    /// repeated calls never snap a zoomed-out range back in.
    pub fn auto_fit_y(&mut self, factor: f64) -> bool {
        if !self.series.has_data() || !factor.is_finite() {
            return false;
        }

        let origin = self.time_origin();
        let x_range = self.x_range;
        let visible = || {
            self.series
                .iter()
                .flat_map(|series| series.points.iter())
                .filter(move |point| point.y.is_finite() && x_range.contains(point.x - origin))
                .map(|point| OrderedFloat(point.y))
        };
        let (Some(min), Some(max)) = (visible().min(), visible().max()) else {
            trace!("auto-fit y skipped: no visible samples");
            return false;
        };

        let min = min.0.min(0.0) * factor;
        let max = max.0.max(0.0) * factor;
        let mut changed = false;
        if min < self.y_range.min {
            self.y_range.min = min;
            changed = true;
        }
        if max > self.y_range.max {
            self.y_range.max = max;
            changed = true;
        }
        debug!(
            min = self.y_range.min,
            max = self.y_range.max,
            factor,
            changed,
            "auto-fit y"
        );
        if changed {
            self.emit_range_changed(Axis::Y);
        }
        changed
    }

    /// Follows the newest sample of the first series; see
    /// [`ChartEngine::shift_series_into_view`].
    pub fn shift_into_view(&mut self) -> bool {
        let Some(series) = self.series.first() else {
            return false;
        };
        let origin = self.origin_of(&series.points);
        let target = shifted_window(self.x_range, &series.points, origin);
        self.apply_shift(target)
    }

    /// When the newest sample of `name` has just left the X range while the
    /// one before it is still visible, slides the window forward so the newest
    /// sample sits on the trailing edge. The window width is kept.
    pub fn shift_series_into_view(&mut self, name: &str) -> ChartResult<bool> {
        let series = self
            .series
            .get(name)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown series `{name}`")))?;
        let origin = self.origin_of(&series.points);
        let target = shifted_window(self.x_range, &series.points, origin);
        Ok(self.apply_shift(target))
    }

    fn origin_of(&self, points: &[DataPoint]) -> f64 {
        if self.kind == ChartKind::Time && self.time_mode == TimeMode::Relative {
            points.first().map_or(0.0, |point| point.x)
        } else {
            0.0
        }
    }

    fn apply_shift(&mut self, target: Option<Range>) -> bool {
        let Some(range) = target else {
            return false;
        };
        self.x_range = range;
        trace!(min = range.min, max = range.max, "shift into view");
        self.emit_range_changed(Axis::X);
        true
    }

    pub(super) fn emit_range_changed(&mut self, axis: Axis) {
        let range = match axis {
            Axis::X => self.x_range,
            Axis::Y => self.y_range,
        };
        self.emit_plugin_event(PluginEvent::RangeChanged {
            axis,
            min: range.min,
            max: range.max,
        });
    }
}

fn checked_range(min: f64, max: f64, axis: &str) -> ChartResult<Range> {
    let range = Range::new(min, max);
    if !range.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "{axis} range bounds must be finite"
        )));
    }
    if range.min > range.max {
        return Err(ChartError::InvalidData(format!(
            "{axis} range min must not exceed max"
        )));
    }
    Ok(range)
}

fn shifted_window(range: Range, points: &[DataPoint], origin: f64) -> Option<Range> {
    let [.., previous, newest] = points else {
        return None;
    };
    let newest = newest.x - origin;
    let previous = previous.x - origin;
    if range.max < newest && range.max >= previous {
        let span = range.span();
        Some(Range::new(newest - span, newest))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::shifted_window;
    use crate::core::{DataPoint, Range};

    #[test]
    fn window_follows_newest_sample() {
        let points = [DataPoint::new(9.0, 0.0), DataPoint::new(12.0, 0.0)];
        assert_eq!(
            shifted_window(Range::new(0.0, 10.0), &points, 0.0),
            Some(Range::new(2.0, 12.0))
        );
    }

    #[test]
    fn window_stays_when_user_scrolled_back() {
        let points = [DataPoint::new(20.0, 0.0), DataPoint::new(21.0, 0.0)];
        assert_eq!(shifted_window(Range::new(0.0, 10.0), &points, 0.0), None);
        assert_eq!(shifted_window(Range::new(0.0, 10.0), &points[..1], 0.0), None);
    }
}
