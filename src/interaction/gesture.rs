use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Insets, Range, Scalable, Zoomable};

/// Wheel factor applied when the wheel delta is positive.
pub const ZOOM_IN_FACTOR: f64 = 0.9;
/// Wheel factor applied otherwise.
pub const ZOOM_OUT_FACTOR: f64 = 1.1;

/// Raw pointer/wheel message delivered by the host.
///
/// Offsets are relative to the whole drawing surface (chart margins
/// included); movements are deltas since the previous pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Wheel {
        delta: f64,
        offset_x: f64,
        offset_y: f64,
    },
    PointerMove {
        movement_x: f64,
        movement_y: f64,
    },
    /// Any other host event. Always ignored.
    Other { kind: String },
}

/// Screen region that received the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureTarget {
    /// Strip below the chart area.
    XAxis,
    /// Strip left of the chart area.
    YAxis,
    /// The chart area itself.
    PlotArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Which ranges a handled gesture touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    Handled { x_changed: bool, y_changed: bool },
}

impl GestureOutcome {
    #[must_use]
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled { .. })
    }
}

/// A scale that also carries its variant's zoom/pan policy.
pub trait AxisScale: Scalable + Zoomable {}

impl<T: Scalable + Zoomable> AxisScale for T {}

/// Mutable view of one axis handed to the interpreter.
pub struct AxisHandle<'a> {
    pub range: &'a mut Range,
    pub scale: &'a dyn AxisScale,
}

/// Wheel factor for a wheel delta.
#[must_use]
pub fn zoom_factor(wheel_delta: f64) -> f64 {
    if wheel_delta > 0.0 {
        ZOOM_IN_FACTOR
    } else {
        ZOOM_OUT_FACTOR
    }
}

/// Zooms `range` around the data value under `anchor_px`, which keeps that
/// value at the same pixel. Returns `false` when the scale variant refuses
/// the step (time-axis zoom floor).
pub fn scale(wheel_delta: f64, anchor_px: f64, range: &mut Range, mapper: &dyn AxisScale) -> bool {
    let k = zoom_factor(wheel_delta);
    let anchor = mapper.to_data(anchor_px);
    if !anchor.is_finite() {
        return false;
    }
    let applied = mapper.zoom_range(range, k, anchor);
    trace!(k, anchor, min = range.min, max = range.max, applied, "wheel zoom");
    applied
}

/// Scales only the upper bound by the wheel factor; `min` stays put.
pub fn scale_around_zero(wheel_delta: f64, range: &mut Range) -> bool {
    let k = zoom_factor(wheel_delta);
    range.max *= k;
    trace!(k, max = range.max, "wheel amplitude zoom");
    true
}

/// Shifts `range` by the data equivalent of `movement_px`; the span is kept.
pub fn pan(movement_px: f64, range: &mut Range, mapper: &dyn AxisScale) -> bool {
    let delta = mapper.data_delta(movement_px);
    if !delta.is_finite() {
        return false;
    }
    mapper.pan_range(range, delta);
    trace!(delta, min = range.min, max = range.max, "pan");
    true
}

/// Pans both axes from one combined pointer movement.
pub fn pan_xy(
    movement_x: f64,
    movement_y: f64,
    x: AxisHandle<'_>,
    y: AxisHandle<'_>,
) -> (bool, bool) {
    let x_changed = pan(movement_x, x.range, x.scale);
    let y_changed = pan(movement_y, y.range, y.scale);
    (x_changed, y_changed)
}

/// Routes gesture events to range mutations.
///
/// | target   | wheel                        | pointer move (while panning)    |
/// |----------|------------------------------|---------------------------------|
/// | XAxis    | zoom X around the cursor     | pan X                           |
/// | YAxis    | zoom Y around the cursor     | pan Y                           |
/// | PlotArea | scale Y upper bound          | pan X+Y, or Y only in selection |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInterpreter {
    margin: Insets,
    allow_selection: bool,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(margin: Insets, allow_selection: bool) -> Self {
        Self {
            margin,
            allow_selection,
        }
    }

    #[must_use]
    pub fn allow_selection(self) -> bool {
        self.allow_selection
    }

    pub fn set_allow_selection(&mut self, allow: bool) {
        self.allow_selection = allow;
    }

    pub fn interpret(
        self,
        target: GestureTarget,
        event: &GestureEvent,
        panning: bool,
        x: AxisHandle<'_>,
        y: AxisHandle<'_>,
    ) -> GestureOutcome {
        match event {
            GestureEvent::Wheel {
                delta,
                offset_x,
                offset_y,
            } => {
                let anchor_x = offset_x - self.margin.left;
                let anchor_y = offset_y - self.margin.top;
                match target {
                    GestureTarget::XAxis => GestureOutcome::Handled {
                        x_changed: scale(*delta, anchor_x, x.range, x.scale),
                        y_changed: false,
                    },
                    GestureTarget::YAxis => GestureOutcome::Handled {
                        x_changed: false,
                        y_changed: scale(*delta, anchor_y, y.range, y.scale),
                    },
                    GestureTarget::PlotArea => GestureOutcome::Handled {
                        x_changed: false,
                        y_changed: scale_around_zero(*delta, y.range),
                    },
                }
            }
            GestureEvent::PointerMove {
                movement_x,
                movement_y,
            } => {
                if !panning {
                    return GestureOutcome::Ignored;
                }
                match target {
                    GestureTarget::XAxis => GestureOutcome::Handled {
                        x_changed: pan(*movement_x, x.range, x.scale),
                        y_changed: false,
                    },
                    GestureTarget::YAxis => GestureOutcome::Handled {
                        x_changed: false,
                        y_changed: pan(*movement_y, y.range, y.scale),
                    },
                    GestureTarget::PlotArea if self.allow_selection => GestureOutcome::Handled {
                        x_changed: false,
                        y_changed: pan(*movement_y, y.range, y.scale),
                    },
                    GestureTarget::PlotArea => {
                        let (x_changed, y_changed) = pan_xy(*movement_x, *movement_y, x, y);
                        GestureOutcome::Handled {
                            x_changed,
                            y_changed,
                        }
                    }
                }
            }
            GestureEvent::Other { kind } => {
                trace!(kind = kind.as_str(), "ignoring unrecognized gesture event");
                GestureOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisHandle, GestureEvent, GestureInterpreter, GestureOutcome, GestureTarget};
    use super::{pan, scale, scale_around_zero};
    use crate::core::{Insets, LinearScale, Range, TimeScale};

    #[test]
    fn positive_wheel_zooms_in_around_anchor() {
        let mut range = Range::new(0.0, 100.0);
        let x = LinearScale::horizontal(range, 100.0);
        assert!(scale(120.0, 40.0, &mut range, &x));
        assert!((range.min - 4.0).abs() <= 1e-9);
        assert!((range.max - 94.0).abs() <= 1e-9);
    }

    #[test]
    fn time_zoom_in_below_floor_is_refused() {
        let mut range = Range::new(1_000.0, 1_005.0);
        let x = TimeScale::new(range, 500.0);
        assert!(!scale(120.0, 250.0, &mut range, &x));
        assert_eq!(range, Range::new(1_000.0, 1_005.0));
        // Zooming out is still allowed.
        assert!(scale(-120.0, 250.0, &mut range, &x));
    }

    #[test]
    fn amplitude_zoom_leaves_min_alone() {
        let mut range = Range::new(-2.0, 10.0);
        scale_around_zero(1.0, &mut range);
        assert_eq!(range.min, -2.0);
        assert!((range.max - 9.0).abs() <= 1e-12);
    }

    #[test]
    fn pan_on_vertical_axis_follows_the_pointer() {
        let mut range = Range::new(0.0, 10.0);
        let y = LinearScale::vertical(range, 100.0);
        pan(10.0, &mut range, &y);
        assert!((range.min - 1.0).abs() <= 1e-12);
        assert!((range.max - 11.0).abs() <= 1e-12);
    }

    #[test]
    fn moves_are_ignored_unless_panning() {
        let interpreter = GestureInterpreter::new(Insets::default(), false);
        let mut x_range = Range::new(0.0, 10.0);
        let mut y_range = Range::new(0.0, 10.0);
        let x = LinearScale::horizontal(x_range, 100.0);
        let y = LinearScale::vertical(y_range, 100.0);
        let event = GestureEvent::PointerMove {
            movement_x: 5.0,
            movement_y: 5.0,
        };
        let outcome = interpreter.interpret(
            GestureTarget::PlotArea,
            &event,
            false,
            AxisHandle {
                range: &mut x_range,
                scale: &x,
            },
            AxisHandle {
                range: &mut y_range,
                scale: &y,
            },
        );
        assert_eq!(outcome, GestureOutcome::Ignored);
        assert_eq!(x_range, Range::new(0.0, 10.0));
    }
}
