pub mod gesture;
pub mod selection;

use serde::{Deserialize, Serialize};

pub use gesture::{
    Axis, AxisHandle, AxisScale, GestureEvent, GestureInterpreter, GestureOutcome, GestureTarget,
    ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR, pan, pan_xy, scale, scale_around_zero, zoom_factor,
};
pub use selection::{
    IndexRange, Interval, IntervalSet, SelectionContext, SelectionEngine, SelectionEvent,
    SelectionRect, SelectionState, SelectionUpdate, ValueBand, search_intervals, shift_intervals,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// Primary button held; pointer moves pan.
    Panning,
}

/// Pointer bookkeeping shared by gestures and selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor_x: f64,
    cursor_y: f64,
    hovered: Option<GestureTarget>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor_x: 0.0,
            cursor_y: 0.0,
            hovered: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        self.mode == InteractionMode::Panning
    }

    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn hovered(self) -> Option<GestureTarget> {
        self.hovered
    }

    pub fn on_pointer_move(&mut self, target: GestureTarget, x: f64, y: f64) {
        self.cursor_x = x;
        self.cursor_y = y;
        self.hovered = Some(target);
    }

    /// Leaving the surface also ends any pan in progress.
    pub fn on_pointer_leave(&mut self) {
        self.hovered = None;
        self.mode = InteractionMode::Idle;
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
