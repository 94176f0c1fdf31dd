use tracing::trace;

use crate::interaction::{
    Axis, AxisHandle, GestureEvent, GestureOutcome, GestureTarget, InteractionMode, Interval,
    SelectionContext, SelectionEvent, SelectionRect, SelectionState, SelectionUpdate,
};
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Primary button pressed on a pannable region.
    pub fn pan_start(&mut self) {
        self.interaction.on_pan_start();
        self.emit_plugin_event(PluginEvent::PanStarted);
    }

    pub fn pan_end(&mut self) {
        if self.interaction.is_panning() {
            self.interaction.on_pan_end();
            self.emit_plugin_event(PluginEvent::PanEnded);
        }
    }

    /// Pointer left the drawing surface.
    pub fn pointer_leave(&mut self) {
        let was_panning = self.interaction.is_panning();
        self.interaction.on_pointer_leave();
        if was_panning {
            self.emit_plugin_event(PluginEvent::PanEnded);
        }
    }

    #[must_use]
    pub fn allow_selection(&self) -> bool {
        self.gestures.allow_selection()
    }

    /// Turning selection off also drops the current rectangle.
    pub fn set_allow_selection(&mut self, allow: bool) {
        self.gestures.set_allow_selection(allow);
        if !allow {
            self.selection.clear();
        }
    }

    /// Applies one wheel or pointer-move event delivered to `target`.
    ///
    /// Never fails: unknown events are ignored, refused zoom steps leave the
    /// ranges untouched, and renderer errors during the follow-up redraw are
    /// logged.
    pub fn on_gesture(&mut self, target: GestureTarget, event: &GestureEvent) -> GestureOutcome {
        match event {
            GestureEvent::Wheel {
                offset_x, offset_y, ..
            } => self.interaction.on_pointer_move(target, *offset_x, *offset_y),
            GestureEvent::PointerMove {
                movement_x,
                movement_y,
            } => {
                let (x, y) = self.interaction.cursor();
                self.interaction
                    .on_pointer_move(target, x + movement_x, y + movement_y);
            }
            GestureEvent::Other { .. } => {}
        }

        let x_scale = self.x_scale();
        let y_scale = self.y_scale();
        let outcome = self.gestures.interpret(
            target,
            event,
            self.interaction.is_panning(),
            AxisHandle {
                range: &mut self.x_range,
                scale: &x_scale,
            },
            AxisHandle {
                range: &mut self.y_range,
                scale: &y_scale,
            },
        );

        if let GestureOutcome::Handled {
            x_changed,
            y_changed,
        } = outcome
        {
            trace!(?target, x_changed, y_changed, "gesture handled");
            if x_changed {
                self.emit_range_changed(Axis::X);
            }
            if y_changed {
                self.emit_range_changed(Axis::Y);
            }
            if x_changed || y_changed {
                self.redraw();
            }
        }
        outcome
    }

    #[must_use]
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn selection_rect(&self) -> SelectionRect {
        self.selection.rect()
    }

    /// Runs found the last time the rectangle was defined or grabbed.
    #[must_use]
    pub fn selection_intervals(&self) -> &[Interval] {
        self.selection.intervals()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selection pointer handlers take chart-area pixels.
    pub fn selection_pointer_down(&mut self, x: f64, y: f64) -> SelectionUpdate {
        self.dispatch_selection(SelectionEvent::PointerDown { x, y })
    }

    pub fn selection_pointer_drag(&mut self, x: f64, y: f64) -> SelectionUpdate {
        self.dispatch_selection(SelectionEvent::PointerDrag { x, y })
    }

    pub fn selection_pointer_up(&mut self, x: f64, y: f64) -> SelectionUpdate {
        self.dispatch_selection(SelectionEvent::PointerUp { x, y })
    }

    /// Pointer capture lost mid-gesture. The rectangle settles in its last
    /// known position.
    pub fn selection_cancel(&mut self) -> SelectionUpdate {
        self.dispatch_selection(SelectionEvent::Cancel)
    }

    fn dispatch_selection(&mut self, event: SelectionEvent) -> SelectionUpdate {
        if !self.gestures.allow_selection() {
            return SelectionUpdate::Ignored;
        }

        let x_scale = self.x_scale();
        let y_scale = self.y_scale();
        let update = self.selection.handle(
            event,
            SelectionContext {
                x_scale: &x_scale,
                y_scale: &y_scale,
                points: self.series.first_mut().map(|series| &mut series.points),
            },
        );

        match update {
            SelectionUpdate::Defined { intervals } => {
                self.emit_plugin_event(PluginEvent::SelectionDefined { intervals });
            }
            SelectionUpdate::Moved { delta } => {
                self.emit_plugin_event(PluginEvent::SelectionMoved { delta });
            }
            SelectionUpdate::Released => {
                self.emit_plugin_event(PluginEvent::SelectionReleased);
            }
            _ => {}
        }
        if update.is_visible_change() {
            self.redraw();
        }
        update
    }
}
