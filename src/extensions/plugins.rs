use serde::{Deserialize, Serialize};

use crate::core::{Range, Viewport};
use crate::interaction::{Axis, InteractionMode, SelectionState};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub x_range: Range,
    pub y_range: Range,
    pub series_count: usize,
    pub interaction_mode: InteractionMode,
    pub selection_state: SelectionState,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    SeriesUpdated { name: String, points_len: usize },
    SeriesRemoved { name: String },
    RangeChanged { axis: Axis, min: f64, max: f64 },
    SelectionDefined { intervals: usize },
    SelectionMoved { delta: f64 },
    SelectionReleased,
    PanStarted,
    PanEnded,
    Rendered,
}

/// Observer hook. Plugins see events and a context snapshot but never the
/// engine itself.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
