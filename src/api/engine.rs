use chrono::Utc;
use tracing::{debug, warn};

use crate::core::{Range, SeriesStore, TimeMode, Viewport};
use crate::error::ChartResult;
use crate::extensions::ChartPlugin;
use crate::interaction::{GestureInterpreter, InteractionState, SelectionEngine};
use crate::render::Renderer;

use super::{ChartEngineConfig, ChartKind, ChartStyle, PluginEvent};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the two axis ranges, the series store, gesture and
/// selection state, and the renderer. Scales are never stored: every read
/// derives them from the live ranges.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) kind: ChartKind,
    pub(super) style: ChartStyle,
    pub(super) x_range: Range,
    pub(super) y_range: Range,
    pub(super) series: SeriesStore,
    pub(super) time_mode: TimeMode,
    pub(super) time_format: String,
    pub(super) x_label: String,
    pub(super) y_label: String,
    pub(super) scatter_symbol_size: f64,
    pub(super) interaction: InteractionState,
    pub(super) gestures: GestureInterpreter,
    pub(super) selection: SelectionEngine,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;

        let x_range = config.x_range.unwrap_or_else(|| match config.kind {
            ChartKind::Xy => Range::default(),
            ChartKind::Time => {
                let now = Utc::now().timestamp_millis() as f64;
                Range::new(now, now + 60_000.0)
            }
        });
        debug!(
            kind = ?config.kind,
            width = config.viewport.width,
            height = config.viewport.height,
            x_min = x_range.min,
            x_max = x_range.max,
            "create chart engine"
        );

        Ok(Self {
            renderer,
            viewport: config.viewport,
            kind: config.kind,
            style: config.style,
            x_range,
            y_range: config.y_range,
            series: SeriesStore::new(),
            time_mode: config.time_mode,
            time_format: config.time_format,
            x_label: String::new(),
            y_label: String::new(),
            scatter_symbol_size: config.scatter_symbol_size,
            interaction: InteractionState::default(),
            gestures: GestureInterpreter::new(config.style.margin, config.allow_selection),
            selection: SelectionEngine::new(),
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.style
    }

    /// Chart-area size in pixels (viewport minus margins).
    #[must_use]
    pub fn chart_area(&self) -> (f64, f64) {
        self.style.margin.inner_extent(self.viewport)
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    #[must_use]
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    #[must_use]
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Builds the frame for the current state and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    // Redraw after a gesture. Failures never cross the gesture boundary.
    pub(super) fn redraw(&mut self) {
        if let Err(err) = self.render() {
            warn!(error = %err, "redraw after interaction failed");
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
