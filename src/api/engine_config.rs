use serde::{Deserialize, Serialize};

use crate::core::{Insets, Range, TimeMode, Viewport, validate_time_pattern};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Horizontal axis flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Linear X axis over plain numbers.
    #[default]
    Xy,
    /// Time X axis over millisecond timestamps.
    Time,
}

/// Margins and color tokens. Read once when the engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default = "default_margin")]
    pub margin: Insets,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
    #[serde(default = "default_data_color")]
    pub default_data_color: Color,
    #[serde(default = "default_chart_background")]
    pub chart_background: Color,
    #[serde(default = "default_select_box_color")]
    pub select_box_color: Color,
    #[serde(default = "default_grid_color")]
    pub grid_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            label_font_size: default_label_font_size(),
            label_color: default_label_color(),
            default_data_color: default_data_color(),
            chart_background: default_chart_background(),
            select_box_color: default_select_box_color(),
            grid_color: default_grid_color(),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_select_box_color(mut self, color: Color) -> Self {
        self.select_box_color = color;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        let Insets {
            top,
            right,
            bottom,
            left,
        } = self.margin;
        if [top, right, bottom, left]
            .iter()
            .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(ChartError::InvalidConfiguration(
                "margins must be finite and >= 0".to_owned(),
            ));
        }
        if !self.label_font_size.is_finite() || self.label_font_size <= 0.0 {
            return Err(ChartError::InvalidConfiguration(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        for color in [
            self.label_color,
            self.default_data_color,
            self.chart_background,
            self.select_box_color,
            self.grid_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfiguration(err.to_string()))?;
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfiguration(format!("failed to parse style: {e}")))
    }
}

/// Engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
/// Omitted fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub kind: ChartKind,
    /// Initial X range. `None` picks `{0, 1}` for XY charts and
    /// `{now, now + 60 s}` for time charts.
    #[serde(default)]
    pub x_range: Option<Range>,
    #[serde(default)]
    pub y_range: Range,
    #[serde(default)]
    pub allow_selection: bool,
    #[serde(default)]
    pub time_mode: TimeMode,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default = "default_scatter_symbol_size")]
    pub scatter_symbol_size: f64,
}

impl ChartEngineConfig {
    /// XY chart with unit ranges.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            kind: ChartKind::Xy,
            x_range: None,
            y_range: Range::default(),
            allow_selection: false,
            time_mode: TimeMode::default(),
            time_format: default_time_format(),
            style: ChartStyle::default(),
            scatter_symbol_size: default_scatter_symbol_size(),
        }
    }

    /// Time chart over the next minute.
    #[must_use]
    pub fn time(viewport: Viewport) -> Self {
        Self::new(viewport).with_kind(ChartKind::Time)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = Some(Range::new(min, max));
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Range::new(min, max);
        self
    }

    /// Enables drag-to-select in the chart area. Plot-area drags then pan
    /// only the Y axis.
    #[must_use]
    pub fn with_selection(mut self, allow: bool) -> Self {
        self.allow_selection = allow;
        self
    }

    #[must_use]
    pub fn with_time_mode(mut self, mode: TimeMode) -> Self {
        self.time_mode = mode;
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = pattern.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_scatter_symbol_size(mut self, size: f64) -> Self {
        self.scatter_symbol_size = size;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if let Some(range) = self.x_range {
            validate_range(range, "x")?;
        }
        validate_range(self.y_range, "y")?;
        if !self.scatter_symbol_size.is_finite() || self.scatter_symbol_size <= 0.0 {
            return Err(ChartError::InvalidConfiguration(
                "scatter symbol size must be finite and > 0".to_owned(),
            ));
        }
        validate_time_pattern(&self.time_format)?;
        self.style.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfiguration(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfiguration(format!("failed to parse config: {e}")))
    }
}

fn default_margin() -> Insets {
    Insets::new(20.0, 20.0, 30.0, 50.0)
}

fn default_label_font_size() -> f64 {
    12.0
}

fn default_label_color() -> Color {
    Color::rgb(0.2, 0.2, 0.2)
}

fn default_data_color() -> Color {
    Color::rgb(0.27, 0.51, 0.71)
}

fn default_chart_background() -> Color {
    Color::WHITE
}

fn default_select_box_color() -> Color {
    Color::rgba(0.4, 0.6, 0.9, 0.3)
}

fn default_grid_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.1)
}

fn validate_range(range: Range, axis: &str) -> ChartResult<()> {
    if !range.is_finite() {
        return Err(ChartError::InvalidData(format!("{axis} range must be finite")));
    }
    if range.min > range.max {
        return Err(ChartError::InvalidData(format!(
            "{axis} range min must not exceed max"
        )));
    }
    Ok(())
}

fn default_time_format() -> String {
    "%H:%M:%S".to_owned()
}

fn default_scatter_symbol_size() -> f64 {
    2.0
}
