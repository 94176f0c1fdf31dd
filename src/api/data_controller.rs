use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DataPoint, Series, SeriesKind};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Renderer};

use super::{ChartEngine, PluginEvent};

/// Name/color pair for a legend widget, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub kind: SeriesKind,
    pub color: Color,
}

impl<R: Renderer> ChartEngine<R> {
    /// Adds a series, or overwrites kind, points and color of the series
    /// with the same name in place. Returns `true` when a series was
    /// replaced.
    pub fn add_or_replace_series(
        &mut self,
        name: impl Into<String>,
        kind: SeriesKind,
        points: Vec<DataPoint>,
        color: Color,
    ) -> ChartResult<bool> {
        let series = checked_series(name.into(), kind, points, color)?;
        let name = series.name.clone();
        let points_len = series.points.len();
        let replaced = self.series.add_or_replace(series);
        debug!(series = %name, count = points_len, replaced, "add or replace series");
        self.emit_plugin_event(PluginEvent::SeriesUpdated { name, points_len });
        Ok(replaced)
    }

    /// Same as [`ChartEngine::add_or_replace_series`] with the style's
    /// default data color.
    pub fn add_series(
        &mut self,
        name: impl Into<String>,
        kind: SeriesKind,
        points: Vec<DataPoint>,
    ) -> ChartResult<bool> {
        let color = self.style.default_data_color;
        self.add_or_replace_series(name, kind, points, color)
    }

    /// Overwrites the first series whatever its name.
    pub fn set_data(
        &mut self,
        name: impl Into<String>,
        kind: SeriesKind,
        points: Vec<DataPoint>,
        color: Color,
    ) -> ChartResult<()> {
        let series = checked_series(name.into(), kind, points, color)?;
        let name = series.name.clone();
        let points_len = series.points.len();
        self.series.set_first(series);
        debug!(series = %name, count = points_len, "set first series");
        self.emit_plugin_event(PluginEvent::SeriesUpdated { name, points_len });
        Ok(())
    }

    pub fn remove_series(&mut self, name: &str) -> Option<Series> {
        let removed = self.series.remove(name)?;
        debug!(series = %name, "remove series");
        self.emit_plugin_event(PluginEvent::SeriesRemoved {
            name: name.to_owned(),
        });
        Some(removed)
    }

    pub fn clear_series(&mut self) {
        let names: Vec<String> = self.series.iter().map(|series| series.name.clone()).collect();
        self.series.clear();
        self.selection.clear();
        for name in names {
            self.emit_plugin_event(PluginEvent::SeriesRemoved { name });
        }
    }

    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    #[must_use]
    pub fn first_series(&self) -> Option<&Series> {
        self.series.first()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series_iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|series| LegendEntry {
                name: series.name.clone(),
                kind: series.kind,
                color: series.color,
            })
            .collect()
    }
}

fn checked_series(
    name: String,
    kind: SeriesKind,
    points: Vec<DataPoint>,
    color: Color,
) -> ChartResult<Series> {
    if name.is_empty() {
        return Err(ChartError::InvalidData(
            "series name must not be empty".to_owned(),
        ));
    }
    if let Some(index) = points.iter().position(|point| !point.is_finite()) {
        return Err(ChartError::InvalidData(format!(
            "series `{name}` has a non-finite point at index {index}"
        )));
    }
    color.validate()?;
    Ok(Series::new(name, kind, points, color))
}
