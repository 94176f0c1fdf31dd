use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::DataPoint;
use crate::render::Color;

/// Primitive family used to draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Scatter,
    Area,
}

/// Named, ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<DataPoint>,
    pub color: Color,
}

impl Series {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: SeriesKind,
        points: Vec<DataPoint>,
        color: Color,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
            color,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Series keyed by name; insertion order is the drawing (z) order.
///
/// Replacing an existing name keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    series: IndexMap<String, Series>,
}

impl SeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `series`, or overwrites kind, points and colour of the series
    /// with the same name. Returns `true` when a series was replaced.
    pub fn add_or_replace(&mut self, series: Series) -> bool {
        match self.series.get_mut(&series.name) {
            Some(existing) => {
                existing.kind = series.kind;
                existing.points = series.points;
                existing.color = series.color;
                true
            }
            None => {
                self.series.insert(series.name.clone(), series);
                false
            }
        }
    }

    /// Overwrites the first series (or inserts one into an empty store).
    pub fn set_first(&mut self, series: Series) {
        if self.series.is_empty() {
            self.series.insert(series.name.clone(), series);
            return;
        }
        let key = series.name.clone();
        self.series.shift_remove_index(0);
        self.series.shift_insert(0, key, series);
    }

    pub fn remove(&mut self, name: &str) -> Option<Series> {
        self.series.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Series> {
        self.series.get_mut(name)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Series> {
        self.series.first().map(|(_, series)| series)
    }

    pub fn first_mut(&mut self) -> Option<&mut Series> {
        self.series.first_mut().map(|(_, series)| series)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// True when the first series exists and holds at least one point.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.first().is_some_and(|series| !series.is_empty())
    }

    /// Opacity of bars drawn on top of `len() - 1` other series.
    #[must_use]
    pub fn bar_opacity(&self) -> f64 {
        let stacked = self.series.len().saturating_sub(1) as f64;
        (1.0 - stacked * 0.1).clamp(0.0, 1.0)
    }
}
