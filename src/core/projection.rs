//! Series-to-pixel geometry.
//!
//! Every projection applies the same "defined" filter: a point takes part
//! only when `x - origin` lies inside the visible X range. `origin` is the
//! first sample's timestamp for relative time charts and `0` otherwise.

use serde::{Deserialize, Serialize};

use crate::core::scale::Scalable;
use crate::core::types::{DataPoint, Range};

/// Pixel-space vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projected bar, anchored at the zero line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Closed polygon between a run of samples and the zero line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub polygon: Vec<Vertex>,
}

/// Shared inputs of all projections.
#[derive(Clone, Copy)]
pub struct ProjectionContext<'a> {
    pub x_scale: &'a dyn Scalable,
    pub y_scale: &'a dyn Scalable,
    pub x_range: Range,
    pub y_range: Range,
    pub origin: f64,
}

impl ProjectionContext<'_> {
    #[must_use]
    pub fn is_defined(&self, point: &DataPoint) -> bool {
        self.x_range.contains(point.x - self.origin)
    }

    #[must_use]
    pub fn project(&self, point: &DataPoint) -> Vertex {
        Vertex {
            x: self.x_scale.to_pixel(point.x - self.origin),
            y: self.y_scale.to_pixel(point.y),
        }
    }

    /// Consecutive runs of defined points, projected.
    fn defined_runs(&self, points: &[DataPoint]) -> Vec<Vec<Vertex>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for point in points {
            if self.is_defined(point) {
                current.push(self.project(point));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// Segments between adjacent defined points; undefined points break the line.
#[must_use]
pub fn project_line_segments(points: &[DataPoint], ctx: ProjectionContext<'_>) -> Vec<LineSegment> {
    let mut segments = Vec::new();
    for run in ctx.defined_runs(points) {
        for pair in run.windows(2) {
            segments.push(LineSegment {
                x1: pair[0].x,
                y1: pair[0].y,
                x2: pair[1].x,
                y2: pair[1].y,
            });
        }
    }
    segments
}

/// Bars centred on each defined sample. The bar width is the pixel distance
/// between the first two samples, so at least two points are required.
#[must_use]
pub fn project_bars(points: &[DataPoint], ctx: ProjectionContext<'_>) -> Vec<BarGeometry> {
    if points.len() < 2 {
        return Vec::new();
    }

    let width = ctx.x_scale.to_pixel(points[1].x - ctx.origin)
        - ctx.x_scale.to_pixel(points[0].x - ctx.origin);
    let zero_y = ctx.y_scale.to_pixel(0.0);

    points
        .iter()
        .filter(|point| ctx.is_defined(point))
        .map(|point| {
            let vertex = ctx.project(point);
            BarGeometry {
                x: vertex.x - width / 2.0,
                y: vertex.y.min(zero_y),
                width,
                height: (vertex.y - zero_y).abs(),
            }
        })
        .collect()
}

/// Dot centres for samples inside both visible ranges.
#[must_use]
pub fn project_scatter(points: &[DataPoint], ctx: ProjectionContext<'_>) -> Vec<Vertex> {
    points
        .iter()
        .filter(|point| ctx.is_defined(point) && ctx.y_range.contains(point.y))
        .map(|point| ctx.project(point))
        .collect()
}

/// One polygon per run of defined samples, closed against the zero line.
#[must_use]
pub fn project_areas(points: &[DataPoint], ctx: ProjectionContext<'_>) -> Vec<AreaGeometry> {
    let zero_y = ctx.y_scale.to_pixel(0.0);
    ctx.defined_runs(points)
        .into_iter()
        .map(|run| {
            let first_x = run[0].x;
            let last_x = run[run.len() - 1].x;
            let mut polygon = Vec::with_capacity(run.len() + 3);
            polygon.push(Vertex {
                x: first_x,
                y: zero_y,
            });
            polygon.extend(run);
            polygon.push(Vertex {
                x: last_x,
                y: zero_y,
            });
            polygon.push(Vertex {
                x: first_x,
                y: zero_y,
            });
            AreaGeometry { polygon }
        })
        .collect()
}
