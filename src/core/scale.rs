use serde::{Deserialize, Serialize};

use crate::core::types::Range;

/// Direction in which pixel coordinates grow relative to data values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// `min` maps to pixel `0` (horizontal axes).
    #[default]
    Forward,
    /// `min` maps to pixel `extent` (vertical axes, pixel-Y grows downward).
    Reversed,
}

/// Bidirectional mapping between a data [`Range`] and a pixel extent.
pub trait Scalable {
    fn domain(&self) -> Range;

    fn extent(&self) -> f64;

    fn to_pixel(&self, value: f64) -> f64;

    fn to_data(&self, pixel: f64) -> f64;

    /// A zero-width (or non-finite) domain or an empty extent. Such scales
    /// map everything to pixel `0` and renderers skip their ticks.
    fn is_degenerate(&self) -> bool;

    /// Data-space equivalent of a pixel movement, cancelling any offset in
    /// the mapping.
    fn data_delta(&self, pixel_movement: f64) -> f64 {
        self.to_data(pixel_movement) - self.to_data(0.0)
    }
}

/// Range mutation policy attached to a scale variant.
pub trait Zoomable {
    /// Rescales `range` by `k` around `anchor`. Returns `false` when the
    /// variant refuses the step.
    fn zoom_range(&self, range: &mut Range, k: f64, anchor: f64) -> bool {
        range.scale_around(k, anchor);
        true
    }

    fn pan_range(&self, range: &mut Range, delta: f64) {
        range.shift_back(delta);
    }
}

/// Linear scale: `to_pixel(v) = extent * (v - min) / (max - min)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Range,
    extent: f64,
    orientation: Orientation,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: Range, extent: f64, orientation: Orientation) -> Self {
        Self {
            domain,
            extent,
            orientation,
        }
    }

    #[must_use]
    pub fn horizontal(domain: Range, extent: f64) -> Self {
        Self::new(domain, extent, Orientation::Forward)
    }

    #[must_use]
    pub fn vertical(domain: Range, extent: f64) -> Self {
        Self::new(domain, extent, Orientation::Reversed)
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }
}

impl Scalable for LinearScale {
    fn domain(&self) -> Range {
        self.domain
    }

    fn extent(&self) -> f64 {
        self.extent
    }

    fn to_pixel(&self, value: f64) -> f64 {
        linear_to_pixel(self.domain, self.extent, self.orientation, value)
    }

    fn to_data(&self, pixel: f64) -> f64 {
        linear_to_data(self.domain, self.extent, self.orientation, pixel)
    }

    fn is_degenerate(&self) -> bool {
        linear_is_degenerate(self.domain, self.extent)
    }
}

impl Zoomable for LinearScale {}

pub(crate) fn linear_is_degenerate(domain: Range, extent: f64) -> bool {
    domain.is_degenerate() || !extent.is_finite() || extent <= 0.0
}

pub(crate) fn linear_to_pixel(
    domain: Range,
    extent: f64,
    orientation: Orientation,
    value: f64,
) -> f64 {
    if linear_is_degenerate(domain, extent) {
        return 0.0;
    }
    let normalized = (value - domain.min) / domain.span();
    match orientation {
        Orientation::Forward => normalized * extent,
        Orientation::Reversed => (1.0 - normalized) * extent,
    }
}

pub(crate) fn linear_to_data(
    domain: Range,
    extent: f64,
    orientation: Orientation,
    pixel: f64,
) -> f64 {
    if linear_is_degenerate(domain, extent) {
        return domain.min;
    }
    let normalized = match orientation {
        Orientation::Forward => pixel / extent,
        Orientation::Reversed => 1.0 - pixel / extent,
    };
    domain.min + normalized * domain.span()
}
