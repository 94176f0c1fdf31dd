//! chart-select-rs: interactive 2-D chart engine.
//!
//! Maps data ranges to pixels (linear and time scales), turns wheel and
//! drag gestures into zoom/pan range mutations, and lets users draw a
//! selection rectangle whose enclosed runs of points can be dragged
//! vertically as a batch. Painting is left to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartKind, ChartStyle};
pub use error::{ChartError, ChartResult};
