mod axis_label_format;
mod data_controller;
mod engine;
mod engine_config;
mod interaction_controller;
mod plugin_hooks;
mod render_frame_builder;
mod scale_coordinator;
mod time_scale_controller;

pub use data_controller::LegendEntry;
pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, ChartKind, ChartStyle};
pub use scale_coordinator::XScale;

pub use crate::extensions::PluginEvent;
