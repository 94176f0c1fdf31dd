use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginContext};
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Registers an observer. Ids must be non-empty and unique.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let id = plugin.id();
        if id.is_empty() {
            return Err(ChartError::InvalidData("plugin id must not be empty".to_owned()));
        }
        if self.plugins.iter().any(|entry| entry.id() == id) {
            return Err(ChartError::InvalidData(format!(
                "plugin `{id}` is already registered"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Returns `true` when a plugin with `id` was removed.
    pub fn unregister_plugin(&mut self, id: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|entry| entry.id() != id);
        self.plugins.len() != before
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = PluginContext {
            viewport: self.viewport,
            x_range: self.x_range,
            y_range: self.y_range,
            series_count: self.series.len(),
            interaction_mode: self.interaction.mode(),
            selection_state: self.selection.state(),
        };
        for plugin in &mut self.plugins {
            plugin.on_event(&event, context);
        }
    }
}
