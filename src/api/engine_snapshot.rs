use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::render::Renderer;

use super::{HistoryLabel, PlotConfig, PlotEngine, SelectionState};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    pub viewport: Viewport,
    pub config: PlotConfig,
    pub selection: SelectionState,
    pub x_name: String,
    pub y_name: String,
    pub history: Vec<HistoryLabel>,
}

impl<R: Renderer> PlotEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> PlotSnapshot {
        let selection = self.selection();
        PlotSnapshot {
            viewport: self.viewport,
            config: self.config,
            selection,
            x_name: self.registry.lookup(selection.index_x).name.to_owned(),
            y_name: self.registry.lookup(selection.index_y).name.to_owned(),
            history: self.history_labels(),
        }
    }
}
