mod engine;
mod engine_snapshot;
mod history;
mod json_contract;
mod plot_config;
mod render_frame_builder;
mod validation;

pub use engine::PlotEngine;
pub use engine_snapshot::PlotSnapshot;
pub use history::{HistoryEntry, HistoryLabel, HistoryList, SelectionState};
pub use json_contract::{PLOT_SNAPSHOT_JSON_SCHEMA_V1, PlotSnapshotJsonContractV1};
pub use plot_config::{PlotConfig, PlotEngineConfig};
pub use validation::{COUNT_RANGE, OFFSET_RANGE, PARAM_RANGE, SCALE_RANGE};
