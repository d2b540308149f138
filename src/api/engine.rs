use tracing::debug;

use crate::core::{EvalState, FunctionParams, FunctionRegistry, RenderMode, Scratch, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, Renderer};

use super::validation::{
    validate_domain, validate_function_params, validate_offset, validate_plot_config,
};
use super::{HistoryEntry, HistoryLabel, HistoryList, PlotConfig, PlotEngineConfig, SelectionState};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `PlotEngine` owns the function registry, plot configuration, live
/// selection, history overlay and the evaluation state (scratch values and
/// random stream), and hands finished frames to the renderer.
pub struct PlotEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) config: PlotConfig,
    pub(super) index_x: i32,
    pub(super) index_y: i32,
    pub(super) registry: FunctionRegistry,
    pub(super) history: HistoryList,
    pub(super) eval: EvalState,
}

impl<R: Renderer> PlotEngine<R> {
    /// Creates an engine over the builtin function catalog.
    pub fn new(renderer: R, config: PlotEngineConfig) -> PlotResult<Self> {
        Self::with_registry(renderer, config, FunctionRegistry::builtin())
    }

    pub fn with_registry(
        renderer: R,
        config: PlotEngineConfig,
        registry: FunctionRegistry,
    ) -> PlotResult<Self> {
        config.validate()?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            functions = registry.len(),
            "plot engine init"
        );
        Ok(Self {
            renderer,
            viewport: config.viewport,
            config: config.plot,
            index_x: config.index_x,
            index_y: config.index_y,
            registry,
            history: HistoryList::default(),
            eval: EvalState::default(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> PlotResult<()> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> PlotConfig {
        self.config
    }

    pub fn set_config(&mut self, config: PlotConfig) -> PlotResult<()> {
        validate_plot_config(&config)?;
        debug!(?config, "set plot config");
        self.config = config;
        Ok(())
    }

    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) -> PlotResult<()> {
        validate_offset(offset_x, offset_y)?;
        self.config.offset_x = offset_x;
        self.config.offset_y = offset_y;
        Ok(())
    }

    pub fn set_domain(&mut self, count: i32, scale: i32) -> PlotResult<()> {
        validate_domain(count, scale)?;
        debug!(count, scale, "set sample domain");
        self.config.count = count;
        self.config.scale = scale;
        Ok(())
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        debug!(?mode, "set render mode");
        self.config.render_mode = mode;
    }

    /// Sets the render mode from its UI index (`0..=3`).
    pub fn set_render_mode_index(&mut self, index: i32) -> PlotResult<()> {
        self.set_render_mode(RenderMode::try_from(index)?);
        Ok(())
    }

    pub fn set_function_params(&mut self, params: FunctionParams) -> PlotResult<()> {
        validate_function_params(params)?;
        debug!(
            mean = params.mean,
            variance = params.variance,
            balance = params.balance,
            "set function params"
        );
        self.config.params = params;
        Ok(())
    }

    pub fn set_colors(&mut self, background: Color, grid: Color) -> PlotResult<()> {
        background.validate()?;
        grid.validate()?;
        self.config.background = background;
        self.config.grid = grid;
        Ok(())
    }

    pub fn set_foreground(&mut self, color: Color) -> PlotResult<()> {
        color.validate()?;
        self.config.foreground = color;
        Ok(())
    }

    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn function_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    /// Live selection: current indices plus the foreground color.
    #[must_use]
    pub fn selection(&self) -> SelectionState {
        SelectionState::new(self.index_x, self.index_y, self.config.foreground)
    }

    /// Stores raw indices; out-of-range values resolve to entry 0 at lookup.
    pub fn set_selection_indices(&mut self, index_x: i32, index_y: i32) {
        debug!(index_x, index_y, "set function selection");
        self.index_x = index_x;
        self.index_y = index_y;
    }

    pub fn set_selection(&mut self, selection: SelectionState) -> PlotResult<()> {
        self.set_foreground(selection.color)?;
        self.set_selection_indices(selection.index_x, selection.index_y);
        Ok(())
    }

    /// Selects functions by display name.
    pub fn select_by_name(&mut self, x_name: &str, y_name: &str) -> PlotResult<()> {
        let resolve = |name: &str| {
            self.registry
                .index_of(name)
                .and_then(|index| i32::try_from(index).ok())
                .ok_or_else(|| PlotError::InvalidData(format!("unknown function `{name}`")))
        };
        let index_x = resolve(x_name)?;
        let index_y = resolve(y_name)?;
        self.set_selection_indices(index_x, index_y);
        Ok(())
    }

    /// Records the live selection as a new history entry.
    pub fn record_history(&mut self) -> usize {
        let selection = self.selection();
        let index = self.history.record(selection);
        debug!(
            index,
            index_x = selection.index_x,
            index_y = selection.index_y,
            "record history entry"
        );
        index
    }

    /// Removes a history entry; out-of-bounds indices leave history untouched.
    pub fn remove_history(&mut self, index: usize) -> Option<HistoryEntry> {
        let removed = self.history.remove_at(index);
        if removed.is_none() {
            debug!(index, len = self.history.len(), "ignore out-of-bounds history removal");
        } else {
            debug!(index, "remove history entry");
        }
        removed
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    #[must_use]
    pub fn history_labels(&self) -> Vec<HistoryLabel> {
        self.history
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryLabel {
                index,
                x_name: self.registry.lookup(entry.index_x()).name.to_owned(),
                y_name: self.registry.lookup(entry.index_y()).name.to_owned(),
                color: entry.color(),
            })
            .collect()
    }

    #[must_use]
    pub fn scratch(&self) -> Scratch {
        self.eval.scratch
    }

    /// Restarts the shared random stream so subsequent frames are reproducible.
    pub fn reseed_random(&mut self, seed: u64) {
        debug!(seed, "reseed random stream");
        self.eval.random.reseed(seed);
    }

    pub fn render(&mut self) -> PlotResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context of `width` x `height` pixels.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        width: f64,
        height: f64,
    ) -> PlotResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer
            .render_on_cairo_context(context, width, height, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
