use std::iter;

use tracing::trace;

use crate::core::{CurveSampler, EvalState, FunctionRegistry, ViewportMapper, is_culled};
use crate::error::PlotResult;
use crate::render::{
    CurveLayer, LayerSource, LinePrimitive, QuadPrimitive, RenderFrame, Renderer,
};

use super::{PlotConfig, PlotEngine, SelectionState};

impl<R: Renderer> PlotEngine<R> {
    /// Builds the full frame: backdrop, one layer per history entry in
    /// insertion order, then the live curve on top.
    ///
    /// The live selection is captured once up front and each history entry
    /// is replayed from its own snapshot, so engine selection state is never
    /// touched. Only the scratch values and random stream advance.
    pub fn build_render_frame(&mut self) -> PlotResult<RenderFrame> {
        let config = self.config;
        let mapper = ViewportMapper::new(
            self.viewport,
            config.scale,
            config.offset_x,
            config.offset_y,
        )?;

        let mut frame = RenderFrame::new(self.viewport)
            .with_quad(QuadPrimitive::full(config.background))
            .with_grid_line(LinePrimitive::new(
                0.0,
                config.offset_y,
                1.0,
                config.offset_y,
                config.grid,
            ))
            .with_grid_line(LinePrimitive::new(
                config.offset_x,
                0.0,
                config.offset_x,
                1.0,
                config.grid,
            ));

        let live = self.selection();
        let passes = self
            .history
            .iter()
            .enumerate()
            .map(|(index, entry)| (LayerSource::History(index), entry.selection()))
            .chain(iter::once((LayerSource::Live, live)));

        for (source, selection) in passes {
            let layer = project_curve_layer(
                &self.registry,
                &config,
                &mut self.eval,
                mapper,
                source,
                selection,
            );
            frame.layers.push(layer);
        }

        trace!(
            layers = frame.layers.len(),
            lines = frame.curve_line_count(),
            "built render frame"
        );
        Ok(frame)
    }

    /// Samples a single selection with the current configuration.
    ///
    /// `source` is stored on the returned layer as given; pass
    /// `LayerSource::History(i)` when projecting a recorded entry.
    pub fn project_curve(
        &mut self,
        source: LayerSource,
        selection: SelectionState,
    ) -> PlotResult<CurveLayer> {
        let mapper = ViewportMapper::new(
            self.viewport,
            self.config.scale,
            self.config.offset_x,
            self.config.offset_y,
        )?;
        Ok(project_curve_layer(
            &self.registry,
            &self.config,
            &mut self.eval,
            mapper,
            source,
            selection,
        ))
    }
}

/// Runs sampler, mapper and culler for one selection.
fn project_curve_layer(
    registry: &FunctionRegistry,
    config: &PlotConfig,
    eval: &mut EvalState,
    mapper: ViewportMapper,
    source: LayerSource,
    selection: SelectionState,
) -> CurveLayer {
    let mut layer = CurveLayer::new(
        source,
        selection.index_x,
        selection.index_y,
        selection.color,
    );
    let mut sampler = CurveSampler::new(
        registry,
        selection.index_x,
        selection.index_y,
        config.domain(),
        &config.params,
        eval,
    );

    for segment in sampler.by_ref() {
        let shaped = mapper.shape(segment, config.render_mode);
        if !shaped.is_finite() {
            layer.stats.overflowed += 1;
            continue;
        }
        if is_culled(shaped) {
            layer.stats.culled += 1;
            continue;
        }
        layer.lines.push(LinePrimitive::new(
            shaped.x1,
            shaped.y1,
            shaped.x2,
            shaped.y2,
            selection.color,
        ));
    }

    layer.stats.sampler = sampler.stats();
    layer.stats.emitted = layer.lines.len();
    trace!(
        ?source,
        evaluated = layer.stats.sampler.evaluated,
        discarded = layer.stats.sampler.discarded,
        culled = layer.stats.culled,
        emitted = layer.stats.emitted,
        "projected curve layer"
    );
    layer
}
