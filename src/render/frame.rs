use serde::{Deserialize, Serialize};

use crate::core::{SamplerStats, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, LinePrimitive, QuadPrimitive};

/// Which pass of the history overlay produced a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerSource {
    History(usize),
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurveLayerStats {
    pub sampler: SamplerStats,
    /// Segments rejected by the bounding test.
    pub culled: usize,
    /// Segments whose mapped coordinates overflowed to non-finite values.
    pub overflowed: usize,
    pub emitted: usize,
}

/// Lines produced by one sampler pass, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveLayer {
    pub source: LayerSource,
    pub index_x: i32,
    pub index_y: i32,
    pub color: Color,
    pub lines: Vec<LinePrimitive>,
    pub stats: CurveLayerStats,
}

impl CurveLayer {
    #[must_use]
    pub fn new(source: LayerSource, index_x: i32, index_y: i32, color: Color) -> Self {
        Self {
            source,
            index_x,
            index_y,
            color,
            lines: Vec::new(),
            stats: CurveLayerStats::default(),
        }
    }
}

/// Backend-agnostic scene for one plot draw pass.
///
/// Draw order is: quads, grid lines, then curve layers in vector order
/// (history entries first, live curve last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub quads: Vec<QuadPrimitive>,
    pub grid_lines: Vec<LinePrimitive>,
    pub layers: Vec<CurveLayer>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            quads: Vec::new(),
            grid_lines: Vec::new(),
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_quad(mut self, quad: QuadPrimitive) -> Self {
        self.quads.push(quad);
        self
    }

    #[must_use]
    pub fn with_grid_line(mut self, line: LinePrimitive) -> Self {
        self.grid_lines.push(line);
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: CurveLayer) -> Self {
        self.layers.push(layer);
        self
    }

    #[must_use]
    pub fn curve_line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn live_layer(&self) -> Option<&CurveLayer> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.source == LayerSource::Live)
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for quad in &self.quads {
            quad.validate()?;
        }
        for line in &self.grid_lines {
            line.validate()?;
        }
        for layer in &self.layers {
            layer.color.validate()?;
            for line in &layer.lines {
                line.validate()?;
            }
        }

        Ok(())
    }
}
