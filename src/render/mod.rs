mod frame;
mod immediate;
mod null_renderer;
mod primitives;

pub use frame::{CurveLayer, CurveLayerStats, LayerSource, RenderFrame};
pub use immediate::{
    BatchKind, ImmediateRenderer, ImmediateSurface, RecordingSurface, SurfaceCommand,
};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, QuadPrimitive};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from function evaluation and history bookkeeping.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
