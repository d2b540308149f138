use std::io::Write;

use cairo::{Context, Format, ImageSurface};

use crate::error::{PlotError, PlotResult};
use crate::render::{Color, RenderFrame, Renderer};

const LINE_WIDTH_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub quads_drawn: usize,
    pub lines_drawn: usize,
    pub layers_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        width: f64,
        height: f64,
        frame: &RenderFrame,
    ) -> PlotResult<()>;
}

/// Cairo renderer backend.
///
/// Normalized frame coordinates are stretched over the target area with the
/// Y axis flipped, so `(0, 0)` lands in the bottom-left corner.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the current surface as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> PlotResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| PlotError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        width: f64,
        height: f64,
        frame: &RenderFrame,
    ) -> PlotResult<()> {
        frame.validate()?;

        let to_px = |x: f64, y: f64| (x * width, (1.0 - y) * height);
        let mut stats = CairoRenderStats::default();

        for quad in &frame.quads {
            let (left, top) = to_px(quad.x, quad.y + quad.height);
            apply_color(context, quad.color);
            context.rectangle(left, top, quad.width * width, quad.height * height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill quad", err))?;
            stats.quads_drawn += 1;
        }

        context.set_line_width(LINE_WIDTH_PX);
        let grid = frame.grid_lines.iter();
        let curves = frame.layers.iter().flat_map(|layer| layer.lines.iter());
        for line in grid.chain(curves) {
            let (x1, y1) = to_px(line.x1, line.y1);
            let (x2, y2) = to_px(line.x2, line.y2);
            apply_color(context, line.color);
            context.move_to(x1, y1);
            context.line_to(x2, y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        stats.layers_drawn = frame.layers.len();

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());
        self.render_with_context(&context, width, height, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        width: f64,
        height: f64,
        frame: &RenderFrame,
    ) -> PlotResult<()> {
        self.render_with_context(context, width, height, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::Backend(format!("{prefix}: {err}"))
}
