use crate::error::{PlotError, PlotResult};
use crate::render::{Color, RenderFrame, Renderer};

/// Transform-scoped immediate-mode drawing context provided by the host.
///
/// Vertices are in normalized orthographic space: `(0, 0)` bottom-left,
/// `(1, 1)` top-right. Every `begin_*` is closed by exactly one `end`.
pub trait ImmediateSurface {
    fn push_ortho(&mut self) -> PlotResult<()>;
    fn pop_matrix(&mut self) -> PlotResult<()>;
    fn begin_lines(&mut self) -> PlotResult<()>;
    fn begin_quads(&mut self) -> PlotResult<()>;
    fn set_color(&mut self, color: Color) -> PlotResult<()>;
    fn emit_vertex(&mut self, x: f64, y: f64, z: f64) -> PlotResult<()>;
    fn end(&mut self) -> PlotResult<()>;
}

/// Replays a `RenderFrame` onto an `ImmediateSurface`.
///
/// Each curve layer becomes its own lines batch, including empty ones, so
/// the surface sees one batch per history entry plus one for the live curve.
#[derive(Debug, Default)]
pub struct ImmediateRenderer<S: ImmediateSurface> {
    surface: S,
}

impl<S: ImmediateSurface> ImmediateRenderer<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: ImmediateSurface> Renderer for ImmediateRenderer<S> {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        let surface = &mut self.surface;
        surface.push_ortho()?;

        if !frame.quads.is_empty() {
            surface.begin_quads()?;
            for quad in &frame.quads {
                surface.set_color(quad.color)?;
                for (x, y) in quad.corners() {
                    surface.emit_vertex(x, y, 0.0)?;
                }
            }
            surface.end()?;
        }

        if !frame.grid_lines.is_empty() {
            surface.begin_lines()?;
            for line in &frame.grid_lines {
                surface.set_color(line.color)?;
                surface.emit_vertex(line.x1, line.y1, 0.0)?;
                surface.emit_vertex(line.x2, line.y2, 0.0)?;
            }
            surface.end()?;
        }

        for layer in &frame.layers {
            surface.begin_lines()?;
            surface.set_color(layer.color)?;
            for line in &layer.lines {
                surface.emit_vertex(line.x1, line.y1, 0.0)?;
                surface.emit_vertex(line.x2, line.y2, 0.0)?;
            }
            surface.end()?;
        }

        surface.pop_matrix()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Lines,
    Quads,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    PushOrtho,
    PopMatrix,
    Begin(BatchKind),
    SetColor(Color),
    Vertex { x: f64, y: f64, z: f64 },
    End,
}

/// Surface that records calls and enforces batch/transform pairing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    open_batch: Option<BatchKind>,
    matrix_depth: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn batch_count(&self, kind: BatchKind) -> usize {
        self.commands
            .iter()
            .filter(|command| **command == SurfaceCommand::Begin(kind))
            .count()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, SurfaceCommand::Vertex { .. }))
            .count()
    }

    /// Color set first in each lines batch, in submission order.
    #[must_use]
    pub fn line_batch_colors(&self) -> Vec<Color> {
        self.commands
            .windows(2)
            .filter_map(|pair| match pair {
                [SurfaceCommand::Begin(BatchKind::Lines), SurfaceCommand::SetColor(color)] => {
                    Some(*color)
                }
                _ => None,
            })
            .collect()
    }

    fn begin(&mut self, kind: BatchKind) -> PlotResult<()> {
        if self.open_batch.is_some() {
            return Err(PlotError::Backend("nested begin on surface".to_owned()));
        }
        self.open_batch = Some(kind);
        self.commands.push(SurfaceCommand::Begin(kind));
        Ok(())
    }
}

impl ImmediateSurface for RecordingSurface {
    fn push_ortho(&mut self) -> PlotResult<()> {
        self.matrix_depth += 1;
        self.commands.push(SurfaceCommand::PushOrtho);
        Ok(())
    }

    fn pop_matrix(&mut self) -> PlotResult<()> {
        if self.matrix_depth == 0 {
            return Err(PlotError::Backend("matrix stack underflow".to_owned()));
        }
        self.matrix_depth -= 1;
        self.commands.push(SurfaceCommand::PopMatrix);
        Ok(())
    }

    fn begin_lines(&mut self) -> PlotResult<()> {
        self.begin(BatchKind::Lines)
    }

    fn begin_quads(&mut self) -> PlotResult<()> {
        self.begin(BatchKind::Quads)
    }

    fn set_color(&mut self, color: Color) -> PlotResult<()> {
        self.commands.push(SurfaceCommand::SetColor(color));
        Ok(())
    }

    fn emit_vertex(&mut self, x: f64, y: f64, z: f64) -> PlotResult<()> {
        if self.open_batch.is_none() {
            return Err(PlotError::Backend("vertex emitted outside a batch".to_owned()));
        }
        self.commands.push(SurfaceCommand::Vertex { x, y, z });
        Ok(())
    }

    fn end(&mut self) -> PlotResult<()> {
        if self.open_batch.take().is_none() {
            return Err(PlotError::Backend("end without begin".to_owned()));
        }
        self.commands.push(SurfaceCommand::End);
        Ok(())
    }
}
