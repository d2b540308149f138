use serde::{Deserialize, Serialize};

use crate::core::sampler::CurveSegment;
use crate::core::types::Viewport;
use crate::error::{PlotError, PlotResult};

/// Normalized draw-space center used by vector mode.
pub const VIEWPORT_CENTER: (f64, f64) = (0.5, 0.5);
/// Normalized horizontal mid-line used by integral mode.
pub const VIEWPORT_MID_LINE: f64 = 0.5;

/// How each sampled pair is turned into a drawn segment.
///
/// `Point`, `Vector` and `Integral` shape only the first sample of a pair.
/// The last sample of every run is never drawn in those modes, so a run of
/// one isolated sample leaves no mark at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Connects consecutive samples.
    #[default]
    Line,
    /// Near-zero-length tick at each sample.
    Point,
    /// Spoke from each sample to the viewport center.
    Vector,
    /// Vertical bar from each sample to the horizontal mid-line.
    Integral,
}

impl RenderMode {
    #[must_use]
    pub fn index(self) -> i32 {
        match self {
            Self::Line => 0,
            Self::Point => 1,
            Self::Vector => 2,
            Self::Integral => 3,
        }
    }
}

impl TryFrom<i32> for RenderMode {
    type Error = PlotError;

    fn try_from(value: i32) -> PlotResult<Self> {
        match value {
            0 => Ok(Self::Line),
            1 => Ok(Self::Point),
            2 => Ok(Self::Vector),
            3 => Ok(Self::Integral),
            other => Err(PlotError::InvalidData(format!(
                "render mode index must be in 0..=3, got {other}"
            ))),
        }
    }
}

/// Segment in normalized draw space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl DrawSegment {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

/// Function-space to draw-space conversion.
///
/// Both axes divide by the viewport *width*, so on a non-square viewport the
/// vertical extent is stretched by `width / height`. Whether Y was meant to
/// use the height is unconfirmed; keep both on the width until it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMapper {
    viewport: Viewport,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ViewportMapper {
    pub fn new(viewport: Viewport, scale: i32, offset_x: f64, offset_y: f64) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return Err(PlotError::InvalidData(
                "viewport offsets must be finite".to_owned(),
            ));
        }
        Ok(Self {
            viewport,
            scale: f64::from(scale),
            offset_x,
            offset_y,
        })
    }

    #[must_use]
    pub fn map_point(self, fx: f64, fy: f64) -> (f64, f64) {
        let width = f64::from(self.viewport.width);
        (
            fx / width * self.scale + self.offset_x,
            fy / width * self.scale + self.offset_y,
        )
    }

    /// Length of a point-mode tick: one pixel in draw space.
    #[must_use]
    pub fn point_extent(self) -> f64 {
        1.0 / f64::from(self.viewport.width)
    }

    /// Maps a sampled pair and applies the render-mode shape.
    #[must_use]
    pub fn shape(self, segment: CurveSegment, mode: RenderMode) -> DrawSegment {
        let (x1, y1) = self.map_point(segment.from.x, segment.from.y);
        match mode {
            RenderMode::Line => {
                let (x2, y2) = self.map_point(segment.to.x, segment.to.y);
                DrawSegment::new(x1, y1, x2, y2)
            }
            RenderMode::Point => DrawSegment::new(x1, y1, x1 + self.point_extent(), y1),
            RenderMode::Vector => DrawSegment::new(x1, y1, VIEWPORT_CENTER.0, VIEWPORT_CENTER.1),
            RenderMode::Integral => DrawSegment::new(x1, y1, x1, VIEWPORT_MID_LINE),
        }
    }
}

/// Cheap visibility test: a segment is dropped only when both endpoints lie
/// beyond the same edge of the unit square. Anything else is drawn in full,
/// with no clipping.
#[must_use]
pub fn is_culled(segment: DrawSegment) -> bool {
    (segment.x1 < 0.0 && segment.x2 < 0.0)
        || (segment.x1 > 1.0 && segment.x2 > 1.0)
        || (segment.y1 < 0.0 && segment.y2 < 0.0)
        || (segment.y1 > 1.0 && segment.y2 > 1.0)
}
