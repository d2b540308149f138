use serde::{Deserialize, Serialize};

/// Pixel size of the host surface.
///
/// The plot itself draws in normalized `[0, 1]` space; the pixel size only
/// feeds the function-space to draw-space conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// One evaluated `(X(t), Y(t))` pair in function space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    #[must_use]
    pub fn new(t: f64, x: f64, y: f64) -> Self {
        Self { t, x, y }
    }
}
