use serde::{Deserialize, Serialize};

use crate::core::{FunctionParams, RenderMode, SampleDomain, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

use super::validation::validate_plot_config;

/// Tunable plot parameters read every frame.
///
/// This type is serializable so hosts can persist/load plot setup without
/// inventing their own ad-hoc format. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_offset")]
    pub offset_x: f64,
    #[serde(default = "default_offset")]
    pub offset_y: f64,
    /// Half-width of the domain window in whole units.
    #[serde(default = "default_count")]
    pub count: i32,
    /// Subdivisions per unit; also the draw-space magnification.
    #[serde(default = "default_scale")]
    pub scale: i32,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_grid")]
    pub grid: Color,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub params: FunctionParams,
}

fn default_offset() -> f64 {
    0.5
}

fn default_count() -> i32 {
    50
}

fn default_scale() -> i32 {
    100
}

fn default_background() -> Color {
    Color::WHITE
}

fn default_grid() -> Color {
    Color::GRAY
}

fn default_foreground() -> Color {
    Color::RED
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            offset_x: default_offset(),
            offset_y: default_offset(),
            count: default_count(),
            scale: default_scale(),
            background: default_background(),
            grid: default_grid(),
            foreground: default_foreground(),
            render_mode: RenderMode::default(),
            params: FunctionParams::default(),
        }
    }
}

impl PlotConfig {
    #[must_use]
    pub fn domain(&self) -> SampleDomain {
        SampleDomain::new(self.count, self.scale)
    }

    #[must_use]
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, count: i32, scale: i32) -> Self {
        self.count = count;
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: FunctionParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, background: Color, grid: Color, foreground: Color) -> Self {
        self.background = background;
        self.grid = grid;
        self.foreground = foreground;
        self
    }
}

/// Public engine bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotEngineConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub index_x: i32,
    #[serde(default)]
    pub index_y: i32,
}

impl PlotEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            plot: PlotConfig::default(),
            index_x: 0,
            index_y: 0,
        }
    }

    #[must_use]
    pub fn with_plot(mut self, plot: PlotConfig) -> Self {
        self.plot = plot;
        self
    }

    /// Sets the initial X/Y registry indices.
    #[must_use]
    pub fn with_selection(mut self, index_x: i32, index_y: i32) -> Self {
        self.index_x = index_x;
        self.index_y = index_y;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        validate_plot_config(&self.plot)
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }
}
