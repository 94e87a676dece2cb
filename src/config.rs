//! Runtime configuration
//!
//! Loaded once at startup from an optional TOML file. Every section falls
//! back to the built-in defaults, so a file only needs the keys it changes.

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RaycastError, Result};
use crate::raycast::{BoundaryRule, DEFAULT_MAX_RANGE, DEFAULT_STEP, MarchSettings, Viewport};
use crate::renderer::{Palette, RenderSettings, pack_rgb};
use crate::viewer::{DEFAULT_MOVE_STEP, DEFAULT_TURN_STEP, Viewer};
use crate::world::GridMap;

pub const DEFAULT_LAYOUT: &str = "\
XXXXXXXXXXXXXXXX
X              X
X      X       X
X   XXXXX      X
X   XX         X
X              X
X              X
X              X
X              X
X              X
X              X
X              X
X              X
X              X
X              X
XXXXXXXXXXXXXXXX
";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub viewer: ViewerConfig,
    pub raycast: RaycastConfig,
    pub palette: PaletteConfig,
    pub map: MapConfig,
    pub logging: LoggingConfig,
}

/// Output image / window settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Internal render width in pixels
    pub width: usize,
    /// Internal render height in pixels
    pub height: usize,
    pub title: String,
    pub target_fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            title: "grid-raycaster".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub x: f32,
    pub y: f32,
    /// Radians
    pub heading: f32,
    /// Horizontal field of vision in radians
    pub fov: f32,
    /// Full turns per turn command
    pub turn_step: f32,
    /// Grid units per move command
    pub move_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            x: 2.0,
            y: 2.0,
            heading: 1.57,
            fov: FRAC_PI_2,
            turn_step: DEFAULT_TURN_STEP,
            move_step: DEFAULT_MOVE_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// March increment in grid units
    pub step: f32,
    pub max_range: f32,
    pub boundary_rule: BoundaryRule,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_range: DEFAULT_MAX_RANGE,
            boundary_rule: BoundaryRule::default(),
        }
    }
}

/// RGB triples
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: [u8; 3],
    pub boundary: [u8; 3],
    pub interior: [u8; 3],
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            boundary: [255, 255, 255],
            interior: [0, 0, 0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    /// Character marking a wall; everything else is open
    pub wall: char,
    /// Row-major layout, line breaks ignored
    pub layout: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            wall: 'X',
            layout: DEFAULT_LAYOUT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(RaycastError::InvalidConfig(msg.to_string()));

        if self.display.width == 0 || self.display.height == 0 {
            return invalid("display width and height must be non-zero");
        }
        if self.display.target_fps == 0 {
            return invalid("display.target_fps must be non-zero");
        }
        if !(self.viewer.fov > 0.0) {
            return invalid("viewer.fov must be positive");
        }
        if !(self.raycast.step > 0.0) || !self.raycast.step.is_finite() {
            return invalid("raycast.step must be positive and finite");
        }
        if !(self.raycast.max_range > 0.0) || !self.raycast.max_range.is_finite() {
            return invalid("raycast.max_range must be positive and finite");
        }
        if !self.viewer.heading.is_finite()
            || !self.viewer.turn_step.is_finite()
            || !self.viewer.move_step.is_finite()
        {
            return invalid("viewer heading and steps must be finite");
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.display.width,
            height: self.display.height,
        }
    }

    pub fn build_map(&self) -> Result<GridMap> {
        GridMap::parse(
            &self.map.layout,
            self.map.width,
            self.map.height,
            self.map.wall,
        )
    }

    pub fn build_viewer(&self, map: &GridMap) -> Result<Viewer> {
        let v = &self.viewer;
        Ok(Viewer::new(v.x, v.y, v.heading, v.fov, map)?
            .with_turn_step(v.turn_step)
            .with_move_step(v.move_step))
    }

    pub fn render_settings(&self) -> RenderSettings {
        let [br, bg, bb] = self.palette.background;
        let [er, eg, eb] = self.palette.boundary;
        let [ir, ig, ib] = self.palette.interior;
        RenderSettings {
            march: MarchSettings {
                step: self.raycast.step,
                max_range: self.raycast.max_range,
                boundary_rule: self.raycast.boundary_rule,
            },
            palette: Palette {
                background: pack_rgb(br, bg, bb),
                boundary: pack_rgb(er, eg, eb),
                interior: pack_rgb(ir, ig, ib),
            },
        }
    }
}
