//! Grid raycaster
//!
//! Renders a first-person view of a 2D occupancy grid by marching one ray
//! per screen column. The core (`world`, `viewer`, `raycast`, `renderer`,
//! `framebuffer`, `game`) is pure and windowing-free; `app` and `snapshot`
//! present its output.

pub mod app;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod game;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod snapshot;
pub mod viewer;
pub mod world;

pub use error::{RaycastError, Result};
pub use framebuffer::FrameBuffer;
pub use game::{GameState, tick};
pub use raycast::{BoundaryRule, MarchSettings, Ray, RayHit, Viewport};
pub use renderer::{Palette, RenderSettings, Slice, render, render_frame};
pub use viewer::{Command, Viewer};
pub use world::{Cell, GridMap};
