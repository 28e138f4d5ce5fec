//! Rendering: turn a [`PerformanceSurface`] into pixels.
//!
//! Both renderers go through [`chart::render_rgb`], so the headless PNG and
//! the interactive window show the same picture.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::PerformanceSurface;

pub mod chart;
pub mod format;
pub mod png;
pub mod window;

pub use png::PngRenderer;
pub use window::WindowRenderer;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("timing grid shape {found:?} does not match meshgrid shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("cannot render a {width}x{height} image")]
    InvalidSize { width: u32, height: u32 },

    #[error("drawing chart: {0}")]
    Draw(String),

    #[error("encoding image")]
    Image(#[from] image::ImageError),

    #[error("writing {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("viewer window: {0}")]
    Window(String),
}

pub type RenderResult = Result<(), RenderError>;

// ---------------------------------------------------------------------------
// Renderer capability
// ---------------------------------------------------------------------------

/// Presents a surface once. Interactive implementations block until closed.
pub trait SurfaceRenderer {
    fn render(&mut self, surface: &PerformanceSurface) -> RenderResult;
}

// ---------------------------------------------------------------------------
// View angles
// ---------------------------------------------------------------------------

/// Camera orientation for the 3D chart, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self {
            yaw: 0.5,
            pitch: 0.3,
        }
    }
}

impl ViewAngles {
    pub const PITCH_LIMIT: f64 = std::f64::consts::FRAC_PI_2;

    /// Rotate by the given deltas. Yaw wraps to (-π, π], pitch is clamped.
    pub fn rotated(self, d_yaw: f64, d_pitch: f64) -> Self {
        use std::f64::consts::{PI, TAU};

        let mut yaw = (self.yaw + d_yaw) % TAU;
        if yaw > PI {
            yaw -= TAU;
        } else if yaw <= -PI {
            yaw += TAU;
        }
        Self {
            yaw,
            pitch: (self.pitch + d_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT),
        }
    }
}
