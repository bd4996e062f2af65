//! axiscad Render - previews of model assemblies
//!
//! The [`Renderer`] trait is the seam between the model service and whatever
//! draws the assembly. [`SoftwareRenderer`] is a headless CPU rasterizer that
//! needs no GPU or display, which makes it usable from a stdio MCP server.

pub mod camera;
pub mod raster;

mod error;

use std::path::PathBuf;

use axiscad_core::Assembly;

pub use camera::{Camera, CameraAngle};
pub use error::RenderError;
pub use raster::SoftwareRenderer;

/// Largest accepted image side in pixels
pub const MAX_IMAGE_SIZE: u32 = 4096;

/// What to render and where to put it
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Ask for an interactive viewer instead of a still image
    pub interactive: bool,
    /// Also write the PNG to this path
    pub screenshot: Option<PathBuf>,
    /// Camera preset
    pub angle: CameraAngle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            interactive: true,
            screenshot: None,
            angle: CameraAngle::Isometric,
        }
    }
}

/// Result of a successful render
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// PNG-encoded image
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Triangles drawn
    pub triangles: usize,
    /// Where the screenshot was written, if requested
    pub screenshot: Option<PathBuf>,
}

/// Something that can draw an assembly
pub trait Renderer: Send + Sync {
    fn render(&self, assembly: &Assembly, options: &RenderOptions) -> Result<RenderOutput, RenderError>;
}
