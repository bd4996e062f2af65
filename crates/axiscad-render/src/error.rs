//! Error types for the renderer

use thiserror::Error;

/// Errors that can occur while rendering an assembly
#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing to draw
    #[error("Assembly is empty")]
    EmptyAssembly,

    /// Requested image dimensions are unusable
    #[error("Invalid image size {width}x{height} (each side must be 1..={max})")]
    InvalidSize { width: u32, height: u32, max: u32 },

    /// PNG encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Writing the screenshot failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
