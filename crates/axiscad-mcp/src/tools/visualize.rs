//! Visualization tool for the MCP server

use std::path::PathBuf;

use axiscad_render::{CameraAngle, RenderOptions};
use schemars::JsonSchema;
use serde::Deserialize;

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_interact() -> bool {
    true
}

fn default_angle() -> String {
    "isometric".to_string()
}

/// Request for rendering all current models
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VisualizeRequest {
    /// Image width in pixels (default: 800)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels (default: 600)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Optional path to also save the PNG screenshot to
    #[serde(default)]
    pub screenshot: Option<String>,

    /// Request an interactive viewer (default: true). Headless servers
    /// return a still image either way.
    #[serde(default = "default_interact")]
    pub interact: bool,

    /// Camera viewing angle.
    /// Options: "front", "back", "left", "right", "top", "bottom", "isometric" (default)
    #[serde(default = "default_angle")]
    pub angle: String,
}

impl Default for VisualizeRequest {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            screenshot: None,
            interact: default_interact(),
            angle: default_angle(),
        }
    }
}

impl VisualizeRequest {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            interactive: self.interact,
            screenshot: self
                .screenshot
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            angle: CameraAngle::parse(&self.angle).unwrap_or_default(),
        }
    }
}
