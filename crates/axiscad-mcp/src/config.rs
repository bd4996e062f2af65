//! Session configuration
//!
//! Settings come from command-line flags, falling back to `AXISCAD_*`
//! environment variables, falling back to defaults.

use clap::Parser;
use serde::Serialize;
use serde_json::{Value, json};

/// Default cap on models per session
pub const DEFAULT_MAX_MODELS: usize = 100;

/// Default number of edges used to approximate a circle
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 48;

#[derive(Parser, Debug)]
#[command(name = "axiscad-mcp")]
#[command(about = "MCP server for axis-placed CAD primitives", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Maximum number of models a session may create
    #[arg(long, env = "AXISCAD_MAX_MODELS", default_value_t = DEFAULT_MAX_MODELS)]
    pub max_models: usize,

    /// Verbose per-call logging
    #[arg(long, env = "AXISCAD_DEBUG")]
    pub debug: bool,

    /// Token presented by the session
    #[arg(long, env = "AXISCAD_SERVER_TOKEN", hide_env_values = true)]
    pub server_token: Option<String>,

    /// Circle tessellation used for cylinders
    #[arg(long, env = "AXISCAD_CIRCLE_SEGMENTS", default_value_t = DEFAULT_CIRCLE_SEGMENTS)]
    pub circle_segments: u32,
}

impl Cli {
    pub fn into_session_config(self) -> SessionConfig {
        SessionConfig {
            debug_mode: self.debug,
            max_models: self.max_models,
            server_token: self.server_token,
            circle_segments: self.circle_segments,
        }
    }
}

/// Per-session settings consulted by every tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub debug_mode: bool,
    pub max_models: usize,
    #[serde(skip)]
    pub server_token: Option<String>,
    pub circle_segments: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            max_models: DEFAULT_MAX_MODELS,
            server_token: None,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl SessionConfig {
    /// Config as reported by `health_check`, token masked
    pub fn redacted(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or_else(|_| json!({}));
        if let Some(map) = value.as_object_mut() {
            let token = self.server_token.as_ref().map(|_| "***");
            map.insert("server_token".to_string(), json!(token));
        }
        value
    }
}
