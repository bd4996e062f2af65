//! Export tool for the MCP server

use schemars::JsonSchema;
use serde::Deserialize;

fn default_format() -> String {
    "stl".to_string()
}

/// Request for exporting the combined assembly as a mesh
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExportModelsRequest {
    /// Output format: "stl" (binary, default) or "obj"
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional file path. When omitted the file is returned base64-encoded.
    #[serde(default)]
    pub path: Option<String>,
}
