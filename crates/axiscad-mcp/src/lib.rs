//! axiscad MCP Server - Model Context Protocol server for axis-placed CAD primitives
//!
//! This crate exposes axiscad's box and cylinder builders to AI agents.
//! Agents can:
//!
//! - Create boxes and cylinders on the plane normal to an axis
//! - Read back each model's boundary text and the session's model list
//! - Render the combined assembly as a PNG preview
//! - Export the combined assembly as STL or OBJ
//!
//! ## Workflow
//!
//! 1. `create_box_Axi_W_H` / `create_cylinder_Axi_R` - add parts one at a time
//! 2. `visualize_models` - see what the assembly looks like
//! 3. `clear_models` and rebuild when a part is wrong
//! 4. `export_models` - write the final assembly to a mesh file

pub mod access;
pub mod config;
pub mod state;
pub mod tools;

use base64::Engine as _;
use rmcp::{
    ErrorData as McpError,
    ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::state::{CadState, SERVER_NAME};
use crate::tools::{
    export::ExportModelsRequest,
    modeling::{CreateBoxRequest, CreateCylinderRequest},
    visualize::VisualizeRequest,
};

// Re-export for binary
pub use rmcp;
pub use state::CadState as State;

fn json_text(value: &Value) -> Content {
    Content::text(serde_json::to_string_pretty(value).unwrap_or_default())
}

fn blocking_error(e: tokio::task::JoinError) -> McpError {
    McpError::internal_error(format!("tool task failed: {e}"), None)
}

/// The axiscad MCP service
///
/// Creation and rendering are CPU-bound, so they run on tokio's blocking pool.
#[derive(Clone)]
pub struct AxiscadMcpService {
    state: CadState,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AxiscadMcpService {
    /// Create a new MCP service with the given state
    pub fn new(state: CadState) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Status
    // ========================================================================

    #[tool(description = "Check that the server is running. Returns status, model count, timestamp, version and the session configuration.")]
    async fn health_check(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![json_text(&self.state.health())]))
    }

    // ========================================================================
    // Modeling Tools
    // ========================================================================

    #[tool(
        name = "create_box_Axi_W_H",
        description = "Create a box by choosing an extrusion axis, a rectangle center, width and height. The rectangle is drawn on the plane normal to the axis (X -> YZ, Y -> XZ, Z -> XY) and extruded from extrude_start to extrude_end along the axis. Returns the model id and its boundary ranges."
    )]
    async fn create_box(
        &self,
        params: Parameters<CreateBoxRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        let state = self.state.clone();
        let response = tokio::task::spawn_blocking(move || state.create_box(&request))
            .await
            .map_err(blocking_error)?;
        Ok(CallToolResult::success(vec![json_text(&response)]))
    }

    #[tool(
        name = "create_cylinder_Axi_R",
        description = "Create a cylinder by choosing an extrusion axis, a circle center and radius. The circle is drawn on the plane normal to the axis (X -> YZ, Y -> XZ, Z -> XY) and extruded from extrude_start to extrude_end along the axis. Returns the model id, axial range, center and radius."
    )]
    async fn create_cylinder(
        &self,
        params: Parameters<CreateCylinderRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        let state = self.state.clone();
        let response = tokio::task::spawn_blocking(move || state.create_cylinder(&request))
            .await
            .map_err(blocking_error)?;
        Ok(CallToolResult::success(vec![json_text(&response)]))
    }

    // ========================================================================
    // Rendering Tools
    // ========================================================================

    #[tool(description = "Render every model created so far as one PNG image. Optionally also save it to a screenshot path. Use angle to pick the view: front, back, left, right, top, bottom, isometric.")]
    async fn visualize_models(
        &self,
        params: Parameters<VisualizeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        let state = self.state.clone();
        let outcome = tokio::task::spawn_blocking(move || state.visualize(&request))
            .await
            .map_err(blocking_error)?;

        let mut contents = Vec::with_capacity(2);
        if let Some(png) = &outcome.png {
            let b64 = base64::engine::general_purpose::STANDARD.encode(png);
            contents.push(Content::image(b64, "image/png"));
        }
        contents.push(json_text(&outcome.summary));
        Ok(CallToolResult::success(contents))
    }

    // ========================================================================
    // Session Management Tools
    // ========================================================================

    #[tool(description = "List every model in creation order with its id, type, parameters and workplane, plus the bounds of the combined assembly.")]
    async fn list_models(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![json_text(&self.state.list_models())]))
    }

    #[tool(description = "Export the combined assembly as a mesh. Supported formats: stl (binary, default), obj. Writes to path when given, otherwise returns base64-encoded file data.")]
    async fn export_models(
        &self,
        params: Parameters<ExportModelsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        let state = self.state.clone();
        let outcome = tokio::task::spawn_blocking(move || state.export_models(&request))
            .await
            .map_err(blocking_error)?;

        let mut text = serde_json::to_string_pretty(&outcome.summary).unwrap_or_default();
        if let Some(bytes) = &outcome.bytes {
            let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
            // MCP has no blob content type; the data travels as text
            text.push_str(&format!("\n\nBase64 data ({} bytes encoded):\n{}", b64.len(), b64));
        }
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Remove every model. Ids start again at 1.")]
    async fn clear_models(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![json_text(&self.state.clear())]))
    }
}

#[tool_handler]
impl ServerHandler for AxiscadMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("axiscad Parametric Primitives".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "axiscad MCP server for building parts from axis-placed boxes and cylinders. \
                 \n\nEvery primitive is a 2D profile drawn on the plane normal to an axis \
                 (X -> YZ, Y -> XZ, Z -> XY) and extruded along that axis.\n\n\
                 Workflow:\n\
                 1. create_box_Axi_W_H() / create_cylinder_Axi_R() - add parts\n\
                 2. visualize_models() - see the combined assembly\n\
                 3. clear_models() and rebuild when something is off\n\
                 4. export_models() - write the result as STL or OBJ"
                    .to_string(),
            ),
        }
    }
}
