//! Session state for the MCP server
//!
//! One [`CadState`] is shared by every tool call of a session. The registry
//! sits behind a mutex so id assignment and assembly mutation happen as one
//! step; everything else is immutable after startup.
//!
//! Every operation returns the JSON document sent back to the client. Failures
//! are reported inside that document (`{"error": ...}`) rather than as MCP
//! protocol errors.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axiscad_core::export::{ExportFormat, export_assembly};
use axiscad_core::{Axis, Kernel, ModelRegistry, Placement, Profile, ShapeType, TessellationKernel};
use axiscad_render::{Renderer, SoftwareRenderer};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::access::validate_server_access;
use crate::config::SessionConfig;
use crate::tools::export::ExportModelsRequest;
use crate::tools::modeling::{CreateBoxRequest, CreateCylinderRequest};
use crate::tools::visualize::VisualizeRequest;

/// Name reported by `health_check` and the MCP handshake
pub const SERVER_NAME: &str = "axiscad-mcp";

/// Result of `visualize_models`
#[derive(Debug, Clone)]
pub struct VisualizeOutcome {
    /// JSON summary returned as text content
    pub summary: Value,
    /// Rendered PNG, present only when rendering succeeded
    pub png: Option<Vec<u8>>,
}

/// Result of `export_models`
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// JSON summary returned as text content
    pub summary: Value,
    /// File contents when no path was given
    pub bytes: Option<Vec<u8>>,
}

/// Shared session state
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone)]
pub struct CadState {
    registry: Arc<Mutex<ModelRegistry>>,
    kernel: Arc<dyn Kernel>,
    renderer: Arc<dyn Renderer>,
    config: SessionConfig,
}

impl CadState {
    pub fn new(config: SessionConfig, kernel: Arc<dyn Kernel>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(ModelRegistry::new())),
            kernel,
            renderer,
            config,
        }
    }

    /// State backed by the tessellation kernel and the software renderer
    pub fn with_defaults(config: SessionConfig) -> Self {
        let kernel = TessellationKernel::new(config.circle_segments);
        Self::new(config, Arc::new(kernel), Arc::new(SoftwareRenderer::default()))
    }

    pub fn models_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Liveness report; needs no token
    pub fn health(&self) -> Value {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        json!({
            "status": "healthy",
            "server": SERVER_NAME,
            "models_count": self.models_count(),
            "timestamp": timestamp,
            "version": env!("CARGO_PKG_VERSION"),
            "config": self.config.redacted(),
        })
    }

    pub fn create_box(&self, request: &CreateBoxRequest) -> Value {
        let axis = match self.admit(&request.rect_workplane_axi) {
            Ok(axis) => axis,
            Err(response) => return response,
        };
        let params = request.params(axis);
        self.log_debug(|| format!("creating box '{}' along {axis}", request.model_name));

        self.create(
            &request.model_name,
            ShapeType::Box,
            params.placement(),
            params.profile(),
            params.boundary(),
        )
    }

    pub fn create_cylinder(&self, request: &CreateCylinderRequest) -> Value {
        let axis = match self.admit(&request.circle_workplane_axi) {
            Ok(axis) => axis,
            Err(response) => return response,
        };
        let params = request.params(axis);
        self.log_debug(|| format!("creating cylinder '{}' along {axis}", request.model_name));

        self.create(
            &request.model_name,
            ShapeType::Cylinder,
            params.placement(),
            params.profile(),
            params.boundary(),
        )
    }

    /// Render the combined assembly
    pub fn visualize(&self, request: &VisualizeRequest) -> VisualizeOutcome {
        if let Err(response) = self.check_token() {
            return VisualizeOutcome {
                summary: response,
                png: None,
            };
        }

        // Snapshot under the lock; rendering runs without holding it
        let (assembly, models_info, models_count) = {
            let registry = self.registry.lock();
            (
                registry.combined_model().clone(),
                registry.all_models_info(),
                registry.len(),
            )
        };
        if models_count == 0 {
            return VisualizeOutcome {
                summary: json!({
                    "message": "No models to display",
                    "models_count": 0,
                }),
                png: None,
            };
        }

        let options = request.render_options();
        let mut params = json!({
            "width": request.width,
            "height": request.height,
            "interact": request.interact,
            "angle": options.angle.to_string(),
        });
        if let Some(screenshot) = &request.screenshot {
            params["screenshot"] = json!(screenshot);
        }

        match self.renderer.render(&assembly, &options) {
            Ok(output) => VisualizeOutcome {
                summary: json!({
                    "message": "Models visualized",
                    "models_info": models_info,
                    "models_count": models_count,
                    "visualization_params": params,
                    "image": {
                        "width": output.width,
                        "height": output.height,
                        "triangles": output.triangles,
                    },
                }),
                png: Some(output.png),
            },
            Err(e) => {
                tracing::warn!(error = %e, "visualization failed");
                VisualizeOutcome {
                    summary: json!({
                        "message": format!("Visualization failed: {e}"),
                        "error": e.to_string(),
                    }),
                    png: None,
                }
            }
        }
    }

    /// Summaries of every model plus the assembly bounds
    pub fn list_models(&self) -> Value {
        if let Err(response) = self.check_token() {
            return response;
        }

        let registry = self.registry.lock();
        json!({
            "models": registry.all_models_info(),
            "models_count": registry.len(),
            "bounds": registry.combined_model().bounds(),
        })
    }

    /// Serialize the combined assembly to a file or to memory
    pub fn export_models(&self, request: &ExportModelsRequest) -> ExportOutcome {
        let fail = |error: String| ExportOutcome {
            summary: json!({ "error": error }),
            bytes: None,
        };

        if let Err(response) = self.check_token() {
            return ExportOutcome {
                summary: response,
                bytes: None,
            };
        }

        let format = match request.format.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(e) => return fail(e.to_string()),
        };

        let (assembly, models_count) = {
            let registry = self.registry.lock();
            (registry.combined_model().clone(), registry.len())
        };
        let mut bytes = Vec::new();
        if let Err(e) = export_assembly(&assembly, format, &mut bytes) {
            return fail(e.to_string());
        }
        let triangles = assembly.iter().map(|solid| solid.mesh().triangle_count()).sum::<usize>();

        let mut summary = json!({
            "message": format!("Exported {models_count} models as {format}"),
            "format": format.name(),
            "models_count": models_count,
            "triangles": triangles,
            "bytes": bytes.len(),
        });

        match request.path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(path);
                if let Err(e) = std::fs::write(&path, &bytes) {
                    return fail(format!("Failed to write {}: {e}", path.display()));
                }
                tracing::info!(path = %path.display(), "assembly exported");
                summary["path"] = json!(path.display().to_string());
                ExportOutcome {
                    summary,
                    bytes: None,
                }
            }
            None => ExportOutcome {
                summary,
                bytes: Some(bytes),
            },
        }
    }

    pub fn clear(&self) -> Value {
        if let Err(response) = self.check_token() {
            return response;
        }

        self.registry.lock().clear_all();
        tracing::info!("all models cleared");
        json!({
            "message": "All models cleared",
            "models_count": 0,
        })
    }

    fn check_token(&self) -> Result<(), Value> {
        if validate_server_access(self.config.server_token.as_deref()) {
            Ok(())
        } else {
            tracing::warn!("call rejected: invalid server token");
            Err(json!({ "error": "Invalid server token" }))
        }
    }

    /// Token, model limit and axis checks shared by the creation tools
    fn admit(&self, axis: &str) -> Result<Axis, Value> {
        self.check_token()?;

        let max_models = self.config.max_models;
        if self.models_count() >= max_models {
            tracing::warn!(max_models, "call rejected: model limit reached");
            return Err(json!({
                "error": format!("Maximum model count reached: {max_models}"),
            }));
        }

        axis.parse::<Axis>().map_err(|e| {
            tracing::warn!(error = %e, "call rejected");
            json!({ "error": e.to_string() })
        })
    }

    fn create(
        &self,
        name: &str,
        shape_type: ShapeType,
        placement: Placement,
        profile: Profile,
        boundary: String,
    ) -> Value {
        let solid = match placement.build(self.kernel.as_ref(), &profile) {
            Ok(solid) => solid,
            Err(e) => {
                tracing::warn!(name, error = %e, "kernel rejected {shape_type}");
                return json!({ "error": e.to_string() });
            }
        };

        let mut registry = self.registry.lock();
        // Re-check under the lock; another call may have filled the last slot
        if registry.len() >= self.config.max_models {
            return json!({
                "error": format!("Maximum model count reached: {}", self.config.max_models),
            });
        }
        let info = registry.add_model(name, solid, shape_type, boundary);
        let total = registry.len();
        drop(registry);

        self.log_debug(|| format!("{shape_type} '{}' added as model {}", info.name, info.id));
        let label = match shape_type {
            ShapeType::Box => "Box",
            ShapeType::Cylinder => "Cylinder",
        };
        json!({
            "message": format!("{label} created (ID: {})", info.id),
            "model_info": info,
            "total_models": total,
        })
    }

    fn log_debug(&self, message: impl FnOnce() -> String) {
        if self.config.debug_mode {
            tracing::debug!("{}", message());
        }
    }
}
