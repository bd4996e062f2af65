//! Tool behavior across a whole session

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use axiscad_core::prelude::*;
use axiscad_mcp::config::SessionConfig;
use axiscad_mcp::state::CadState;
use axiscad_mcp::tools::export::ExportModelsRequest;
use axiscad_mcp::tools::modeling::{CreateBoxRequest, CreateCylinderRequest};
use axiscad_mcp::tools::visualize::VisualizeRequest;
use axiscad_render::{RenderError, RenderOptions, RenderOutput, Renderer, SoftwareRenderer};
use parking_lot::Mutex;
use serde_json::Value;

/// Kernel that records every extrusion before delegating
#[derive(Default)]
struct RecordingKernel {
    inner: TessellationKernel,
    calls: Mutex<Vec<(Plane, DVec3, f64)>>,
}

impl Kernel for RecordingKernel {
    fn extrude(&self, workplane: &Workplane, profile: &Profile, length: f64) -> Result<Solid> {
        self.calls
            .lock()
            .push((workplane.plane, workplane.origin, length));
        self.inner.extrude(workplane, profile, length)
    }
}

/// Renderer that always fails
struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(&self, _: &Assembly, _: &RenderOptions) -> std::result::Result<RenderOutput, RenderError> {
        Err(RenderError::EmptyAssembly)
    }
}

/// Renderer that announces it has started, then takes its time
struct SlowRenderer {
    started: Mutex<mpsc::Sender<()>>,
    delay: Duration,
}

impl Renderer for SlowRenderer {
    fn render(&self, assembly: &Assembly, options: &RenderOptions) -> std::result::Result<RenderOutput, RenderError> {
        self.started.lock().send(()).ok();
        std::thread::sleep(self.delay);
        SoftwareRenderer::default().render(assembly, options)
    }
}

fn state() -> CadState {
    CadState::with_defaults(SessionConfig::default())
}

fn state_with(config: SessionConfig) -> CadState {
    CadState::with_defaults(config)
}

fn box_request(axis: &str, start: f64, end: f64) -> CreateBoxRequest {
    CreateBoxRequest {
        model_name: "block".to_string(),
        rect_workplane_axi: axis.to_string(),
        rect_origin_x1: 0.0,
        rect_origin_x2: 0.0,
        rect_width: 2.0,
        rect_height: 2.0,
        extrude_start: start,
        extrude_end: end,
    }
}

fn cylinder_request(axis: &str) -> CreateCylinderRequest {
    CreateCylinderRequest {
        model_name: "shaft".to_string(),
        circle_workplane_axi: axis.to_string(),
        circle_origin_x1: 2.0,
        circle_origin_x2: 3.0,
        circle_radius: 1.5,
        extrude_start: -1.0,
        extrude_end: 1.0,
    }
}

fn error_of(value: &Value) -> &str {
    value["error"].as_str().expect("response should carry an error")
}

#[test]
fn ids_follow_call_order_across_shapes() {
    let state = state();

    let ids: Vec<u64> = (0..6)
        .map(|i| {
            let response = if i % 2 == 0 {
                state.create_box(&box_request("X", 0.0, 1.0))
            } else {
                state.create_cylinder(&cylinder_request("Z"))
            };
            response["model_info"]["id"].as_u64().unwrap()
        })
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(state.models_count(), 6);
}

#[test]
fn cylinder_response_reports_center_and_radius() {
    let response = state().create_cylinder(&cylinder_request("Y"));

    assert_eq!(response["message"], "Cylinder created (ID: 1)");
    assert_eq!(response["model_info"]["type"], "cylinder");
    assert_eq!(
        response["model_info"]["boundary"],
        " Y_boundary: -1.0->1.0\n XZ_circle_center: (2.0, 3.0)\n Radius: 1.5"
    );
}

#[test]
fn blank_token_rejects_every_guarded_tool() {
    let state = state_with(SessionConfig {
        server_token: Some("   ".to_string()),
        ..SessionConfig::default()
    });

    assert_eq!(error_of(&state.create_box(&box_request("Z", 0.0, 1.0))), "Invalid server token");
    assert_eq!(error_of(&state.create_cylinder(&cylinder_request("Z"))), "Invalid server token");
    assert_eq!(error_of(&state.visualize(&VisualizeRequest::default()).summary), "Invalid server token");
    assert_eq!(error_of(&state.list_models()), "Invalid server token");
    assert_eq!(error_of(&state.clear()), "Invalid server token");
    assert_eq!(state.models_count(), 0);

    // health_check is not guarded
    assert_eq!(state.health()["status"], "healthy");
}

#[test]
fn empty_token_is_allowed() {
    let state = state_with(SessionConfig {
        server_token: Some(String::new()),
        ..SessionConfig::default()
    });
    let response = state.create_box(&box_request("Z", 0.0, 1.0));
    assert_eq!(response["model_info"]["id"], 1);
}

#[test]
fn model_limit_is_enforced_before_building() {
    let kernel = Arc::new(RecordingKernel::default());
    let state = CadState::new(
        SessionConfig {
            max_models: 2,
            ..SessionConfig::default()
        },
        kernel.clone(),
        Arc::new(SoftwareRenderer::default()),
    );

    state.create_box(&box_request("Z", 0.0, 1.0));
    state.create_cylinder(&cylinder_request("Z"));
    let response = state.create_box(&box_request("Z", 0.0, 1.0));

    assert_eq!(error_of(&response), "Maximum model count reached: 2");
    assert_eq!(state.models_count(), 2);
    assert_eq!(kernel.calls.lock().len(), 2);

    // Clearing frees the slots again
    state.clear();
    assert_eq!(state.create_box(&box_request("Z", 0.0, 1.0))["model_info"]["id"], 1);
}

#[test]
fn invalid_axis_never_reaches_the_kernel() {
    let kernel = Arc::new(RecordingKernel::default());
    let state = CadState::new(
        SessionConfig::default(),
        kernel.clone(),
        Arc::new(SoftwareRenderer::default()),
    );

    let response = state.create_cylinder(&cylinder_request("XY"));

    assert_eq!(error_of(&response), "Invalid axis 'XY'. Valid options: X, Y, Z");
    assert!(kernel.calls.lock().is_empty());
    assert_eq!(state.models_count(), 0);
}

#[test]
fn kernel_receives_doubled_start_offset() {
    let kernel = Arc::new(RecordingKernel::default());
    let state = CadState::new(
        SessionConfig::default(),
        kernel.clone(),
        Arc::new(SoftwareRenderer::default()),
    );

    state.create_box(&box_request("X", 2.0, 5.0));

    let calls = kernel.calls.lock();
    let (plane, origin, length) = calls[0];
    assert_eq!(plane, Plane::YZ);
    assert_eq!(origin, DVec3::new(4.0, 0.0, 0.0));
    assert_eq!(length, 3.0);
}

#[test]
fn kernel_failure_is_reported_and_nothing_is_added() {
    let state = state();
    let response = state.create_box(&box_request("Y", 1.0, 1.0));

    assert!(response.get("error").is_some());
    assert_eq!(state.models_count(), 0);
    assert_eq!(state.create_box(&box_request("Y", 0.0, 1.0))["model_info"]["id"], 1);
}

#[test]
fn visualize_without_models_reports_nothing_to_display() {
    let outcome = state().visualize(&VisualizeRequest::default());

    assert!(outcome.png.is_none());
    assert_eq!(outcome.summary["models_count"], 0);
    assert_eq!(outcome.summary["message"], "No models to display");
}

#[test]
fn visualize_returns_png_and_summary() {
    let state = state();
    state.create_box(&box_request("Z", 0.0, 1.0));
    state.create_cylinder(&cylinder_request("X"));

    let request = VisualizeRequest {
        width: 64,
        height: 48,
        interact: false,
        ..VisualizeRequest::default()
    };
    let outcome = state.visualize(&request);

    let png = outcome.png.expect("render should succeed");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    assert_eq!(outcome.summary["models_count"], 2);
    assert_eq!(outcome.summary["models_info"].as_array().unwrap().len(), 2);
    assert_eq!(outcome.summary["models_info"][1]["type"], "cylinder");
    assert_eq!(outcome.summary["visualization_params"]["width"], 64);
    assert_eq!(outcome.summary["visualization_params"]["interact"], false);
    assert!(outcome.summary["visualization_params"].get("screenshot").is_none());
    assert_eq!(outcome.summary["image"]["width"], 64);
    assert_eq!(outcome.summary["image"]["height"], 48);
}

#[test]
fn visualize_failure_is_a_message_not_a_panic() {
    let state = CadState::new(
        SessionConfig::default(),
        Arc::new(TessellationKernel::default()),
        Arc::new(BrokenRenderer),
    );
    state.create_box(&box_request("Z", 0.0, 1.0));

    let outcome = state.visualize(&VisualizeRequest::default());

    assert!(outcome.png.is_none());
    let message = outcome.summary["message"].as_str().unwrap();
    assert!(message.starts_with("Visualization failed: "));
    assert_eq!(outcome.summary["error"], "Assembly is empty");
    // The registry is untouched
    assert_eq!(state.models_count(), 1);
}

#[test]
fn other_tools_run_while_a_render_is_in_progress() {
    let (started_tx, started_rx) = mpsc::channel();
    let state = CadState::new(
        SessionConfig::default(),
        Arc::new(TessellationKernel::default()),
        Arc::new(SlowRenderer {
            started: Mutex::new(started_tx),
            delay: Duration::from_millis(1500),
        }),
    );
    state.create_box(&box_request("Z", 0.0, 1.0));
    state.create_cylinder(&cylinder_request("X"));

    let rendering = {
        let state = state.clone();
        std::thread::spawn(move || {
            state.visualize(&VisualizeRequest {
                width: 32,
                height: 32,
                ..VisualizeRequest::default()
            })
        })
    };
    started_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("render should start");

    let begin = Instant::now();
    assert_eq!(state.health()["models_count"], 2);
    assert_eq!(state.list_models()["models_count"], 2);
    state.clear();
    assert_eq!(state.create_box(&box_request("Y", 0.0, 1.0))["model_info"]["id"], 1);
    let elapsed = begin.elapsed();
    assert!(elapsed < Duration::from_millis(500), "registry calls waited {elapsed:?}");

    // The render reports the models it was started with
    let outcome = rendering.join().unwrap();
    assert!(outcome.png.is_some());
    assert_eq!(outcome.summary["models_count"], 2);
    assert_eq!(outcome.summary["image"]["width"], 32);
    assert!(outcome.summary["image"]["triangles"].as_u64().unwrap() > 0);
    assert_eq!(state.models_count(), 1);
}

#[test]
fn list_models_uses_summary_defaults() {
    let state = state();
    state.create_box(&box_request("Z", 0.0, 1.0));

    let listing = state.list_models();
    assert_eq!(listing["models_count"], 1);
    assert_eq!(listing["models"][0]["id"], 1);
    assert_eq!(listing["models"][0]["type"], "box");
    assert_eq!(listing["models"][0]["workplane"], "");
    assert!(listing["models"][0]["parameters"].as_object().unwrap().is_empty());
    assert_eq!(listing["bounds"]["min"], serde_json::json!([-1.0, -1.0, 0.0]));
}

#[test]
fn export_returns_bytes_or_writes_file() {
    let state = state();
    state.create_box(&box_request("Z", 0.0, 1.0));

    let in_memory = state.export_models(&ExportModelsRequest {
        format: "stl".to_string(),
        path: None,
    });
    let bytes = in_memory.bytes.expect("bytes without a path");
    assert_eq!(bytes.len(), 84 + 50 * 12);
    assert_eq!(in_memory.summary["triangles"], 12);

    let path = std::env::temp_dir().join(format!("axiscad_session_{}.obj", std::process::id()));
    let on_disk = state.export_models(&ExportModelsRequest {
        format: "OBJ".to_string(),
        path: Some(path.display().to_string()),
    });
    assert!(on_disk.bytes.is_none());
    assert_eq!(on_disk.summary["path"], path.display().to_string());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 12);
    std::fs::remove_file(&path).ok();
}

#[test]
fn export_errors_are_reported() {
    let state = state();

    let empty = state.export_models(&ExportModelsRequest {
        format: "stl".to_string(),
        path: None,
    });
    assert!(error_of(&empty.summary).contains("empty"));

    state.create_box(&box_request("Z", 0.0, 1.0));
    let unknown = state.export_models(&ExportModelsRequest {
        format: "glb".to_string(),
        path: None,
    });
    assert!(error_of(&unknown.summary).contains("Unknown format 'glb'"));
}

#[test]
fn clear_resets_the_session() {
    let state = state();
    for _ in 0..3 {
        state.create_box(&box_request("Y", 0.0, 1.0));
    }

    let response = state.clear();
    assert_eq!(response["message"], "All models cleared");
    assert_eq!(response["models_count"], 0);
    assert_eq!(state.list_models()["models_count"], 0);
    assert_eq!(state.health()["models_count"], 0);
}

#[tokio::test]
async fn concurrent_creation_assigns_unique_ids() {
    let state = state();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let state = state.clone();
            tokio::task::spawn_blocking(move || state.create_box(&box_request("Z", 0.0, 1.0)))
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap()["model_info"]["id"].as_u64().unwrap());
    }
    ids.sort_unstable();

    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}
