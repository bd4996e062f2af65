//! In-memory model registry
//!
//! Records every created primitive in creation order and owns the combined
//! [`Assembly`]. The registry does no locking of its own: ids are derived
//! from the current length, so callers sharing one registry across tasks
//! must serialize access (e.g. behind a mutex).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assembly::Assembly;
use crate::kernel::Solid;

/// Kind of primitive a model was created as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Box,
    Cylinder,
}

impl ShapeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Cylinder => "cylinder",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One created primitive
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// 1-based position in the current run of additions
    pub id: usize,
    pub name: String,
    pub shape_type: ShapeType,
    pub boundary: String,
    /// Optional creation parameters; empty unless a caller fills them in
    pub parameters: BTreeMap<String, f64>,
    /// Optional workplane label; empty unless a caller fills it in
    pub workplane: String,
    /// Optional extrusion direction label; empty unless a caller fills it in
    pub extrude_direction: String,
}

/// Record returned by [`ModelRegistry::add_model`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub shape_type: ShapeType,
    pub boundary: String,
}

impl From<&Model> for ModelInfo {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            shape_type: model.shape_type,
            boundary: model.boundary.clone(),
        }
    }
}

/// Summary projection used when listing models
///
/// `parameters`, `workplane` and `extrude_direction` are not populated by the
/// box and cylinder paths; they serialize as `{}` and `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub id: usize,
    #[serde(rename = "type")]
    pub shape_type: ShapeType,
    pub parameters: BTreeMap<String, f64>,
    pub workplane: String,
    pub extrude_direction: String,
}

impl From<&Model> for ModelSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            shape_type: model.shape_type,
            parameters: model.parameters.clone(),
            workplane: model.workplane.clone(),
            extrude_direction: model.extrude_direction.clone(),
        }
    }
}

/// Ordered model records plus the assembly holding their solids
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<Model>,
    assembly: Assembly,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a model and merge its solid into the assembly
    ///
    /// The id is the current model count plus one.
    pub fn add_model(
        &mut self,
        name: impl Into<String>,
        solid: Solid,
        shape_type: ShapeType,
        boundary: impl Into<String>,
    ) -> ModelInfo {
        let model = Model {
            id: self.models.len() + 1,
            name: name.into(),
            shape_type,
            boundary: boundary.into(),
            parameters: BTreeMap::new(),
            workplane: String::new(),
            extrude_direction: String::new(),
        };
        let info = ModelInfo::from(&model);

        self.models.push(model);
        self.assembly.add(solid);

        tracing::debug!(id = info.id, name = %info.name, kind = %info.shape_type, "model added");
        info
    }

    /// Summaries of every model, in creation order
    pub fn all_models_info(&self) -> Vec<ModelSummary> {
        self.models.iter().map(ModelSummary::from).collect()
    }

    /// The live assembly; it changes as models are added
    pub fn combined_model(&self) -> &Assembly {
        &self.assembly
    }

    /// Drop every model and start a fresh assembly; numbering restarts at 1
    pub fn clear_all(&mut self) {
        let dropped = self.models.len();
        self.models.clear();
        self.assembly = Assembly::new();
        tracing::debug!(dropped, "registry cleared");
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
