//! # axiscad Core
//!
//! Parametric boxes and cylinders placed on axis-aligned workplanes.
//!
//! The crate has three layers:
//!
//! - [`placement`] turns an axis, a 2D origin and an extrusion range into a
//!   workplane placement plus a human-readable boundary description
//! - [`kernel`] materializes solids from a placement (the bundled
//!   [`TessellationKernel`] builds triangle-mesh prisms)
//! - [`registry`] accumulates created solids into one [`Assembly`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axiscad_core::prelude::*;
//!
//! let kernel = TessellationKernel::default();
//! let mut registry = ModelRegistry::new();
//!
//! let params = BoxParams {
//!     axis: Axis::Z,
//!     origin1: 0.0,
//!     origin2: 0.0,
//!     width: 10.0,
//!     height: 4.0,
//!     extrude_start: 0.0,
//!     extrude_end: 5.0,
//! };
//! let placement = params.placement();
//! let solid = placement.build(&kernel, &params.profile())?;
//! let info = registry.add_model("base", solid, ShapeType::Box, params.boundary());
//! assert_eq!(info.id, 1);
//! ```
//!
//! ## Conventions
//!
//! - **Coordinates**: `f64`, right-handed, Z-up
//! - **Planes**: `YZ`, `XZ` and `XY` have normals `+X`, `+Y` and `+Z`

pub mod assembly;
pub mod axis;
pub mod export;
pub mod kernel;
pub mod mesh;
pub mod placement;
pub mod registry;

mod error;

pub use assembly::Assembly;
pub use axis::{Axis, Plane};
pub use error::{Error, Result};
pub use kernel::{Aabb, Kernel, Profile, Solid, TessellationKernel, Workplane};
pub use placement::{BoxParams, CylinderParams, Placement};
pub use registry::{ModelInfo, ModelRegistry, ModelSummary, ShapeType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assembly::Assembly;
    pub use crate::axis::{Axis, Plane};
    pub use crate::export::{ExportFormat, export_assembly};
    pub use crate::kernel::{Aabb, Kernel, Profile, Solid, TessellationKernel, Workplane};
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::placement::{BoxParams, CylinderParams, Placement};
    pub use crate::registry::{ModelInfo, ModelRegistry, ModelSummary, ShapeType};

    // Math (re-export glam)
    pub use glam::{DVec2, DVec3, Vec3};

    pub use crate::{Error, Result};
}
