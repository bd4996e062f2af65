//! Geometry kernel interface
//!
//! The placement layer never builds geometry itself. It positions a
//! [`Workplane`], picks a [`Profile`] and asks a [`Kernel`] to extrude it.
//! Any solid-modeling backend can sit behind the trait; the crate ships
//! [`TessellationKernel`], which emits triangle-mesh prisms.

mod solid;
mod tessellate;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::axis::Plane;

pub use solid::{Aabb, Solid};
pub use tessellate::TessellationKernel;

/// A solid-construction backend
pub trait Kernel: Send + Sync {
    /// Create a workplane on a base plane, moved so its origin sits at `origin`
    fn make_workplane(&self, plane: Plane, origin: DVec3) -> Workplane {
        Workplane::new(plane, origin)
    }

    /// Extrude a profile centered on the workplane origin by `length` along
    /// the workplane normal
    ///
    /// A negative length extrudes to the other side of the plane.
    fn extrude(&self, workplane: &Workplane, profile: &Profile, length: f64) -> Result<Solid>;
}

/// A positioned 2D drawing plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workplane {
    pub plane: Plane,
    pub origin: DVec3,
}

impl Workplane {
    pub fn new(plane: Plane, origin: DVec3) -> Self {
        Self { plane, origin }
    }

    /// Move the workplane `distance` along its normal
    pub fn offset(self, distance: f64) -> Self {
        Self {
            plane: self.plane,
            origin: self.origin + self.plane.normal() * distance,
        }
    }

    pub fn normal(&self) -> DVec3 {
        self.plane.normal()
    }

    pub fn x_dir(&self) -> DVec3 {
        self.plane.x_dir()
    }

    pub fn y_dir(&self) -> DVec3 {
        self.plane.y_dir()
    }

    /// Map local plane coordinates to a global point
    pub fn to_world(&self, u: f64, v: f64) -> DVec3 {
        self.origin + self.x_dir() * u + self.y_dir() * v
    }
}

/// A closed 2D profile centered on the workplane origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    /// `width` runs along the plane's x direction, `height` along its y
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
}

impl Profile {
    pub fn rect(width: f64, height: f64) -> Self {
        Self::Rect { width, height }
    }

    pub fn circle(radius: f64) -> Self {
        Self::Circle { radius }
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        match *self {
            Self::Rect { width, height } => width * height,
            Self::Circle { radius } => std::f64::consts::PI * radius * radius,
        }
    }
}
