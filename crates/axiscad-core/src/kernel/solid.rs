//! Solids and their axis-aligned bounds

use glam::DVec3;
use serde::Serialize;

use crate::mesh::Mesh;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    /// Grow the box by a per-axis margin
    pub fn expand(&self, margin: DVec3) -> Self {
        Self::new(self.min - margin, self.max + margin)
    }

    /// Merge two bounding boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

/// A solid produced by a kernel
#[derive(Debug, Clone)]
pub struct Solid {
    mesh: Mesh,
    bounds: Aabb,
    volume: f64,
}

impl Solid {
    pub fn new(mesh: Mesh, bounds: Aabb, volume: f64) -> Self {
        Self {
            mesh,
            bounds,
            volume,
        }
    }

    /// Tessellated surface
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Exact axis-aligned bounds in global coordinates
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Signed volume: negative when extruded against the plane normal
    pub fn volume(&self) -> f64 {
        self.volume
    }
}
