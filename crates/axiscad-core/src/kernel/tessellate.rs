//! Tessellating kernel: extrusions as triangle-mesh prisms

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::{Aabb, Kernel, Profile, Solid, Workplane};
use crate::mesh::Mesh;
use crate::{Error, Result};

const DEFAULT_CIRCLE_SEGMENTS: u32 = 48;
const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 512;

/// Builds extruded rectangles and circles as closed prism meshes
///
/// Bounds are computed from the exact profile, not from the tessellation,
/// so a circle's box touches its true radius regardless of segment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationKernel {
    circle_segments: u32,
}

impl Default for TessellationKernel {
    fn default() -> Self {
        Self {
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl TessellationKernel {
    /// Create a kernel approximating circles with `circle_segments` edges
    /// (clamped to 8..=512)
    pub fn new(circle_segments: u32) -> Self {
        Self {
            circle_segments: circle_segments.clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS),
        }
    }

    pub fn circle_segments(&self) -> u32 {
        self.circle_segments
    }

    /// Profile outline in plane coordinates, counter-clockwise in (u, v)
    fn outline(&self, profile: &Profile) -> Vec<DVec2> {
        match *profile {
            Profile::Rect { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                vec![
                    DVec2::new(-hw, -hh),
                    DVec2::new(hw, -hh),
                    DVec2::new(hw, hh),
                    DVec2::new(-hw, hh),
                ]
            }
            Profile::Circle { radius } => (0..self.circle_segments)
                .map(|i| {
                    let theta = f64::from(i) / f64::from(self.circle_segments) * TAU;
                    DVec2::new(radius * theta.cos(), radius * theta.sin())
                })
                .collect(),
        }
    }
}

fn validate(workplane: &Workplane, profile: &Profile, length: f64) -> Result<()> {
    if !workplane.origin.is_finite() {
        return Err(Error::DegenerateGeometry(format!(
            "workplane origin {} is not finite",
            workplane.origin
        )));
    }
    if !length.is_finite() || length == 0.0 {
        return Err(Error::DegenerateGeometry(format!(
            "extrusion length must be finite and non-zero, got {length}"
        )));
    }
    match *profile {
        Profile::Rect { width, height } => {
            if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
                return Err(Error::DegenerateGeometry(format!(
                    "rectangle size must be positive, got {width} x {height}"
                )));
            }
        }
        Profile::Circle { radius } => {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(Error::DegenerateGeometry(format!(
                    "circle radius must be positive, got {radius}"
                )));
            }
        }
    }
    Ok(())
}

/// Close a prism from a base ring ordered counter-clockwise about `extrusion`
fn prism_mesh(ring: &[DVec3], extrusion: DVec3) -> Mesh {
    let mut mesh = Mesh::new();
    let up = extrusion.normalize();

    let bottom: Vec<DVec3> = ring.iter().rev().copied().collect();
    mesh.push_fan(&bottom, -up);

    let top: Vec<DVec3> = ring.iter().map(|p| *p + extrusion).collect();
    mesh.push_fan(&top, up);

    for (i, &b0) in ring.iter().enumerate() {
        let b1 = ring[(i + 1) % ring.len()];
        let outward = (b1 - b0).cross(extrusion).normalize_or_zero();
        mesh.push_fan(&[b0, b1, b1 + extrusion, b0 + extrusion], outward);
    }

    mesh
}

impl Kernel for TessellationKernel {
    fn extrude(&self, workplane: &Workplane, profile: &Profile, length: f64) -> Result<Solid> {
        validate(workplane, profile, length)?;

        let extrusion = workplane.normal() * length;
        let mut ring: Vec<DVec3> = self
            .outline(profile)
            .into_iter()
            .map(|p| workplane.to_world(p.x, p.y))
            .collect();

        // Keep the winding counter-clockwise about the extrusion direction so
        // caps and walls face outward for either sign of `length`.
        if workplane.x_dir().cross(workplane.y_dir()).dot(extrusion) < 0.0 {
            ring.reverse();
        }

        let mesh = prism_mesh(&ring, extrusion);

        let bounds = match *profile {
            Profile::Rect { .. } => {
                Aabb::from_points(ring.iter().flat_map(|p| [*p, *p + extrusion]))
            }
            Profile::Circle { radius } => {
                let spread = (workplane.x_dir().abs() + workplane.y_dir().abs()) * radius;
                Aabb::from_points([workplane.origin, workplane.origin + extrusion])
                    .map(|axis_span| axis_span.expand(spread))
            }
        }
        .ok_or_else(|| Error::DegenerateGeometry("profile has no outline".to_string()))?;

        tracing::trace!(
            triangles = mesh.triangle_count(),
            "extruded {:?} on {} by {}",
            profile,
            workplane.plane,
            length
        );

        Ok(Solid::new(mesh, bounds, profile.area() * length))
    }
}
