//! Axis-relative workplane placement
//!
//! Converts an extrusion axis, a 2D origin on the axis' base plane and an
//! extrusion range into the parameters a [`Kernel`] needs, plus the boundary
//! text reported back for each created model.
//!
//! The 3D plane origin already carries `extrude_start` in the axis slot, and
//! the workplane is then offset by `extrude_start` once more along the normal.
//! The built solid therefore starts at `2 * extrude_start` along the axis
//! while the boundary text reports `extrude_start -> extrude_end`. Existing
//! clients depend on this placement, so it is reproduced as-is.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::axis::{Axis, Plane};
use crate::kernel::{Kernel, Profile, Solid, Workplane};

/// Workplane placement derived from an axis and extrusion range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Extrusion axis (normal of the base plane)
    pub axis: Axis,
    /// Origin handed to the kernel's workplane constructor
    pub origin: DVec3,
    /// Extra offset along the normal applied after the workplane is created
    pub offset: f64,
    /// Signed extrusion length (`extrude_end - extrude_start`)
    pub length: f64,
}

impl Placement {
    pub fn new(axis: Axis, origin1: f64, origin2: f64, extrude_start: f64, extrude_end: f64) -> Self {
        Self {
            axis,
            origin: axis.plane().compose(extrude_start, origin1, origin2),
            offset: extrude_start,
            length: extrude_end - extrude_start,
        }
    }

    /// Base plane the profile is drawn on
    pub fn plane(&self) -> Plane {
        self.axis.plane()
    }

    /// Where the profile plane ends up after the offset
    pub fn plane_origin(&self) -> DVec3 {
        self.origin + self.plane().normal() * self.offset
    }

    /// Create and offset the workplane through the kernel
    pub fn workplane<K: Kernel + ?Sized>(&self, kernel: &K) -> Workplane {
        kernel
            .make_workplane(self.plane(), self.origin)
            .offset(self.offset)
    }

    /// Materialize `profile` at this placement
    ///
    /// Kernel failures (e.g. a zero-length extrusion) are returned unchanged.
    pub fn build<K: Kernel + ?Sized>(&self, kernel: &K, profile: &Profile) -> Result<Solid> {
        kernel.extrude(&self.workplane(kernel), profile, self.length)
    }
}

/// Input parameters of an axis-placed box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    pub axis: Axis,
    /// Rectangle center along the plane's first in-plane axis
    pub origin1: f64,
    /// Rectangle center along the plane's second in-plane axis
    pub origin2: f64,
    /// Extent along the first in-plane axis
    pub width: f64,
    /// Extent along the second in-plane axis
    pub height: f64,
    pub extrude_start: f64,
    pub extrude_end: f64,
}

impl BoxParams {
    pub fn placement(&self) -> Placement {
        Placement::new(
            self.axis,
            self.origin1,
            self.origin2,
            self.extrude_start,
            self.extrude_end,
        )
    }

    pub fn profile(&self) -> Profile {
        Profile::rect(self.width, self.height)
    }

    /// Boundary text, one line per global axis in X, Y, Z order
    ///
    /// ```text
    ///  X_boundary: -5.0->5.0
    ///  Y_boundary: -2.0->2.0
    ///  Z_boundary: 0.0->5.0
    /// ```
    pub fn boundary(&self) -> String {
        let (first, _) = self.axis.plane().in_plane_axes();
        Axis::all()
            .iter()
            .map(|&global| {
                let (lo, hi) = if global == self.axis {
                    (self.extrude_start, self.extrude_end)
                } else if global == first {
                    centered_span(self.origin1, self.width)
                } else {
                    centered_span(self.origin2, self.height)
                };
                format!(" {}_boundary: {}->{}", global, format_coord(lo), format_coord(hi))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Input parameters of an axis-placed cylinder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderParams {
    pub axis: Axis,
    /// Circle center along the plane's first in-plane axis
    pub origin1: f64,
    /// Circle center along the plane's second in-plane axis
    pub origin2: f64,
    pub radius: f64,
    pub extrude_start: f64,
    pub extrude_end: f64,
}

impl CylinderParams {
    pub fn placement(&self) -> Placement {
        Placement::new(
            self.axis,
            self.origin1,
            self.origin2,
            self.extrude_start,
            self.extrude_end,
        )
    }

    pub fn profile(&self) -> Profile {
        Profile::circle(self.radius)
    }

    /// Boundary text: axis range, circle center on the base plane, radius
    ///
    /// ```text
    ///  X_boundary: -1.0->1.0
    ///  YZ_circle_center: (2.0, 3.0)
    ///  Radius: 1.5
    /// ```
    pub fn boundary(&self) -> String {
        format!(
            " {}_boundary: {}->{}\n {}_circle_center: ({}, {})\n Radius: {}",
            self.axis,
            format_coord(self.extrude_start),
            format_coord(self.extrude_end),
            self.axis.plane(),
            format_coord(self.origin1),
            format_coord(self.origin2),
            format_coord(self.radius),
        )
    }
}

fn centered_span(center: f64, extent: f64) -> (f64, f64) {
    (center - extent / 2.0, center + extent / 2.0)
}

/// Format a coordinate the way a float literal reads
///
/// Integral values keep one decimal (`5.0`, `-2.0`); other values use the
/// shortest representation that round-trips. Values whose decimal exponent
/// falls outside `-4..16` switch to exponent form with a signed, two-digit
/// exponent (`1e+16`, `1e-05`, `1.5e+300`).
pub fn format_coord(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.5e300"
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
