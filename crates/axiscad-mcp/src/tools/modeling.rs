//! Primitive creation tools
//!
//! Every primitive is a 2D profile drawn on the base plane normal to an axis
//! and extruded along that axis:
//!
//! - axis `X` draws on plane `YZ` (`x1` = Y, `x2` = Z)
//! - axis `Y` draws on plane `XZ` (`x1` = X, `x2` = Z)
//! - axis `Z` draws on plane `XY` (`x1` = X, `x2` = Y)

use axiscad_core::{Axis, BoxParams, CylinderParams};
use schemars::JsonSchema;
use serde::Deserialize;

/// Request for creating a box from an axis, a center and a width/height
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateBoxRequest {
    /// Name of the part, describing its role in the final model
    pub model_name: String,

    /// Extrusion axis: "X", "Y" or "Z". The rectangle is drawn on the plane
    /// normal to it ("YZ", "XZ" or "XY").
    pub rect_workplane_axi: String,

    /// Rectangle center along the plane's first axis (Y for X, X for Y and Z)
    pub rect_origin_x1: f64,

    /// Rectangle center along the plane's second axis (Z for X and Y, Y for Z)
    pub rect_origin_x2: f64,

    /// Rectangle extent along the plane's first axis
    pub rect_width: f64,

    /// Rectangle extent along the plane's second axis
    pub rect_height: f64,

    /// Where the extrusion starts along the axis
    pub extrude_start: f64,

    /// Where the extrusion ends along the axis
    pub extrude_end: f64,
}

impl CreateBoxRequest {
    pub fn params(&self, axis: Axis) -> BoxParams {
        BoxParams {
            axis,
            origin1: self.rect_origin_x1,
            origin2: self.rect_origin_x2,
            width: self.rect_width,
            height: self.rect_height,
            extrude_start: self.extrude_start,
            extrude_end: self.extrude_end,
        }
    }
}

/// Request for creating a cylinder from an axis, a center and a radius
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCylinderRequest {
    /// Name of the part, describing its role in the final model
    pub model_name: String,

    /// Extrusion axis: "X", "Y" or "Z". The circle is drawn on the plane
    /// normal to it ("YZ", "XZ" or "XY").
    pub circle_workplane_axi: String,

    /// Circle center along the plane's first axis (Y for X, X for Y and Z)
    pub circle_origin_x1: f64,

    /// Circle center along the plane's second axis (Z for X and Y, Y for Z)
    pub circle_origin_x2: f64,

    /// Circle radius
    pub circle_radius: f64,

    /// Where the extrusion starts along the axis
    pub extrude_start: f64,

    /// Where the extrusion ends along the axis
    pub extrude_end: f64,
}

impl CreateCylinderRequest {
    pub fn params(&self, axis: Axis) -> CylinderParams {
        CylinderParams {
            axis,
            origin1: self.circle_origin_x1,
            origin2: self.circle_origin_x2,
            radius: self.circle_radius,
            extrude_start: self.extrude_start,
            extrude_end: self.extrude_end,
        }
    }
}
