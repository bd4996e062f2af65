//! Global axes and the three axis-aligned base planes
//!
//! Every primitive is extruded along one global axis. The axis picks the base
//! plane whose normal it is, and a fixed frame table says which global
//! coordinate slots the two in-plane coordinates land in.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A global coordinate axis, used as the extrusion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the three axis-aligned base planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plane {
    /// Normal `+X`, in-plane axes `(Y, Z)`
    YZ,
    /// Normal `+Y`, in-plane axes `(X, Z)`
    XZ,
    /// Normal `+Z`, in-plane axes `(X, Y)`
    XY,
}

/// Normal slot and in-plane slot order for one plane
#[derive(Debug, Clone, Copy)]
struct Frame {
    plane: Plane,
    normal: usize,
    in_plane: [usize; 2],
}

/// Indexed by `Axis::index`
const FRAMES: [Frame; 3] = [
    Frame {
        plane: Plane::YZ,
        normal: 0,
        in_plane: [1, 2],
    },
    Frame {
        plane: Plane::XZ,
        normal: 1,
        in_plane: [0, 2],
    },
    Frame {
        plane: Plane::XY,
        normal: 2,
        in_plane: [0, 1],
    },
];

const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

impl Axis {
    /// All axes in coordinate order
    pub fn all() -> [Axis; 3] {
        AXES
    }

    /// Coordinate slot of this axis (`X = 0`, `Y = 1`, `Z = 2`)
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along the positive axis
    pub fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    /// The base plane whose normal is this axis
    pub fn plane(self) -> Plane {
        FRAMES[self.index()].plane
    }

    /// Upper-case axis name
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// Parse an axis selector
    ///
    /// Only the exact upper-case names `"X"`, `"Y"`, `"Z"` are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        AXES.into_iter().find(|axis| axis.name() == s)
    }

    fn from_index(index: usize) -> Self {
        AXES[index % 3]
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidAxis(s.to_string()))
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Plane {
    fn frame(self) -> &'static Frame {
        &FRAMES[self.normal_axis().index()]
    }

    /// The global axis this plane is normal to
    pub fn normal_axis(self) -> Axis {
        match self {
            Self::YZ => Axis::X,
            Self::XZ => Axis::Y,
            Self::XY => Axis::Z,
        }
    }

    /// The two global axes spanning the plane, in parameter order
    pub fn in_plane_axes(self) -> (Axis, Axis) {
        let [u, v] = self.frame().in_plane;
        (Axis::from_index(u), Axis::from_index(v))
    }

    /// Unit normal
    pub fn normal(self) -> DVec3 {
        self.normal_axis().unit()
    }

    /// Local x direction (first in-plane axis)
    pub fn x_dir(self) -> DVec3 {
        self.in_plane_axes().0.unit()
    }

    /// Local y direction (second in-plane axis)
    pub fn y_dir(self) -> DVec3 {
        self.in_plane_axes().1.unit()
    }

    /// Plane name as written in boundary reports (`"YZ"`, `"XZ"`, `"XY"`)
    pub fn name(self) -> &'static str {
        match self {
            Self::YZ => "YZ",
            Self::XZ => "XZ",
            Self::XY => "XY",
        }
    }

    /// Build a global point from a coordinate along the normal and the two
    /// in-plane coordinates
    pub fn compose(self, along_normal: f64, u: f64, v: f64) -> DVec3 {
        let frame = self.frame();
        let mut coords = [0.0; 3];
        coords[frame.normal] = along_normal;
        coords[frame.in_plane[0]] = u;
        coords[frame.in_plane[1]] = v;
        DVec3::from_array(coords)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
