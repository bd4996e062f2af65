//! Camera presets that frame an assembly's bounding box
//!
//! World space is Z-up. Every preset is an orthographic view aimed at the
//! center of the bounds, so the same assembly always renders the same way.

use std::fmt;
use std::str::FromStr;

use axiscad_core::Aabb;
use glam::{Mat4, Vec3};

/// Where the camera sits relative to the assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraAngle {
    /// On the -Y side
    Front,
    /// On the +Y side
    Back,
    /// On the -X side
    Left,
    /// On the +X side
    Right,
    /// Above, on the +Z side, with +Y pointing up in the image
    Top,
    /// Below, on the -Z side, with -Y pointing up in the image
    Bottom,
    /// Along (1, -1, 1): front, right and top faces visible
    #[default]
    Isometric,
}

/// Preset names in the order they are listed to clients
const NAMES: [(&str, CameraAngle); 7] = [
    ("front", CameraAngle::Front),
    ("back", CameraAngle::Back),
    ("left", CameraAngle::Left),
    ("right", CameraAngle::Right),
    ("top", CameraAngle::Top),
    ("bottom", CameraAngle::Bottom),
    ("isometric", CameraAngle::Isometric),
];

impl CameraAngle {
    /// Unit vector from the framed center toward the eye
    fn eye_direction(self) -> Vec3 {
        match self {
            Self::Front => Vec3::NEG_Y,
            Self::Back => Vec3::Y,
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
            Self::Top => Vec3::Z,
            Self::Bottom => Vec3::NEG_Z,
            Self::Isometric => Vec3::new(1.0, -1.0, 1.0).normalize(),
        }
    }

    /// Image-up vector; +Z except when looking along Z
    fn up(self) -> Vec3 {
        match self {
            Self::Top => Vec3::Y,
            Self::Bottom => Vec3::NEG_Y,
            _ => Vec3::Z,
        }
    }

    /// Orthographic camera fitting the bounding sphere of `bounds`
    pub fn to_camera(self, bounds: &Aabb, aspect: f32) -> Camera {
        let center = bounds.center().as_vec3();
        let radius = (bounds.size().as_vec3().length() * 0.5).max(1e-3);
        let distance = radius * 3.0;

        Camera {
            position: center + self.eye_direction() * distance,
            target: center,
            up: self.up(),
            half_height: radius * 1.1,
            aspect,
            near: distance - radius * 1.5,
            far: distance + radius * 1.5,
        }
    }

    /// Look up a preset by name, ignoring case; `iso` is short for isometric
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.trim().to_ascii_lowercase();
        if name == "iso" {
            return Some(Self::Isometric);
        }
        NAMES.iter().find(|(n, _)| *n == name).map(|&(_, angle)| angle)
    }

    /// Every preset name accepted by [`CameraAngle::parse`]
    pub fn all_names() -> impl Iterator<Item = &'static str> {
        NAMES.iter().map(|&(name, _)| name)
    }

    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|&&(_, angle)| angle == self)
            .map_or("isometric", |&(name, _)| name)
    }
}

impl FromStr for CameraAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let names: Vec<_> = Self::all_names().collect();
            format!("Unknown camera angle '{s}'. Valid options: {}", names.join(", "))
        })
    }
}

impl fmt::Display for CameraAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An orthographic camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Half of the visible height in world units
    pub half_height: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Camera {
    /// Get the view matrix (world to camera transform)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        let half_width = self.half_height * self.aspect;
        Mat4::orthographic_rh(
            -half_width,
            half_width,
            -self.half_height,
            self.half_height,
            self.near,
            self.far,
        )
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the forward direction (normalized)
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }
}
