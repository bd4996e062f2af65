//! Headless software rasterizer
//!
//! Draws every solid of an assembly with a depth buffer and simple Lambert
//! shading, one flat color per solid, and encodes the result as PNG.

use axiscad_core::Assembly;
use glam::{Mat4, Vec2, Vec3};
use image::{ImageEncoder, Rgba, RgbaImage};

use crate::{MAX_IMAGE_SIZE, RenderError, RenderOptions, RenderOutput, Renderer};

const BACKGROUND: [u8; 4] = [236, 238, 242, 255];

/// Base colors cycled per solid
const PALETTE: [[f32; 3]; 6] = [
    [0.30, 0.55, 0.85],
    [0.90, 0.55, 0.20],
    [0.35, 0.70, 0.40],
    [0.80, 0.30, 0.35],
    [0.60, 0.45, 0.80],
    [0.85, 0.75, 0.30],
];

const AMBIENT: f32 = 0.3;

/// CPU rasterizer producing PNG previews
#[derive(Debug, Clone, Copy)]
pub struct SoftwareRenderer {
    /// Direction the light comes from, in world space
    light_direction: Vec3,
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(0.4, -0.6, 0.7).normalize(),
        }
    }
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize into an RGBA image without encoding
    pub fn rasterize(
        &self,
        assembly: &Assembly,
        options: &RenderOptions,
    ) -> Result<(RgbaImage, usize), RenderError> {
        validate_size(options.width, options.height)?;
        let bounds = assembly.bounds().ok_or(RenderError::EmptyAssembly)?;

        let camera = options
            .angle
            .to_camera(&bounds, options.width as f32 / options.height as f32);
        let view_proj = camera.view_projection_matrix();
        // Light follows the camera so unlit faces never end up facing the viewer
        let light = (self.light_direction - camera.forward() * 0.5).normalize_or_zero();

        let mut target = Target::new(options.width, options.height);
        let mut triangles = 0;

        for (index, solid) in assembly.iter().enumerate() {
            let base = PALETTE[index % PALETTE.len()];
            for tri in solid.mesh().triangles() {
                let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
                // Closed meshes: faces pointing away are hidden by the front faces
                if normal.dot(camera.forward()) >= 0.0 {
                    continue;
                }
                let shade = AMBIENT + (1.0 - AMBIENT) * normal.dot(light).max(0.0);
                let color = Rgba([
                    channel(base[0] * shade),
                    channel(base[1] * shade),
                    channel(base[2] * shade),
                    255,
                ]);
                target.fill_triangle(&view_proj, tri, color);
                triangles += 1;
            }
        }

        Ok((target.image, triangles))
    }
}

impl Renderer for SoftwareRenderer {
    fn render(&self, assembly: &Assembly, options: &RenderOptions) -> Result<RenderOutput, RenderError> {
        if options.interactive {
            tracing::debug!("interactive viewing unavailable headless, rendering a still image");
        }

        let (image, triangles) = self.rasterize(assembly, options)?;

        let mut png = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png);
        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        if let Some(path) = &options.screenshot {
            std::fs::write(path, &png)?;
            tracing::info!(path = %path.display(), "screenshot written");
        }

        tracing::debug!(
            width = options.width,
            height = options.height,
            triangles,
            angle = %options.angle,
            "assembly rendered"
        );

        Ok(RenderOutput {
            png,
            width: options.width,
            height: options.height,
            triangles,
            screenshot: options.screenshot.clone(),
        })
    }
}

fn validate_size(width: u32, height: u32) -> Result<(), RenderError> {
    let valid = 1..=MAX_IMAGE_SIZE;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(RenderError::InvalidSize {
            width,
            height,
            max: MAX_IMAGE_SIZE,
        })
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color and depth buffers
struct Target {
    image: RgbaImage,
    depth: Vec<f32>,
}

impl Target {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(BACKGROUND)),
            depth: vec![f32::INFINITY; width as usize * height as usize],
        }
    }

    /// Project to pixel space; z is NDC depth in [0, 1]
    fn to_screen(&self, view_proj: &Mat4, p: Vec3) -> Vec3 {
        let ndc = view_proj.project_point3(p);
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.image.width() as f32,
            (1.0 - ndc.y) * 0.5 * self.image.height() as f32,
            ndc.z,
        )
    }

    fn fill_triangle(&mut self, view_proj: &Mat4, tri: [Vec3; 3], color: Rgba<u8>) {
        let [a, b, c] = tri.map(|p| self.to_screen(view_proj, p));

        let area = edge(a.truncate(), b.truncate(), c.truncate());
        if area.abs() < f32::EPSILON {
            return;
        }

        let (width, height) = (self.image.width() as f32, self.image.height() as f32);
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(width - 1.0);
        let max_y = a.y.max(b.y).max(c.y).ceil().min(height - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as u32, max_y as u32);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b.truncate(), c.truncate(), p) / area;
                let w1 = edge(c.truncate(), a.truncate(), p) / area;
                let w2 = edge(a.truncate(), b.truncate(), p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }
                let slot = y as usize * self.image.width() as usize + x as usize;
                if z < self.depth[slot] {
                    self.depth[slot] = z;
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }
}

/// Twice the signed area of (a, b, p)
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CameraAngle;
    use axiscad_core::prelude::*;

    fn assembly_with_box() -> Assembly {
        let params = BoxParams {
            axis: Axis::Z,
            origin1: 0.0,
            origin2: 0.0,
            width: 2.0,
            height: 2.0,
            extrude_start: 0.0,
            extrude_end: 2.0,
        };
        let solid = params
            .placement()
            .build(&TessellationKernel::default(), &params.profile())
            .unwrap();
        let mut assembly = Assembly::new();
        assembly.add(solid);
        assembly
    }

    fn options(width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            interactive: false,
            screenshot: None,
            angle: CameraAngle::Isometric,
        }
    }

    #[test]
    fn test_rasterize_covers_center() {
        let (image, triangles) = SoftwareRenderer::new()
            .rasterize(&assembly_with_box(), &options(64, 48))
            .unwrap();

        assert_eq!(image.dimensions(), (64, 48));
        assert!(triangles > 0);
        // The model is framed around its center
        assert_ne!(image.get_pixel(32, 24).0, BACKGROUND);
        // Corners stay background
        assert_eq!(image.get_pixel(0, 0).0, BACKGROUND);
    }

    #[test]
    fn test_every_angle_draws_something() {
        let assembly = assembly_with_box();
        for name in CameraAngle::all_names() {
            let mut opts = options(32, 32);
            opts.angle = CameraAngle::parse(name).unwrap();
            let (image, _) = SoftwareRenderer::new().rasterize(&assembly, &opts).unwrap();
            assert_ne!(image.get_pixel(16, 16).0, BACKGROUND, "{name}");
        }
    }

    #[test]
    fn test_empty_assembly_fails() {
        let err = SoftwareRenderer::new()
            .render(&Assembly::new(), &options(10, 10))
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyAssembly));
    }

    #[test]
    fn test_invalid_size_fails() {
        let assembly = assembly_with_box();
        for (w, h) in [(0, 10), (10, 0), (MAX_IMAGE_SIZE + 1, 10)] {
            let err = SoftwareRenderer::new().render(&assembly, &options(w, h)).unwrap_err();
            assert!(matches!(err, RenderError::InvalidSize { .. }));
        }
    }

    #[test]
    fn test_render_encodes_png() {
        let output = SoftwareRenderer::new()
            .render(&assembly_with_box(), &options(40, 30))
            .unwrap();

        assert!(output.png.starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!((output.width, output.height), (40, 30));
        assert!(output.screenshot.is_none());
    }
}
