//! Triangle meshes produced by the kernel
//!
//! Meshes are stored in `f32` for rendering and export; placement math stays
//! in `f64` until a vertex is emitted.

use glam::{DVec3, Vec3};

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    /// Build a vertex from double-precision kernel coordinates
    pub fn from_f64(position: DVec3, normal: DVec3) -> Self {
        Self::new(position.as_vec3(), normal.as_vec3())
    }
}

/// A triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a flat-shaded polygon as a triangle fan
    ///
    /// `points` must be ordered counter-clockwise when seen from the side
    /// `normal` points to.
    pub fn push_fan(&mut self, points: &[DVec3], normal: DVec3) {
        if points.len() < 3 {
            return;
        }
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(points.iter().map(|p| Vertex::from_f64(*p, normal)));
        for i in 1..(points.len() as u32 - 1) {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    /// Append another mesh, re-basing its indices
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    /// Iterate triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                Vec3::from_array(self.vertices[tri[0] as usize].position),
                Vec3::from_array(self.vertices[tri[1] as usize].position),
                Vec3::from_array(self.vertices[tri[2] as usize].position),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_push_fan() {
        let mut mesh = Mesh::new();
        mesh.push_fan(&square(), DVec3::Z);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_push_fan_ignores_degenerate_polygons() {
        let mut mesh = Mesh::new();
        mesh.push_fan(&square()[..2], DVec3::Z);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut a = Mesh::new();
        a.push_fan(&square(), DVec3::Z);
        let b = a.clone();
        a.append(&b);

        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 4);
        assert_eq!(&a.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_triangles_iterates_positions() {
        let mut mesh = Mesh::new();
        mesh.push_fan(&square(), DVec3::Z);
        let tris: Vec<_> = mesh.triangles().collect();

        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1][2], Vec3::new(0.0, 1.0, 0.0));
    }
}
