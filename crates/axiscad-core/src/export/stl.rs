//! STL export (Binary format)
//!
//! Binary STL layout:
//! - 80 bytes: Header (arbitrary text)
//! - 4 bytes: Number of triangles (u32 little-endian)
//! - For each triangle (50 bytes):
//!   - 12 bytes: Normal vector (3 x f32 little-endian)
//!   - 36 bytes: 3 vertices (9 x f32 little-endian)
//!   - 2 bytes: Attribute byte count (0)

use std::io::Write;

use glam::Vec3;

use crate::Result;
use crate::mesh::Mesh;

/// Write a mesh as binary STL
pub fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    let header = format!(
        "axiscad STL Export - {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    let mut header_bytes = [b' '; 80];
    let header_len = header.len().min(80);
    header_bytes[..header_len].copy_from_slice(&header.as_bytes()[..header_len]);
    writer.write_all(&header_bytes)?;

    writer.write_all(&(mesh.triangle_count() as u32).to_le_bytes())?;

    for [v0, v1, v2] in mesh.triangles() {
        // STL expects face normals
        let normal = (v1 - v0).cross(v2 - v0).try_normalize().unwrap_or(Vec3::Z);

        for vector in [normal, v0, v1, v2] {
            for component in vector.to_array() {
                writer.write_all(&component.to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}
