//! OBJ export

use std::io::Write;

use crate::Result;
use crate::mesh::Mesh;

/// Write a mesh as Wavefront OBJ with per-vertex normals
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "# axiscad OBJ Export")?;
    writeln!(writer, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(writer, "# Triangles: {}", mesh.triangle_count())?;
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.position[0], v.position[1], v.position[2])?;
    }
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(writer, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
    }
    writeln!(writer)?;

    // OBJ uses 1-based indexing
    for tri in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(writer, "f {i0}//{i0} {i1}//{i1} {i2}//{i2}")?;
    }

    writer.flush()?;
    Ok(())
}
