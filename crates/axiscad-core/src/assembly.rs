//! The combined assembly of every created solid

use crate::kernel::{Aabb, Solid};
use crate::mesh::Mesh;

/// An ordered container owning solids in insertion order
///
/// Solids are only ever appended; the only way to drop them is to replace
/// the whole assembly.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    solids: Vec<Solid>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a solid
    pub fn add(&mut self, solid: Solid) {
        self.solids.push(solid);
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solid> {
        self.solids.iter()
    }

    /// Union of all solid bounds, `None` when empty
    pub fn bounds(&self) -> Option<Aabb> {
        self.solids
            .iter()
            .map(Solid::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// All solid meshes merged into one
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for solid in &self.solids {
            mesh.append(solid.mesh());
        }
        mesh
    }
}

impl<'a> IntoIterator for &'a Assembly {
    type Item = &'a Solid;
    type IntoIter = std::slice::Iter<'a, Solid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
