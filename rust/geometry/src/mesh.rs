// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-shell mesh handoff
//!
//! [`ShellMesh`] is the input contract of the external solid kernel: an
//! ordered vertex-coordinate array and an ordered list of simple closed
//! polygons, each an ordered list of 0-based indices into that array.
//! Positions stay `f64`: the consumer is an exact-arithmetic kernel, and
//! narrowing would undo the welding tolerance guarantees.

use nalgebra::Point3;
use obj_weld_core::{Face, Shell};

/// Polygonal shell mesh with strictly local 0-based indexing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellMesh {
    /// Vertex positions, flat (x, y, z) triples
    pub positions: Vec<f64>,
    /// Faces as ordered local index lists; order encodes winding
    pub faces: Vec<Vec<u32>>,
}

impl ShellMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Build the kernel handoff for one localized shell.
    ///
    /// `faces` is the document's global face list the shell references into.
    pub fn from_shell(shell: &Shell, faces: &[Face]) -> Self {
        let mut mesh = Self::with_capacity(shell.local_vertices.len(), shell.faces.len());
        for vertex in &shell.local_vertices {
            mesh.push_vertex(vertex.x, vertex.y, vertex.z);
        }
        for &face_id in &shell.faces {
            mesh.faces.push(
                faces[face_id]
                    .local_indices
                    .iter()
                    .map(|&i| i as u32)
                    .collect(),
            );
        }
        mesh
    }

    /// Add a vertex
    #[inline]
    pub fn push_vertex(&mut self, x: f64, y: f64, z: f64) {
        self.positions.push(x);
        self.positions.push(y);
        self.positions.push(z);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get face count
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obj_weld_core::Vertex;
    use smallvec::smallvec;

    #[test]
    fn test_mesh_creation() {
        let mesh = ShellMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_push_vertex() {
        let mut mesh = ShellMesh::new();
        mesh.push_vertex(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_shell() {
        let mut shell = Shell::new("1");
        shell.local_vertices = vec![
            Vertex::new(1, 0.0, 0.0, 0.0),
            Vertex::new(2, 1.0, 0.0, 0.0),
            Vertex::new(3, 0.0, 1.0, 0.0),
        ];
        shell.faces = vec![0];

        let mut face = Face::new(smallvec![1, 2, 3]);
        face.local_indices = smallvec![0, 1, 2];

        let mesh = ShellMesh::from_shell(&shell, &[face]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = ShellMesh::new();
        mesh.push_vertex(-1.0, 2.0, 0.5);
        mesh.push_vertex(3.0, -4.0, 0.0);
        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(max, Point3::new(3.0, 2.0, 0.5));
    }
}
