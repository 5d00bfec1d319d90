// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid-model data structures
//!
//! [`Document`] is the aggregate root: it owns the global vertex list, the
//! global face list and the Object→Shell hierarchy. Shells reference faces
//! by [`FaceId`] (index into `Document::faces`) so every face has exactly one
//! owner; the flat face list and the hierarchy never hold diverging copies.

use crate::line::FaceRefs;

/// Index of a face in [`Document::faces`]
pub type FaceId = usize;

/// One parsed vertex.
///
/// Coordinates are immutable after creation. `canonical_id` starts at 0
/// (unresolved) and is assigned exactly once by the welding stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    /// 1-based id in parse order
    pub vid: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Advisory: shell active when this vertex was parsed
    pub shell_id: Option<String>,
    /// Advisory: object active when this vertex was parsed
    pub object_id: Option<String>,
    /// 1-based index into the canonical (welded) vertex list; 0 = unresolved
    pub canonical_id: u64,
}

impl Vertex {
    pub fn new(vid: u64, x: f64, y: f64, z: f64) -> Self {
        Self {
            vid,
            x,
            y,
            z,
            shell_id: None,
            object_id: None,
            canonical_id: 0,
        }
    }

    /// Per-axis box test against another coordinate triple.
    ///
    /// This is deliberately not a Euclidean-ball test; welding semantics
    /// depend on the axis-wise predicate.
    #[inline]
    pub fn within_box(&self, x: f64, y: f64, z: f64, epsilon: f64) -> bool {
        (self.x - x).abs() < epsilon
            && (self.y - y).abs() < epsilon
            && (self.z - z).abs() < epsilon
    }
}

/// One parsed face.
///
/// The three index sequences always have the same length and the same order
/// once the pipeline completes; order encodes polygon winding and is never
/// rewritten.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face {
    /// 1-based references into the original global vertex list (parse order)
    pub original_indices: FaceRefs,
    /// Same references rewritten against the canonical vertex list (1-based)
    pub canonical_indices: FaceRefs,
    /// 0-based references into the owning shell's local vertex array
    pub local_indices: FaceRefs,
    /// True if any referenced vertex belongs to a duplicate class
    pub contains_duplicate: bool,
}

impl Face {
    pub fn new(original_indices: FaceRefs) -> Self {
        Self {
            original_indices,
            ..Self::default()
        }
    }
}

/// A closed set of faces expected to bound one connected solid boundary
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shell {
    pub id: String,
    /// Faces of this shell, in parse order, by id into [`Document::faces`]
    pub faces: Vec<FaceId>,
    /// Vertices used by this shell, deduplicated within this shell only;
    /// every `local_indices` entry of every face is `< local_vertices.len()`
    pub local_vertices: Vec<Vertex>,
}

impl Shell {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            faces: Vec::new(),
            local_vertices: Vec::new(),
        }
    }
}

/// A named grouping of shells (e.g. one logical building component)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub id: String,
    pub shells: Vec<Shell>,
}

impl Object {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shells: Vec::new(),
        }
    }
}

/// Aggregate root owning every entity of the parsed model
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Global vertex list in parse order; `vertices[i].vid == i + 1`
    pub vertices: Vec<Vertex>,
    /// Global face list in parse order
    pub faces: Vec<Face>,
    /// Two-level Object→Shell hierarchy
    pub objects: Vec<Object>,
}

impl Document {
    /// Look up a vertex by its 1-based vid
    #[inline]
    pub fn vertex(&self, vid: u64) -> Option<&Vertex> {
        self.vertices.get(usize::try_from(vid).ok()?.checked_sub(1)?)
    }

    /// Iterate all shells in object order
    pub fn shells(&self) -> impl Iterator<Item = &Shell> {
        self.objects.iter().flat_map(|o| o.shells.iter())
    }
}

/// Flat model produced by the builder, before shell/object nesting.
///
/// `groups[0]` is the sentinel group for content preceding the first shell
/// marker; `groups[i + 1]` belongs to `shells[i]`.
#[derive(Debug, Clone, Default)]
pub struct RawModel {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub shells: Vec<Shell>,
    pub objects: Vec<Object>,
    pub groups: Vec<Vec<FaceId>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_vertex_lookup() {
        let doc = Document {
            vertices: vec![Vertex::new(1, 0.0, 0.0, 0.0), Vertex::new(2, 1.0, 0.0, 0.0)],
            ..Document::default()
        };
        assert_eq!(doc.vertex(2).unwrap().x, 1.0);
        assert!(doc.vertex(0).is_none());
        assert!(doc.vertex(3).is_none());
    }

    #[test]
    fn test_within_box_is_per_axis() {
        let v = Vertex::new(1, 0.0, 0.0, 0.0);
        // Each axis within eps even though the Euclidean distance exceeds it
        let e = 1e-8;
        assert!(v.within_box(0.9e-8, 0.9e-8, 0.9e-8, e));
        assert!(!v.within_box(1.1e-8, 0.0, 0.0, e));
    }

    #[test]
    fn test_face_starts_unresolved() {
        let face = Face::new(smallvec![1, 2, 3]);
        assert!(face.canonical_indices.is_empty());
        assert!(face.local_indices.is_empty());
        assert!(!face.contains_duplicate);
    }
}
