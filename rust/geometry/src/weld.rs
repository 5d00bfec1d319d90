// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex welding
//!
//! Detects coordinate-duplicate vertices across the whole document under the
//! per-axis ε box test and produces the canonical, deduplicated vertex list
//! together with an explicit original-id → canonical-id mapping.
//!
//! Class policy: bases are visited in ascending vid order; each base claims
//! every later, still-unclaimed vertex inside its ε box. Classes are not
//! transitively closed: in a chain A↔B, B↔C with A outside ε of C, the
//! class is {A, B} and C stays unwelded. A vertex close to two disjoint
//! bases belongs to the earlier one. Lowest original id is canonical.

use obj_weld_core::{Document, Vertex};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::grid::SpatialGrid;

/// Default welding tolerance
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// One set of coordinate-duplicate vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    /// Lowest-id member; the vertex the class collapses to
    pub canonical: u64,
    /// All member vids in ascending order, canonical first
    pub members: Vec<u64>,
}

/// Result of the welding pass
#[derive(Debug)]
pub struct WeldOutcome {
    /// Deduplicated vertices; entry `i` has `canonical_id == i + 1`
    pub canonical_vertices: Vec<Vertex>,
    /// Duplicate classes in canonical-vid order
    pub classes: Vec<EquivalenceClass>,
    /// Explicit mapping: `canonical_of[vid - 1]` is the 1-based canonical id
    /// of the original vertex `vid`
    pub canonical_of: Vec<u64>,
    duplicate_vids: FxHashSet<u64>,
}

impl WeldOutcome {
    /// True if the original vertex belongs to a duplicate class
    #[inline]
    pub fn is_duplicate(&self, vid: u64) -> bool {
        self.duplicate_vids.contains(&vid)
    }

    /// Canonical id of an original vertex, if the vid is in range
    #[inline]
    pub fn canonical_id(&self, vid: u64) -> Option<u64> {
        let index = usize::try_from(vid).ok()?.checked_sub(1)?;
        self.canonical_of.get(index).copied()
    }

    /// Number of original vertices that collapsed onto an earlier one
    pub fn duplicates_merged(&self) -> usize {
        self.canonical_of.len() - self.canonical_vertices.len()
    }
}

/// Welds coordinate-duplicate vertices under a per-axis ε tolerance
#[derive(Debug, Clone, Copy)]
pub struct VertexWelder {
    epsilon: f64,
}

impl Default for VertexWelder {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl VertexWelder {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Weld the document's global vertex list.
    ///
    /// Resolves `canonical_id` on every vertex exactly once and returns the
    /// canonical list plus the duplicate classes.
    pub fn weld(&self, document: &mut Document) -> WeldOutcome {
        let classes = self.detect_classes(&document.vertices);
        let outcome = self.canonicalize(&mut document.vertices, classes);

        tracing::debug!(
            vertices = outcome.canonical_of.len(),
            canonical = outcome.canonical_vertices.len(),
            classes = outcome.classes.len(),
            merged = outcome.duplicates_merged(),
            "welded vertices"
        );
        outcome
    }

    /// Grid-accelerated duplicate scan, behaviorally identical to the full
    /// pairwise scan in ascending vid order.
    fn detect_classes(&self, vertices: &[Vertex]) -> Vec<EquivalenceClass> {
        let mut grid = SpatialGrid::with_capacity(self.epsilon, vertices.len());
        for v in vertices {
            grid.insert(v.x, v.y, v.z);
        }

        let mut claimed = vec![false; vertices.len()];
        let mut classes = Vec::new();

        for (i, base) in vertices.iter().enumerate() {
            if claimed[i] {
                continue;
            }
            let mut members: Vec<u64> = Vec::new();
            for handle in grid.close_candidates(base.x, base.y, base.z) {
                let j = handle as usize;
                if j <= i || claimed[j] {
                    continue;
                }
                if members.is_empty() {
                    members.push(base.vid);
                    claimed[i] = true;
                }
                members.push(vertices[j].vid);
                claimed[j] = true;
            }
            if !members.is_empty() {
                classes.push(EquivalenceClass {
                    canonical: base.vid,
                    members,
                });
            }
        }
        classes
    }

    /// Build the canonical list in vid order and resolve every vertex's
    /// canonical id, guarding against coordinate duplicates that survived
    /// class detection as independent classes.
    fn canonicalize(
        &self,
        vertices: &mut [Vertex],
        classes: Vec<EquivalenceClass>,
    ) -> WeldOutcome {
        let mut class_rep: FxHashMap<u64, u64> = FxHashMap::default();
        let mut duplicate_vids: FxHashSet<u64> = FxHashSet::default();
        for class in &classes {
            for &vid in &class.members {
                class_rep.insert(vid, class.canonical);
                duplicate_vids.insert(vid);
            }
        }

        let mut canonical_of = vec![0u64; vertices.len()];
        let mut canonical_vertices: Vec<Vertex> = Vec::new();
        let mut guard = SpatialGrid::new(self.epsilon);

        for i in 0..vertices.len() {
            let vid = i as u64 + 1;
            let rep = class_rep.get(&vid).copied().unwrap_or(vid);
            if rep == vid {
                // Canonical member of its class, or not in any class
                let v = &vertices[i];
                match guard.find_close(v.x, v.y, v.z) {
                    Some(handle) => {
                        // Coordinate duplicate of an earlier canonical entry
                        canonical_of[i] = canonical_vertices[handle as usize].canonical_id;
                    }
                    None => {
                        let id = canonical_vertices.len() as u64 + 1;
                        guard.insert(v.x, v.y, v.z);
                        let mut canonical = v.clone();
                        canonical.canonical_id = id;
                        canonical_vertices.push(canonical);
                        canonical_of[i] = id;
                    }
                }
            } else {
                // rep has a lower vid, so its slot is already resolved
                canonical_of[i] = canonical_of[rep as usize - 1];
            }
        }

        for (v, &id) in vertices.iter_mut().zip(&canonical_of) {
            v.canonical_id = id;
        }

        WeldOutcome {
            canonical_vertices,
            classes,
            canonical_of,
            duplicate_vids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obj_weld_core::Vertex;

    fn doc(points: &[(f64, f64, f64)]) -> Document {
        Document {
            vertices: points
                .iter()
                .enumerate()
                .map(|(i, &(x, y, z))| Vertex::new(i as u64 + 1, x, y, z))
                .collect(),
            ..Document::default()
        }
    }

    #[test]
    fn test_near_pair_and_distant_vertex() {
        // V1(0,0,0), V2(1e-9,0,0), V3(5,5,5): two canonical vertices,
        // V2 collapses onto V1
        let mut document = doc(&[(0.0, 0.0, 0.0), (1e-9, 0.0, 0.0), (5.0, 5.0, 5.0)]);
        let outcome = VertexWelder::default().weld(&mut document);

        assert_eq!(outcome.canonical_vertices.len(), 2);
        assert_eq!(outcome.canonical_id(2), outcome.canonical_id(1));
        assert_ne!(outcome.canonical_id(3), outcome.canonical_id(1));
        assert_eq!(document.vertices[1].canonical_id, document.vertices[0].canonical_id);
    }

    #[test]
    fn test_chain_of_three_is_not_transitively_closed() {
        // A↔B and B↔C within eps per axis, but A outside eps of C.
        // Policy: class {A, B}; C stays unwelded.
        let e = 1e-8;
        let mut document = doc(&[
            (0.0, 0.0, 0.0),
            (0.7 * e, 0.0, 0.0),
            (1.4 * e, 0.0, 0.0),
        ]);
        let outcome = VertexWelder::new(e).weld(&mut document);

        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].canonical, 1);
        assert_eq!(outcome.classes[0].members, vec![1, 2]);
        assert!(outcome.is_duplicate(1));
        assert!(!outcome.is_duplicate(3));

        assert_eq!(outcome.canonical_vertices.len(), 2);
        assert_eq!(outcome.canonical_id(1), Some(1));
        assert_eq!(outcome.canonical_id(2), Some(1));
        assert_eq!(outcome.canonical_id(3), Some(2));
    }

    #[test]
    fn test_vertex_close_to_two_disjoint_bases_joins_the_earlier() {
        let e = 1e-8;
        // V1 and V2 far apart; V3 within eps of V1 only, V4 within eps of
        // both V2 and V3's... keep it simple: V4 within eps of V2.
        let mut document = doc(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.5 * e, 0.0, 0.0),
            (1.0 + 0.5 * e, 0.0, 0.0),
        ]);
        let outcome = VertexWelder::new(e).weld(&mut document);

        assert_eq!(outcome.classes.len(), 2);
        assert_eq!(outcome.classes[0].members, vec![1, 3]);
        assert_eq!(outcome.classes[1].members, vec![2, 4]);
        assert_eq!(outcome.canonical_vertices.len(), 2);
    }

    #[test]
    fn test_count_conservation() {
        let mut document = doc(&[
            (0.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
            (1.0, 1.0, 1.0),
            (2.0, 2.0, 2.0),
            (1.0, 1.0, 1.0),
        ]);
        let total = document.vertices.len();
        let outcome = VertexWelder::default().weld(&mut document);

        // Every original vertex maps to exactly one canonical entry
        assert!(outcome.canonical_of.iter().all(|&id| id != 0));
        assert_eq!(
            outcome.canonical_vertices.len() + outcome.duplicates_merged(),
            total
        );
        assert_eq!(outcome.canonical_vertices.len(), 3);
    }

    #[test]
    fn test_canonical_ids_strictly_increasing_from_one() {
        let mut document = doc(&[
            (3.0, 0.0, 0.0),
            (3.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
        ]);
        let outcome = VertexWelder::default().weld(&mut document);
        let ids: Vec<u64> = outcome
            .canonical_vertices
            .iter()
            .map(|v| v.canonical_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // Canonical list preserves original id order, not coordinate order
        assert_eq!(outcome.canonical_vertices[0].vid, 1);
        assert_eq!(outcome.canonical_vertices[1].vid, 3);
    }

    #[test]
    fn test_welding_is_idempotent() {
        let mut document = doc(&[
            (0.0, 0.0, 0.0),
            (1e-9, 0.0, 0.0),
            (5.0, 5.0, 5.0),
            (5.0, 5.0, 5.0 + 1e-9),
        ]);
        let first = VertexWelder::default().weld(&mut document);

        // Re-weld the canonical list: zero new merges
        let mut rewelded = Document {
            vertices: first
                .canonical_vertices
                .iter()
                .enumerate()
                .map(|(i, v)| Vertex::new(i as u64 + 1, v.x, v.y, v.z))
                .collect(),
            ..Document::default()
        };
        let second = VertexWelder::default().weld(&mut rewelded);
        assert!(second.classes.is_empty());
        assert_eq!(second.duplicates_merged(), 0);
        assert_eq!(
            second.canonical_vertices.len(),
            first.canonical_vertices.len()
        );
    }
}
