// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face reindexing
//!
//! Rewrites every face's 1-based original vertex references into canonical
//! references using the welder's explicit mapping. The vertex sequence is
//! never reordered; only the referenced ids change.
//!
//! Out-of-range references are collected across the whole document and
//! surfaced once as [`Error::IndexOutOfRange`]. In lenient mode
//! (`strict = false`) each violation is logged and the unresolved value is
//! passed through unmodified.

use obj_weld_core::Document;

use crate::error::{Error, IndexViolation, Result};
use crate::weld::WeldOutcome;

/// Rewrite `canonical_indices` on every face of the document.
///
/// Also marks `contains_duplicate` on faces referencing any vertex that
/// belongs to a duplicate class.
pub fn reindex_faces(
    document: &mut Document,
    outcome: &WeldOutcome,
    strict: bool,
) -> Result<()> {
    let max = document.vertices.len() as u64;
    let mut violations: Vec<IndexViolation> = Vec::new();

    for (face_id, face) in document.faces.iter_mut().enumerate() {
        face.canonical_indices.clear();
        for (slot, &reference) in face.original_indices.iter().enumerate() {
            match outcome.canonical_id(reference) {
                Some(canonical) => {
                    if outcome.is_duplicate(reference) {
                        face.contains_duplicate = true;
                    }
                    face.canonical_indices.push(canonical);
                }
                _ => {
                    let violation = IndexViolation {
                        face: face_id,
                        slot,
                        reference,
                        max,
                    };
                    if strict {
                        violations.push(violation);
                    } else {
                        tracing::warn!(%violation, "face reference out of range, passing through");
                    }
                    // Leave the entry unmodified so sequence lengths stay equal
                    face.canonical_indices.push(reference);
                }
            }
        }
    }

    if !violations.is_empty() {
        return Err(Error::IndexOutOfRange { violations });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weld::VertexWelder;
    use obj_weld_core::{Face, Vertex};

    fn document(points: &[(f64, f64, f64)], faces: &[&[u64]]) -> Document {
        Document {
            vertices: points
                .iter()
                .enumerate()
                .map(|(i, &(x, y, z))| Vertex::new(i as u64 + 1, x, y, z))
                .collect(),
            faces: faces
                .iter()
                .map(|refs| Face::new(refs.iter().copied().collect()))
                .collect(),
            ..Document::default()
        }
    }

    #[test]
    fn test_rewrites_against_canonical_ids() {
        // V2 duplicates V1, so references to 2 become references to 1
        let mut doc = document(
            &[(0.0, 0.0, 0.0), (1e-9, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
            &[&[1, 3, 4], &[2, 4, 3]],
        );
        let outcome = VertexWelder::default().weld(&mut doc);
        reindex_faces(&mut doc, &outcome, true).unwrap();

        assert_eq!(doc.faces[0].canonical_indices.as_slice(), &[1, 2, 3]);
        assert_eq!(doc.faces[1].canonical_indices.as_slice(), &[1, 3, 2]);
        // The class base counts as a class member, so both faces are flagged
        assert!(doc.faces[0].contains_duplicate);
        assert!(doc.faces[1].contains_duplicate);
    }

    #[test]
    fn test_shape_and_order_preserved() {
        let mut doc = document(
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (1.0, 1.0, 0.0)],
            &[&[4, 2, 1, 3]],
        );
        let outcome = VertexWelder::default().weld(&mut doc);
        reindex_faces(&mut doc, &outcome, true).unwrap();

        let face = &doc.faces[0];
        assert_eq!(face.original_indices.len(), face.canonical_indices.len());
        // No duplicates: canonical ids equal original ids, order untouched
        assert_eq!(face.canonical_indices.as_slice(), &[4, 2, 1, 3]);
    }

    #[test]
    fn test_out_of_range_reference_is_batch_error() {
        let mut points = Vec::new();
        for i in 0..10 {
            points.push((i as f64, 0.0, 0.0));
        }
        let mut doc = document(&points, &[&[1, 2, 999], &[1, 0, 2]]);
        let outcome = VertexWelder::default().weld(&mut doc);

        let err = reindex_faces(&mut doc, &outcome, true).unwrap_err();
        match err {
            Error::IndexOutOfRange { violations } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].reference, 999);
                assert_eq!(violations[0].max, 10);
                assert_eq!(violations[1].reference, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_mode_passes_value_through() {
        let mut doc = document(
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
            &[&[1, 2, 999]],
        );
        let outcome = VertexWelder::default().weld(&mut doc);
        reindex_faces(&mut doc, &outcome, false).unwrap();

        assert_eq!(doc.faces[0].canonical_indices.as_slice(), &[1, 2, 999]);
    }
}
