// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shell localization
//!
//! Projects the canonical vertices actually used by each shell into a
//! compact local array and rewrites face references as local 0-based
//! indices, the exact contract the external manifold-solid builder expects.
//! The dedup is shell-local and independent of the global weld: a fresh ε
//! box-test existence check starts empty for every shell.
//!
//! Manifold-ness (closed, 2-manifold, consistent winding) is assumed here,
//! not verified.

use obj_weld_core::{Document, Vertex};

use crate::error::{Error, IndexViolation, Result};
use crate::grid::SpatialGrid;

/// Fill `local_vertices` on every shell and `local_indices` on every face.
///
/// `canonical` is the welded vertex list; `canonical_indices` entries are
/// 1-based references into it. In strict mode an unresolvable reference is a
/// batch [`Error::IndexOutOfRange`]; in lenient mode it is logged and the
/// entry is skipped.
pub fn localize_shells(
    document: &mut Document,
    canonical: &[Vertex],
    epsilon: f64,
    strict: bool,
) -> Result<()> {
    let max = canonical.len() as u64;
    let mut violations: Vec<IndexViolation> = Vec::new();

    let Document {
        ref mut faces,
        ref mut objects,
        ..
    } = *document;

    for object in objects.iter_mut() {
        for shell in object.shells.iter_mut() {
            let mut seen = SpatialGrid::new(epsilon);
            let mut local_vertices: Vec<Vertex> = Vec::new();

            for &face_id in &shell.faces {
                let face = &mut faces[face_id];
                face.local_indices.clear();

                for (slot, &reference) in face.canonical_indices.iter().enumerate() {
                    if reference == 0 || reference > max {
                        let violation = IndexViolation {
                            face: face_id,
                            slot,
                            reference,
                            max,
                        };
                        if strict {
                            violations.push(violation);
                        } else {
                            tracing::warn!(%violation, "unresolvable canonical reference, skipping");
                        }
                        continue;
                    }

                    let vertex = &canonical[reference as usize - 1];
                    let local = match seen.find_close(vertex.x, vertex.y, vertex.z) {
                        Some(handle) => u64::from(handle),
                        None => {
                            let handle = seen.insert(vertex.x, vertex.y, vertex.z);
                            local_vertices.push(vertex.clone());
                            u64::from(handle)
                        }
                    };
                    face.local_indices.push(local);
                }
            }
            shell.local_vertices = local_vertices;
        }
    }

    if !violations.is_empty() {
        return Err(Error::IndexOutOfRange { violations });
    }
    Ok(())
}
