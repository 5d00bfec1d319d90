// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end preparation pipeline
//!
//! Parse → assemble → weld → reindex → localize, in one forward pass with no
//! backtracking, producing per-shell vertex/index arrays for the external
//! solid kernel plus a welding report. Single-threaded and deterministic;
//! the only blocking points are line reads from the input stream.

use std::io::BufRead;

use obj_weld_core::{parse_document, Document, ParseOptions, ShortVertexPolicy, Vertex};

use crate::error::Result;
use crate::localize::localize_shells;
use crate::mesh::ShellMesh;
use crate::reindex::reindex_faces;
use crate::weld::{EquivalenceClass, VertexWelder, DEFAULT_EPSILON};

/// Pipeline configuration
#[derive(Debug, Clone, Copy)]
pub struct PrepareOptions {
    /// Welding tolerance, applied per axis
    pub epsilon: f64,
    /// Fail on out-of-range face references (batch) instead of logging and
    /// passing them through
    pub strict_indices: bool,
    /// Fate of vertex lines with a coordinate count other than 3
    pub short_vertex: ShortVertexPolicy,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            strict_indices: true,
            short_vertex: ShortVertexPolicy::Drop,
        }
    }
}

/// One shell's kernel input, in object/shell order
#[derive(Debug, Clone)]
pub struct SolidInput {
    pub object_id: String,
    pub shell_id: String,
    pub mesh: ShellMesh,
}

/// Welding statistics; informational output, not consumed downstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldReport {
    /// Vertices parsed, including coordinate duplicates
    pub vertex_count: usize,
    /// Vertices after welding
    pub canonical_count: usize,
    /// Original vertices that collapsed onto an earlier one
    pub duplicates_merged: usize,
    /// Duplicate equivalence classes detected
    pub class_count: usize,
    /// Faces referencing at least one duplicate vertex
    pub faces_with_duplicates: usize,
}

/// Fully prepared model: assembled document plus kernel handoffs
#[derive(Debug)]
pub struct PreparedModel {
    pub document: Document,
    pub canonical_vertices: Vec<Vertex>,
    pub classes: Vec<EquivalenceClass>,
    pub solids: Vec<SolidInput>,
    pub report: WeldReport,
}

/// Run the whole preparation pipeline over an input stream.
pub fn prepare<R: BufRead>(reader: R, options: &PrepareOptions) -> Result<PreparedModel> {
    let parse_options = ParseOptions {
        short_vertex: options.short_vertex,
    };
    let mut document = parse_document(reader, &parse_options)?;
    tracing::debug!(
        vertices = document.vertices.len(),
        faces = document.faces.len(),
        objects = document.objects.len(),
        "parsed document"
    );

    let outcome = VertexWelder::new(options.epsilon).weld(&mut document);
    reindex_faces(&mut document, &outcome, options.strict_indices)?;
    localize_shells(
        &mut document,
        &outcome.canonical_vertices,
        options.epsilon,
        options.strict_indices,
    )?;

    let report = WeldReport {
        vertex_count: document.vertices.len(),
        canonical_count: outcome.canonical_vertices.len(),
        duplicates_merged: outcome.duplicates_merged(),
        class_count: outcome.classes.len(),
        faces_with_duplicates: document
            .faces
            .iter()
            .filter(|f| f.contains_duplicate)
            .count(),
    };

    let mut solids = Vec::new();
    for object in &document.objects {
        for shell in &object.shells {
            solids.push(SolidInput {
                object_id: object.id.clone(),
                shell_id: shell.id.clone(),
                mesh: ShellMesh::from_shell(shell, &document.faces),
            });
        }
    }

    tracing::info!(
        solids = solids.len(),
        canonical = report.canonical_count,
        merged = report.duplicates_merged,
        "prepared model"
    );

    Ok(PreparedModel {
        document,
        canonical_vertices: outcome.canonical_vertices,
        classes: outcome.classes,
        solids,
        report,
    })
}
