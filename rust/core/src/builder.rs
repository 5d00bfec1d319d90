// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat-model accumulation
//!
//! [`RawModelBuilder`] consumes the stream of classified [`Record`]s and
//! accumulates the flat model: ordered global vertex list, ordered global
//! face list, face groups delimited by shell markers, and the flat shell and
//! object marker lists. All state lives in the builder value; there is no
//! process-wide accumulator.

use crate::error::{Error, Result};
use crate::line::Record;
use crate::model::{Face, FaceId, Object, RawModel, Shell, Vertex};

/// What to do with a `v` line whose coordinate count is not 3.
///
/// `Drop` discards such lines without diagnostic; `Reject` turns them into a
/// fatal parse error for stricter ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortVertexPolicy {
    #[default]
    Drop,
    Reject,
}

/// Accumulates classified records into a [`RawModel`]
#[derive(Debug)]
pub struct RawModelBuilder {
    short_vertex: ShortVertexPolicy,
    /// Next vertex id, 1-based in parse order
    vertex_index: u64,
    /// Faces seen since the previous shell marker
    pending: Vec<FaceId>,
    current_shell: Option<String>,
    current_object: Option<String>,
    model: RawModel,
}

impl RawModelBuilder {
    pub fn new(short_vertex: ShortVertexPolicy) -> Self {
        Self {
            short_vertex,
            vertex_index: 1,
            pending: Vec::new(),
            current_shell: None,
            current_object: None,
            model: RawModel::default(),
        }
    }

    /// Feed one classified record.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn push(&mut self, record: Record, line_no: usize) -> Result<()> {
        match record {
            Record::Vertex { x, y, z } => {
                let mut vertex = Vertex::new(self.vertex_index, x, y, z);
                vertex.shell_id = self.current_shell.clone();
                vertex.object_id = self.current_object.clone();
                self.model.vertices.push(vertex);
                self.vertex_index += 1;
            }
            Record::ShortVertex { count } => match self.short_vertex {
                ShortVertexPolicy::Drop => {
                    tracing::debug!(line_no, count, "dropping short vertex line");
                }
                ShortVertexPolicy::Reject => {
                    return Err(Error::parse(
                        line_no,
                        format!("vertex line has {count} coordinates, expected 3"),
                    ));
                }
            },
            Record::Face(refs) => {
                let face_id = self.model.faces.len();
                self.model.faces.push(Face::new(refs));
                self.pending.push(face_id);
            }
            Record::ShellMarker(id) => {
                // Finalize the group for the previous marker; the very first
                // marker finalizes the (possibly empty) sentinel group.
                self.model.groups.push(std::mem::take(&mut self.pending));
                self.current_shell = Some(id.clone());
                self.model.shells.push(Shell::new(id));
            }
            Record::ObjectMarker(id) => {
                self.current_object = Some(id.clone());
                self.current_shell = None;
                self.model.objects.push(Object::new(id));
            }
            Record::Ignored => {}
        }
        Ok(())
    }

    /// Flush the final pending face group and check the group/shell pairing
    /// invariant the assembler depends on: `groups.len() == shells.len() + 1`
    /// (leading sentinel group).
    pub fn finish(mut self) -> Result<RawModel> {
        self.model.groups.push(std::mem::take(&mut self.pending));

        if self.model.groups.len() != self.model.shells.len() + 1 {
            return Err(Error::StructuralMismatch(format!(
                "{} face groups for {} shells, expected shells + 1",
                self.model.groups.len(),
                self.model.shells.len()
            )));
        }
        Ok(self.model)
    }
}
