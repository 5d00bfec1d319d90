// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shell/object assembly
//!
//! Pairs the builder's face groups with their shells and nests shells under
//! objects. The input format carries no explicit nesting: the convention is
//! that each object's shells are numbered locally starting at `"1"`, so a
//! shell id of `"1"` arriving at a non-empty object closes that object.
//!
//! Two hardenings over the positional-id heuristic:
//!
//! - numbering monotonicity is validated and violations fail loudly with
//!   [`Error::StructuralMismatch`] instead of silently misassigning shells;
//! - when shells keep arriving after the declared objects are exhausted (or
//!   none were declared), a new object is synthesized with a generated id.

use crate::error::{Error, Result};
use crate::model::{Document, Object, RawModel};

/// Nest shells under objects and produce the assembled [`Document`].
///
/// Consumes the flat model; shells and faces are moved, never copied.
pub fn assemble(raw: RawModel) -> Result<Document> {
    let RawModel {
        vertices,
        faces,
        mut shells,
        objects,
        groups,
    } = raw;

    // groups[0] is the sentinel for content preceding the first marker;
    // the builder has already verified groups.len() == shells.len() + 1.
    for (shell, group) in shells.iter_mut().zip(groups.into_iter().skip(1)) {
        shell.faces = group;
    }

    let mut objects = objects;
    let mut oindex: Option<usize> = if objects.is_empty() { None } else { Some(0) };

    for shell in shells {
        let advance = match oindex {
            None => true,
            // First shell of an object is accepted unconditionally
            Some(i) => !objects[i].shells.is_empty() && shell.id == "1",
        };

        if advance {
            match oindex {
                Some(i) if i + 1 < objects.len() => oindex = Some(i + 1),
                _ => {
                    let id = format!("object-{}", objects.len() + 1);
                    tracing::debug!(object_id = %id, shell_id = %shell.id, "synthesizing object");
                    objects.push(Object::new(id));
                    oindex = Some(objects.len() - 1);
                }
            }
        }

        let object = &mut objects[oindex.expect("object index set above")];

        // Numeric shell ids must continue this object's 1, 2, 3, ... sequence
        if let Ok(ordinal) = shell.id.parse::<u64>() {
            let expected = object.shells.len() as u64 + 1;
            if ordinal != expected {
                return Err(Error::StructuralMismatch(format!(
                    "shell id '{}' in object '{}' breaks local numbering, expected '{}'",
                    shell.id, object.id, expected
                )));
            }
        }
        object.shells.push(shell);
    }

    Ok(Document {
        vertices,
        faces,
        objects,
    })
}
