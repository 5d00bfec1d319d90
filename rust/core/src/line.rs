// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line classification
//!
//! Tokenizes one input line into a classified [`Record`]. The format is one
//! directive per line, space-delimited:
//!
//! - `v x y z` vertex with three floating-point coordinates
//! - `f i1//i1 i2//i2 i3//i3 ...` face; the component before `//` is a
//!   1-based vertex reference, texture/normal components are discarded
//! - `s <id>` shell marker
//! - `g <id>` object marker
//!
//! Blank lines and unrecognized directives (`vn`, comments, ...) classify as
//! [`Record::Ignored`]. Number parsing uses [fast-float](https://docs.rs/fast-float)
//! for coordinates and [lexical-core](https://docs.rs/lexical-core) for
//! references; a malformed numeric token is a fatal [`Error::Parse`].

use memchr::memmem;
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Face vertex references; most faces are triangles or quads
pub type FaceRefs = SmallVec<[u64; 4]>;

/// One classified input line
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `v` line with exactly three coordinates
    Vertex { x: f64, y: f64, z: f64 },
    /// `v` line whose coordinate count is not 3; the builder's
    /// [`ShortVertexPolicy`](crate::builder::ShortVertexPolicy) decides its fate
    ShortVertex { count: usize },
    /// `f` line: ordered 1-based vertex references (winding order)
    Face(FaceRefs),
    /// `s` line: starts a new shell, finalizing the current face group
    ShellMarker(String),
    /// `g` line: starts a new object, no implicit shell
    ObjectMarker(String),
    /// Blank line or unrecognized directive
    Ignored,
}

/// Classify a single input line.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn classify(line: &str, line_no: usize) -> Result<Record> {
    let mut tokens = line.split_ascii_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(Record::Ignored);
    };

    match keyword {
        "v" => classify_vertex(tokens, line_no),
        "f" => classify_face(tokens, line_no),
        "s" => marker(tokens.next(), line_no, "shell").map(Record::ShellMarker),
        "g" => marker(tokens.next(), line_no, "object").map(Record::ObjectMarker),
        _ => Ok(Record::Ignored),
    }
}

fn classify_vertex<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Record> {
    let mut coords: SmallVec<[f64; 3]> = SmallVec::new();
    for token in tokens {
        let value = fast_float::parse::<f64, _>(token)
            .map_err(|_| Error::parse(line_no, format!("bad coordinate token '{token}'")))?;
        coords.push(value);
    }

    if coords.len() == 3 {
        Ok(Record::Vertex {
            x: coords[0],
            y: coords[1],
            z: coords[2],
        })
    } else {
        Ok(Record::ShortVertex { count: coords.len() })
    }
}

fn classify_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Record> {
    let mut refs = FaceRefs::new();
    for token in tokens {
        refs.push(parse_face_ref(token, line_no)?);
    }

    // A polygon needs at least three vertices; a 2-gon can never bound a
    // manifold shell, so reject early instead of feeding the kernel.
    if refs.len() < 3 {
        return Err(Error::parse(
            line_no,
            format!("face has {} vertex references, at least 3 required", refs.len()),
        ));
    }
    Ok(Record::Face(refs))
}

/// Parse one face token of the form `idx//idx` (or a bare `idx`).
///
/// Only the component before `//` is kept; texture/normal references are
/// discarded. A token without the separator is taken whole.
#[inline]
fn parse_face_ref(token: &str, line_no: usize) -> Result<u64> {
    let bytes = token.as_bytes();
    let reference = match memmem::find(bytes, b"//") {
        Some(pos) => &bytes[..pos],
        None => bytes,
    };
    lexical_core::parse::<u64>(reference)
        .map_err(|_| Error::parse(line_no, format!("bad vertex reference '{token}'")))
}

fn marker(id: Option<&str>, line_no: usize, kind: &str) -> Result<String> {
    id.map(str::to_owned)
        .ok_or_else(|| Error::parse(line_no, format!("{kind} marker missing id")))
}
