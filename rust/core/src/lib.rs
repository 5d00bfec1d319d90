// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # obj-weld Core Parser
//!
//! Parser and model assembly for the polygon-mesh shell interchange format.
//! One directive per line (`v`, `f`, `s`, `g`), classified into records with
//! [fast-float](https://docs.rs/fast-float) /
//! [lexical-core](https://docs.rs/lexical-core) numeric parsing and
//! [memchr](https://docs.rs/memchr) separator scanning.
//!
//! ## Overview
//!
//! - **Line classification**: one [`Record`] per input line, no per-line flag
//!   state
//! - **Flat-model accumulation**: ordered vertex/face lists plus face groups
//!   delimited by shell markers ([`RawModelBuilder`])
//! - **Shell/object assembly**: nests shells under objects from the flat
//!   marker stream, validating local shell numbering ([`assemble`])
//!
//! ## Quick Start
//!
//! ```rust
//! use obj_weld_core::{parse_document, ParseOptions};
//!
//! let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng A\ns 1\nf 1//1 2//2 3//3\n";
//! let doc = parse_document(input.as_bytes(), &ParseOptions::default()).unwrap();
//! assert_eq!(doc.vertices.len(), 3);
//! assert_eq!(doc.objects[0].shells[0].faces.len(), 1);
//! ```
//!
//! Welding, face reindexing and per-shell localization live in
//! `obj-weld-geometry`.
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization support for the model types

pub mod assemble;
pub mod builder;
pub mod error;
pub mod line;
pub mod model;

pub use assemble::assemble;
pub use builder::{RawModelBuilder, ShortVertexPolicy};
pub use error::{Error, Result};
pub use line::{classify, FaceRefs, Record};
pub use model::{Document, Face, FaceId, Object, RawModel, Shell, Vertex};

use std::io::BufRead;

/// Parser configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Fate of `v` lines whose coordinate count is not 3
    pub short_vertex: ShortVertexPolicy,
}

/// Parse an input stream into an assembled [`Document`].
///
/// Reads line by line (the only blocking points of the pipeline), classifies
/// each line, accumulates the flat model and nests shells under objects.
pub fn parse_document<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Document> {
    let mut builder = RawModelBuilder::new(options.short_vertex);
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        builder.push(classify(&line, line_no)?, line_no)?;
    }
    assemble(builder.finish()?)
}
