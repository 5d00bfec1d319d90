// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for parsing and model assembly
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing and assembling a shell model
#[derive(Error, Debug)]
pub enum Error {
    #[error("input unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// Non-numeric coordinate or index token, or a structurally invalid
    /// directive. Fatal: the pipeline does not recover from bad tokens.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The flat record stream violated a structural invariant
    /// (face-group/shell pairing, shell numbering monotonicity).
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
