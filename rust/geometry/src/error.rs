// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for welding and localization
pub type Result<T> = std::result::Result<T, Error>;

/// One face reference outside the valid vertex-id range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexViolation {
    /// Id of the offending face in the document's global face list
    pub face: usize,
    /// Position of the reference within the face
    pub slot: usize,
    /// The out-of-range value
    pub reference: u64,
    /// Highest valid 1-based vertex id
    pub max: u64,
}

impl std::fmt::Display for IndexViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "face {} slot {}: reference {} outside [1, {}]",
            self.face, self.slot, self.reference, self.max
        )
    }
}

/// Errors that can occur during welding and localization
#[derive(Error, Debug)]
pub enum Error {
    /// Face references outside the parsed vertex range, collected across the
    /// whole document and surfaced once.
    #[error("{}", summarize(.violations))]
    IndexOutOfRange { violations: Vec<IndexViolation> },

    #[error("core parser error: {0}")]
    Core(#[from] obj_weld_core::Error),
}

fn summarize(violations: &[IndexViolation]) -> String {
    match violations.first() {
        Some(first) => format!(
            "{} face reference(s) out of range, first: {}",
            violations.len(),
            first
        ),
        None => "face reference(s) out of range".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_display() {
        let err = Error::IndexOutOfRange {
            violations: vec![IndexViolation { face: 3, slot: 1, reference: 42, max: 10 }],
        };
        assert_eq!(
            err.to_string(),
            "1 face reference(s) out of range, first: face 3 slot 1: reference 42 outside [1, 10]"
        );
    }

    #[test]
    fn test_index_error_display_without_violations() {
        // The variant's field is public, so an empty list must still format
        let err = Error::IndexOutOfRange { violations: Vec::new() };
        assert_eq!(err.to_string(), "face reference(s) out of range");
    }
}
