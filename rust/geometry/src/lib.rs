//! obj-weld Geometry Processing
//!
//! Vertex welding, face reindexing and per-shell localization over the model
//! parsed by `obj-weld-core`, producing the per-shell vertex/index arrays an
//! exact-arithmetic solid kernel consumes.

pub mod error;
pub mod grid;
pub mod localize;
pub mod mesh;
pub mod pipeline;
pub mod reindex;
pub mod weld;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, IndexViolation, Result};
pub use grid::SpatialGrid;
pub use localize::localize_shells;
pub use mesh::ShellMesh;
pub use pipeline::{prepare, PrepareOptions, PreparedModel, SolidInput, WeldReport};
pub use reindex::reindex_faces;
pub use weld::{EquivalenceClass, VertexWelder, WeldOutcome, DEFAULT_EPSILON};
