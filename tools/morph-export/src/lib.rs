//! morph-export library
//!
//! Converts per-vertex blend shapes on an imported mesh into a compact,
//! deduplicated, render-ready morph target set:
//!
//! - [`import`] - glTF/GLB to [`morph_common::SourceMesh`] adapter
//! - [`morph`] - the extraction -> naming -> assembly pipeline
//! - [`commit`] - replace-all handoff to the mesh owner
//! - [`formats`] - .morphset file writer/reader

pub mod commit;
pub mod formats;
pub mod import;
pub mod morph;

// Re-export key types for conversion
pub use commit::{convert_and_commit, CommitError, CurveMetadata, MeshMorphStore};
pub use formats::{read_morph_set, write_morph_set};
pub use import::load_source_mesh;
pub use morph::convert_morph_targets;
