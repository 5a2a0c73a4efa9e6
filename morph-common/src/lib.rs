//! Shared types for the morphpack asset pipeline
//!
//! This crate provides the plain data model exchanged between the mesh
//! importer, the morph-target converter and the mesh owner:
//!
//! - [`types`] - source mesh / shape variant input model and the
//!   render-ready morph-target output model
//! - [`options`] - conversion options and threshold constants
//! - [`formats`] - MorphSet binary file format (.morphset)

pub mod formats;
pub mod options;
pub mod types;

// Re-export commonly used items
pub use formats::{MorphSetHeader, MorphTargetRecordHeader, DELTA_RECORD_SIZE, MORPH_SET_EXT};
pub use options::{
    ConvertOptions, DEFAULT_POSITION_DELTA_THRESHOLD, DEFAULT_SCALE,
    NORMAL_DELTA_SQUARED_THRESHOLD,
};
pub use types::{
    MorphTarget, MorphTargetDelta, MorphTargetSet, SectionRange, ShapeVariant, SourceMesh, Submesh,
};
