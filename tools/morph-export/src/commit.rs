//! Mesh-owner commit step
//!
//! The converter hands over a complete morph target set; the mesh owner
//! replaces its entire current set and re-flags curve metadata in one go
//! (remove-all-then-add-all, never incremental diffing). Relative to any
//! concurrent reader of the mesh's morph data this is a single critical
//! section.

use hashbrown::HashMap;
use morph_common::{ConvertOptions, MorphTarget, MorphTargetSet, SourceMesh};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommitError {
    /// The skinned mesh this run should attach to does not exist.
    #[error("target mesh is missing")]
    MissingTargetMesh,
}

/// Per-curve metadata kept by the mesh owner's animation system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurveMetadata {
    /// The curve drives a morph target.
    pub morph_target: bool,
}

/// Stand-in for the host skinned mesh: owns the committed morph targets
/// and the per-name curve metadata store.
#[derive(Debug, Default)]
pub struct MeshMorphStore {
    morph_targets: Vec<MorphTarget>,
    curve_metadata: HashMap<String, CurveMetadata>,
}

impl MeshMorphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn morph_targets(&self) -> &[MorphTarget] {
        &self.morph_targets
    }

    pub fn curve_metadata(&self, name: &str) -> Option<&CurveMetadata> {
        self.curve_metadata.get(name)
    }

    /// Pre-register curve metadata, as the host's animation setup would.
    pub fn insert_curve_metadata(&mut self, name: impl Into<String>, metadata: CurveMetadata) {
        self.curve_metadata.insert(name.into(), metadata);
    }

    /// Replace the whole morph target collection and its curve metadata.
    ///
    /// Drops all current targets, removes stale morph-flagged metadata,
    /// installs the new collection, then creates or flags a metadata entry
    /// for every resolved name - including names whose variant produced no
    /// deltas.
    pub fn replace_morph_targets(&mut self, set: MorphTargetSet) {
        self.morph_targets.clear();
        self.curve_metadata.retain(|_, metadata| !metadata.morph_target);

        self.morph_targets = set.targets;
        for name in set.names {
            self.curve_metadata.entry(name).or_default().morph_target = true;
        }
    }
}

/// Run the conversion and commit the result into `store`.
///
/// A configuration-skipped run is a no-op success. The sole observable
/// failure is a missing target mesh.
pub fn convert_and_commit(
    store: Option<&mut MeshMorphStore>,
    mesh: &SourceMesh,
    options: &ConvertOptions,
) -> Result<(), CommitError> {
    if options.skip_morph_targets {
        return Ok(());
    }
    let store = store.ok_or(CommitError::MissingTargetMesh)?;

    let set = crate::morph::convert_morph_targets(mesh, options);
    store.replace_morph_targets(set);
    Ok(())
}
