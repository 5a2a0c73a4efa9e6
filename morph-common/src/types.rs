//! Data model for morph-target conversion
//!
//! Input side: a [`SourceMesh`] as produced by a mesh importer - ordered
//! submeshes, each with an optional per-vertex retain mask (from mesh
//! welding/reduction) and its blend-shape [`ShapeVariant`]s.
//!
//! Output side: an ordered [`MorphTargetSet`] ready to be committed to a
//! skinned mesh as a single replace-all operation.

use glam::Vec3;

/// Imported mesh: ordered sequence of submeshes.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    pub submeshes: Vec<Submesh>,
}

/// One renderable sub-part of the source mesh.
#[derive(Debug, Clone, Default)]
pub struct Submesh {
    /// Raw (pre-weld) vertex count.
    pub vertex_count: u32,
    /// Per-vertex retain mask from mesh welding/reduction.
    /// `true` = the vertex survived and owns a compacted index.
    /// `None` means all vertices are retained.
    pub vertex_use_mask: Option<Vec<bool>>,
    /// Blend shapes defined on this submesh.
    pub variants: Vec<ShapeVariant>,
}

impl Submesh {
    /// Number of vertices that survive welding (mask `true` count, or the
    /// full vertex count when there is no mask).
    pub fn retained_count(&self) -> u32 {
        match &self.vertex_use_mask {
            Some(mask) => mask.iter().filter(|&&used| used).count() as u32,
            None => self.vertex_count,
        }
    }
}

/// A named alternate vertex pose of a submesh (blend shape).
///
/// The position/normal arrays are dense per-vertex displacements from the
/// base pose, in source coordinates. Either array may be absent.
#[derive(Debug, Clone, Default)]
pub struct ShapeVariant {
    pub name: String,
    pub vertex_count: u32,
    pub positions: Option<Vec<[f32; 3]>>,
    pub normals: Option<Vec<[f32; 3]>>,
}

/// One sparse morph displacement, in engine coordinates.
///
/// `source_idx` is a compacted (post-weld) vertex index, not the raw
/// submesh-local index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphTargetDelta {
    pub source_idx: u32,
    pub position_delta: Vec3,
    pub normal_delta: Vec3,
}

/// A render-ready morph target.
///
/// `deltas` is sorted ascending by `source_idx` with no duplicate indices,
/// so runtime blending can traverse it sequentially. `section_indices`
/// lists the submeshes the deltas touch, in first-hit order.
#[derive(Debug, Clone, Default)]
pub struct MorphTarget {
    pub name: String,
    pub deltas: Vec<MorphTargetDelta>,
    pub section_indices: Vec<u32>,
}

/// Result of one conversion run.
///
/// `names` holds every resolved morph name in resolution order, including
/// names whose variant produced no qualifying deltas; the mesh owner flags
/// curve metadata for all of them. `targets` only contains non-empty
/// morph targets and preserves first-resolution order.
#[derive(Debug, Clone, Default)]
pub struct MorphTargetSet {
    pub targets: Vec<MorphTarget>,
    pub names: Vec<String>,
}

/// Contiguous interval of compacted vertex indices owned by one submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRange {
    pub base_vertex: u32,
    pub vertex_count: u32,
}

impl SectionRange {
    pub fn contains(&self, compacted_idx: u32) -> bool {
        self.base_vertex <= compacted_idx && compacted_idx < self.base_vertex + self.vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retained_count_without_mask() {
        let submesh = Submesh {
            vertex_count: 7,
            vertex_use_mask: None,
            variants: Vec::new(),
        };
        assert_eq!(submesh.retained_count(), 7);
    }

    #[test]
    fn test_retained_count_with_mask() {
        let submesh = Submesh {
            vertex_count: 5,
            vertex_use_mask: Some(vec![true, true, true, false, true]),
            variants: Vec::new(),
        };
        assert_eq!(submesh.retained_count(), 4);
    }

    #[test]
    fn test_section_range_bounds() {
        let range = SectionRange {
            base_vertex: 4,
            vertex_count: 3,
        };
        assert!(!range.contains(3));
        assert!(range.contains(4));
        assert!(range.contains(6));
        assert!(!range.contains(7));
    }
}
