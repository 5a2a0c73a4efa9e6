//! Sparse delta extraction for one shape variant
//!
//! Walks the variant's dense displacement arrays and emits one
//! `MorphTargetDelta` per vertex that survives welding and carries a
//! non-zero displacement of the requested kinds. Each vertex depends only
//! on its own input, so the walk runs as a rayon indexed parallel map; the
//! output order matches raw-index order.

use glam::Vec3;
use morph_common::{ConvertOptions, MorphTargetDelta, ShapeVariant, Submesh};
use rayon::prelude::*;

use super::remap::SubmeshRemap;

/// Reorder source axes into the engine's coordinate convention:
/// right-handed `(x, y, z)` maps to `(-x, z, y)`.
fn convert_axes(v: [f32; 3]) -> Vec3 {
    Vec3::new(-v[0], v[2], v[1])
}

/// Extract the sparse delta list for one shape variant.
///
/// Never fails: a vertex-count mismatch with the base submesh is logged and
/// the variant's own count is used, welded-away vertices are skipped, and an
/// empty result means the caller should discard the variant.
pub fn build_deltas(
    variant: &ShapeVariant,
    submesh: &Submesh,
    remap: &SubmeshRemap,
    options: &ConvertOptions,
) -> Vec<MorphTargetDelta> {
    if variant.vertex_count != submesh.vertex_count {
        tracing::warn!(
            "shape variant '{}' has {} vertices but its submesh has {}",
            variant.name,
            variant.vertex_count,
            submesh.vertex_count
        );
    }

    (0..variant.vertex_count)
        .into_par_iter()
        .filter_map(|raw| build_vertex_delta(raw, variant, remap, options))
        .collect()
}

fn build_vertex_delta(
    raw: u32,
    variant: &ShapeVariant,
    remap: &SubmeshRemap,
    options: &ConvertOptions,
) -> Option<MorphTargetDelta> {
    let source_idx = remap.compacted(raw)?;
    let i = raw as usize;

    let mut position_delta = Vec3::ZERO;
    if let Some(p) = variant.positions.as_ref().and_then(|p| p.get(i)) {
        position_delta = convert_axes(*p) * options.scale;
        if options.alternate_revision_flip {
            position_delta.x = -position_delta.x;
            position_delta.y = -position_delta.y;
        }
    }

    let mut normal_delta = Vec3::ZERO;
    if options.include_normal_deltas {
        if let Some(n) = variant.normals.as_ref().and_then(|n| n.get(i)) {
            let n = convert_axes(*n);
            // magnitudes above 1 are degenerate or garbage normals
            normal_delta = if n.length() > 1.0 { n.normalize() } else { n };
            if options.alternate_revision_flip {
                normal_delta.x = -normal_delta.x;
                normal_delta.y = -normal_delta.y;
            }
        }
    }

    // skip vertices that carry no displacement of the requested kinds
    if position_delta == Vec3::ZERO
        && (!options.include_normal_deltas || normal_delta == Vec3::ZERO)
    {
        return None;
    }

    Some(MorphTargetDelta {
        source_idx,
        position_delta,
        normal_delta,
    })
}
