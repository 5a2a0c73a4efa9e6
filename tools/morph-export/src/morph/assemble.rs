//! Morph target assembly
//!
//! Applies the delta thresholds, associates submesh ranges, sorts each
//! surviving target's deltas for sequential runtime traversal and emits
//! the final ordered collection.

use morph_common::{
    ConvertOptions, MorphTarget, MorphTargetDelta, MorphTargetSet, SectionRange,
    NORMAL_DELTA_SQUARED_THRESHOLD,
};

use super::sections::collect_section_indices;

/// Accumulates named delta lists and produces the final morph target set.
pub struct MorphAssembler<'a> {
    options: &'a ConvertOptions,
    ranges: &'a [SectionRange],
    targets: Vec<MorphTarget>,
}

impl<'a> MorphAssembler<'a> {
    pub fn new(options: &'a ConvertOptions, ranges: &'a [SectionRange]) -> Self {
        Self {
            options,
            ranges,
            targets: Vec::new(),
        }
    }

    /// Add one resolved, extracted delta list.
    ///
    /// Deltas must clear the position threshold or, with normal deltas
    /// enabled, the fixed squared normal threshold - both strictly
    /// greater-than. A target left with no deltas is discarded (its name
    /// stays resolved).
    pub fn push(&mut self, name: String, deltas: Vec<MorphTargetDelta>) {
        let threshold = self.options.position_delta_threshold;
        let threshold_sq = threshold * threshold;
        let include_normals = self.options.include_normal_deltas;

        let mut deltas: Vec<MorphTargetDelta> = deltas
            .into_iter()
            .filter(|d| {
                d.position_delta.length_squared() > threshold_sq
                    || (include_normals
                        && d.normal_delta.length_squared() > NORMAL_DELTA_SQUARED_THRESHOLD)
            })
            .collect();

        if deltas.is_empty() {
            tracing::debug!("morph target '{}' has no deltas above threshold", name);
            return;
        }

        let section_indices = collect_section_indices(&deltas, self.ranges);

        // sort by base-mesh index so runtime blending can traverse the list
        // sequentially; indices are unique per target, ties cannot occur
        deltas.sort_by_key(|d| d.source_idx);
        deltas.shrink_to_fit();

        self.targets.push(MorphTarget {
            name,
            deltas,
            section_indices,
        });
    }

    /// Final collection, in first-successful-resolution order. `names` is
    /// the full resolved-name list from the registry.
    pub fn finish(self, names: Vec<String>) -> MorphTargetSet {
        MorphTargetSet {
            targets: self.targets,
            names,
        }
    }
}
