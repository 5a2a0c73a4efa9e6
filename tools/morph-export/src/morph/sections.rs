//! Submesh range association
//!
//! Tags a morph target with the submesh sections its deltas fall in, so the
//! renderer knows which sections the target can affect.

use morph_common::{MorphTargetDelta, SectionRange};

/// Section ids touched by `deltas`, in first-hit order.
///
/// Ranges are disjoint by construction, so each delta contributes at most
/// one id; the scan stops at the first containing range. An empty result is
/// tolerated (no range claimed any delta).
pub fn collect_section_indices(deltas: &[MorphTargetDelta], ranges: &[SectionRange]) -> Vec<u32> {
    let mut section_indices: Vec<u32> = Vec::new();
    for delta in deltas {
        for (section_idx, range) in ranges.iter().enumerate() {
            let section_idx = section_idx as u32;
            if section_indices.contains(&section_idx) {
                continue;
            }
            if range.contains(delta.source_idx) {
                section_indices.push(section_idx);
                break;
            }
        }
    }
    section_indices
}
