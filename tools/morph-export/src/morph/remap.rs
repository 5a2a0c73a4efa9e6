//! Compacted vertex index derivation
//!
//! Mesh welding/reduction removes vertices, so morph deltas must address
//! the compacted (post-weld) index space. The correspondence is precomputed
//! as an exclusive prefix sum over each submesh's retain mask instead of a
//! shared running counter, which keeps per-vertex delta extraction free of
//! cross-thread ordering dependencies.

use morph_common::{SectionRange, SourceMesh, Submesh};

/// Remap state for one submesh.
#[derive(Debug, Clone)]
pub struct SubmeshRemap {
    /// First compacted index owned by this submesh.
    pub base_vertex: u32,
    /// Number of retained vertices.
    pub retained_count: u32,
    raw_count: u32,
    /// `ranks[i]` = retained vertices before raw index `i`; length is
    /// `raw_count + 1` so the final entry holds the retained total.
    /// `None` when the submesh has no retain mask (identity mapping).
    ranks: Option<Vec<u32>>,
}

impl SubmeshRemap {
    fn build(base_vertex: u32, submesh: &Submesh) -> Self {
        let ranks = submesh.vertex_use_mask.as_ref().map(|mask| {
            let mut ranks = Vec::with_capacity(mask.len() + 1);
            let mut rank = 0u32;
            for &used in mask {
                ranks.push(rank);
                rank += used as u32;
            }
            ranks.push(rank);
            ranks
        });

        let raw_count = match &submesh.vertex_use_mask {
            Some(mask) => mask.len() as u32,
            None => submesh.vertex_count,
        };

        Self {
            base_vertex,
            retained_count: submesh.retained_count(),
            raw_count,
            ranks,
        }
    }

    /// Compacted index for raw vertex `raw`, or `None` if the vertex was
    /// welded away or lies outside the submesh.
    pub fn compacted(&self, raw: u32) -> Option<u32> {
        if raw >= self.raw_count {
            return None;
        }
        match &self.ranks {
            None => Some(self.base_vertex + raw),
            Some(ranks) => {
                let i = raw as usize;
                (ranks[i + 1] > ranks[i]).then(|| self.base_vertex + ranks[i])
            }
        }
    }
}

/// Correspondence between raw submesh-local vertex indices and the
/// compacted index space of the whole output mesh.
///
/// Compacted indices are dense, strictly increasing in raw-index order
/// within a submesh, and globally unique across submeshes.
#[derive(Debug, Clone)]
pub struct VertexRemap {
    submeshes: Vec<SubmeshRemap>,
}

impl VertexRemap {
    pub fn build(mesh: &SourceMesh) -> Self {
        let mut base_vertex = 0u32;
        let mut submeshes = Vec::with_capacity(mesh.submeshes.len());
        for submesh in &mesh.submeshes {
            let remap = SubmeshRemap::build(base_vertex, submesh);
            base_vertex += remap.retained_count;
            submeshes.push(remap);
        }
        Self { submeshes }
    }

    pub fn submesh(&self, idx: usize) -> &SubmeshRemap {
        &self.submeshes[idx]
    }

    /// Per-submesh vertex ranges in compacted index space, in submesh order.
    pub fn section_ranges(&self) -> Vec<SectionRange> {
        self.submeshes
            .iter()
            .map(|remap| SectionRange {
                base_vertex: remap.base_vertex,
                vertex_count: remap.retained_count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_common::Submesh;

    fn masked(vertex_count: u32, mask: Vec<bool>) -> Submesh {
        Submesh {
            vertex_count,
            vertex_use_mask: Some(mask),
            variants: Vec::new(),
        }
    }

    fn unmasked(vertex_count: u32) -> Submesh {
        Submesh {
            vertex_count,
            vertex_use_mask: None,
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_mask_skips_welded_vertex() {
        // vertex 3 of 5 welded away: survivors compact to {0,1,2,3}
        let mesh = SourceMesh {
            submeshes: vec![
                masked(5, vec![true, true, true, false, true]),
                unmasked(2),
            ],
        };
        let remap = VertexRemap::build(&mesh);

        let first = remap.submesh(0);
        assert_eq!(first.compacted(0), Some(0));
        assert_eq!(first.compacted(1), Some(1));
        assert_eq!(first.compacted(2), Some(2));
        assert_eq!(first.compacted(3), None);
        assert_eq!(first.compacted(4), Some(3));

        // next submesh starts right after the retained vertices
        let second = remap.submesh(1);
        assert_eq!(second.base_vertex, 4);
        assert_eq!(second.compacted(0), Some(4));
        assert_eq!(second.compacted(1), Some(5));
    }

    #[test]
    fn test_unmasked_identity() {
        let mesh = SourceMesh {
            submeshes: vec![unmasked(3)],
        };
        let remap = VertexRemap::build(&mesh);
        for raw in 0..3 {
            assert_eq!(remap.submesh(0).compacted(raw), Some(raw));
        }
        assert_eq!(remap.submesh(0).compacted(3), None);
    }

    #[test]
    fn test_out_of_range_raw_index() {
        let mesh = SourceMesh {
            submeshes: vec![masked(2, vec![true, true])],
        };
        let remap = VertexRemap::build(&mesh);
        assert_eq!(remap.submesh(0).compacted(2), None);
    }

    #[test]
    fn test_section_ranges_follow_retained_counts() {
        let mesh = SourceMesh {
            submeshes: vec![masked(4, vec![false, true, true, false]), unmasked(3)],
        };
        let ranges = VertexRemap::build(&mesh).section_ranges();
        assert_eq!(
            ranges,
            vec![
                SectionRange {
                    base_vertex: 0,
                    vertex_count: 2
                },
                SectionRange {
                    base_vertex: 2,
                    vertex_count: 3
                },
            ]
        );
    }
}
