//! Morph-target conversion pipeline (blend shapes -> morph target set)

mod assemble;
mod delta;
mod names;
mod remap;
mod sections;

// Re-export public API
pub use assemble::MorphAssembler;
pub use delta::build_deltas;
pub use names::{sanitize_morph_name, NameRegistry, ResolvedName, RENAME_PATCH_PREFIX};
pub use remap::{SubmeshRemap, VertexRemap};
pub use sections::collect_section_indices;

use morph_common::{ConvertOptions, MorphTargetSet, SourceMesh};

/// Convert every shape variant of `mesh` into a deduplicated, render-ready
/// morph target set.
///
/// Submeshes and their variants are processed in order: the name registry
/// and the output ordering are both order-sensitive. The pipeline never
/// fails; variants that duplicate an earlier name or produce no qualifying
/// deltas are skipped.
pub fn convert_morph_targets(mesh: &SourceMesh, options: &ConvertOptions) -> MorphTargetSet {
    let remap = VertexRemap::build(mesh);
    let ranges = remap.section_ranges();
    let mut registry = NameRegistry::default();
    let mut assembler = MorphAssembler::new(options, &ranges);

    for (submesh_idx, submesh) in mesh.submeshes.iter().enumerate() {
        for variant in &submesh.variants {
            let name = match registry.resolve(&variant.name, options.use_original_names) {
                ResolvedName::Unique(name) => name,
                ResolvedName::Duplicate => {
                    tracing::debug!(
                        "shape variant '{}' duplicates an earlier variant, skipping",
                        variant.name
                    );
                    continue;
                }
            };

            let deltas = build_deltas(variant, submesh, remap.submesh(submesh_idx), options);
            if deltas.is_empty() {
                tracing::debug!("shape variant '{}' has no deltas, skipping", variant.name);
                continue;
            }

            assembler.push(name, deltas);
        }
    }

    let set = assembler.finish(registry.into_names());
    tracing::info!(
        "converted {} morph targets ({} resolved names) from {} submeshes",
        set.targets.len(),
        set.names.len(),
        mesh.submeshes.len()
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use morph_common::{ShapeVariant, Submesh};

    fn variant(name: &str, positions: Vec<[f32; 3]>) -> ShapeVariant {
        ShapeVariant {
            name: name.to_string(),
            vertex_count: positions.len() as u32,
            positions: Some(positions),
            normals: None,
        }
    }

    fn single_submesh(variants: Vec<ShapeVariant>, vertex_count: u32) -> SourceMesh {
        SourceMesh {
            submeshes: vec![Submesh {
                vertex_count,
                vertex_use_mask: None,
                variants,
            }],
        }
    }

    #[test]
    fn test_blink_scenario_axis_conversion_and_scale() {
        let mesh = single_submesh(vec![variant("Blink", vec![[-0.02, 0.0, 0.01]])], 1);
        let options = ConvertOptions {
            scale: 100.0,
            position_delta_threshold: 0.0,
            ..Default::default()
        };

        let set = convert_morph_targets(&mesh, &options);
        assert_eq!(set.targets.len(), 1);
        assert_eq!(set.targets[0].name, "Blink");
        assert_eq!(set.targets[0].deltas.len(), 1);
        let delta = set.targets[0].deltas[0];
        assert_eq!(delta.source_idx, 0);
        assert_eq!(delta.position_delta, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_deltas_sorted_and_unique() {
        let mesh = single_submesh(
            vec![variant(
                "Wave",
                vec![[0.1, 0.0, 0.0], [0.2, 0.0, 0.0], [0.3, 0.0, 0.0]],
            )],
            3,
        );
        let set = convert_morph_targets(&mesh, &ConvertOptions::default());
        assert_eq!(set.targets.len(), 1);
        let indices: Vec<u32> = set.targets[0].deltas.iter().map(|d| d.source_idx).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_idempotence() {
        let mesh = SourceMesh {
            submeshes: vec![
                Submesh {
                    vertex_count: 3,
                    vertex_use_mask: Some(vec![true, false, true]),
                    variants: vec![variant(
                        "Smile.L",
                        vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]],
                    )],
                },
                Submesh {
                    vertex_count: 2,
                    vertex_use_mask: None,
                    variants: vec![variant("Smile.R", vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])],
                },
            ],
        };
        let options = ConvertOptions::default();

        let first = convert_morph_targets(&mesh, &options);
        let second = convert_morph_targets(&mesh, &options);

        assert_eq!(first.names, second.names);
        assert_eq!(first.targets.len(), second.targets.len());
        for (a, b) in first.targets.iter().zip(&second.targets) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.deltas, b.deltas);
            assert_eq!(a.section_indices, b.section_indices);
        }
    }

    #[test]
    fn test_exact_raw_name_repeat_discarded() {
        let mesh = single_submesh(
            vec![
                variant("Blink", vec![[0.1, 0.0, 0.0]]),
                variant("Blink", vec![[0.5, 0.0, 0.0]]),
            ],
            1,
        );
        let set = convert_morph_targets(&mesh, &ConvertOptions::default());
        assert_eq!(set.targets.len(), 1);
        // first-seen variant wins
        assert_eq!(set.targets[0].deltas[0].position_delta.x, -0.1 * 100.0);
    }

    #[test]
    fn test_empty_variant_still_registers_name() {
        // zero displacement everywhere: no target, but the resolved name is
        // still reported for curve metadata flagging
        let mesh = single_submesh(vec![variant("Static", vec![[0.0, 0.0, 0.0]])], 1);
        let set = convert_morph_targets(&mesh, &ConvertOptions::default());
        assert!(set.targets.is_empty());
        assert_eq!(set.names, vec!["Static".to_string()]);
    }

    #[test]
    fn test_section_association_across_submeshes() {
        let mesh = SourceMesh {
            submeshes: vec![
                Submesh {
                    vertex_count: 2,
                    vertex_use_mask: None,
                    variants: vec![variant("A", vec![[0.1, 0.0, 0.0], [0.0, 0.0, 0.0]])],
                },
                Submesh {
                    vertex_count: 2,
                    vertex_use_mask: None,
                    variants: vec![variant("B", vec![[0.0, 0.0, 0.0], [0.2, 0.0, 0.0]])],
                },
            ],
        };
        let set = convert_morph_targets(&mesh, &ConvertOptions::default());
        assert_eq!(set.targets.len(), 2);
        assert_eq!(set.targets[0].section_indices, vec![0]);
        assert_eq!(set.targets[1].section_indices, vec![1]);
        // second submesh's deltas live in its own compacted range
        assert_eq!(set.targets[1].deltas[0].source_idx, 3);
    }
}
