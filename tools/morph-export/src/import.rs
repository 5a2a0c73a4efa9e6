//! glTF/GLB -> SourceMesh adapter
//!
//! Builds the converter's input model from a glTF file: one submesh per
//! primitive, shape variants from glTF morph targets. Variant names come
//! from the mesh `extras.targetNames` array (the de-facto convention for
//! naming morph targets), with a deterministic `"<mesh>_<target>"` fallback.
//!
//! The import path runs no mesh welding, so submeshes carry no retain mask.

use anyhow::{Context, Result};
use morph_common::{ShapeVariant, SourceMesh, Submesh};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct MeshExtras {
    #[serde(default, rename = "targetNames")]
    target_names: Vec<String>,
}

/// Load blend-shape input data from a glTF/GLB file.
pub fn load_source_mesh(input: &Path) -> Result<SourceMesh> {
    let (document, buffers, _images) =
        gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let mut submeshes = Vec::new();
    for (mesh_idx, mesh) in document.meshes().enumerate() {
        let target_names = read_target_names(&mesh);

        for primitive in mesh.primitives() {
            let Some(position_accessor) = primitive.get(&gltf::Semantic::Positions) else {
                tracing::warn!("mesh {} has a primitive without positions, skipping", mesh_idx);
                continue;
            };
            let vertex_count = position_accessor.count() as u32;

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let mut variants = Vec::new();
            for (target_idx, (target_positions, target_normals, _tangents)) in
                reader.read_morph_targets().enumerate()
            {
                let name = target_names
                    .get(target_idx)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", mesh_idx, target_idx));

                let positions: Option<Vec<[f32; 3]>> = target_positions.map(|iter| iter.collect());
                let normals: Option<Vec<[f32; 3]>> = target_normals.map(|iter| iter.collect());

                // displacement arrays define the variant's own vertex count;
                // the converter tolerates a mismatch with the base submesh
                let variant_vertex_count = positions
                    .as_ref()
                    .map(|p| p.len() as u32)
                    .or_else(|| normals.as_ref().map(|n| n.len() as u32))
                    .unwrap_or(vertex_count);

                variants.push(ShapeVariant {
                    name,
                    vertex_count: variant_vertex_count,
                    positions,
                    normals,
                });
            }

            submeshes.push(Submesh {
                vertex_count,
                vertex_use_mask: None,
                variants,
            });
        }
    }

    Ok(SourceMesh { submeshes })
}

/// Morph target names from the mesh `extras.targetNames` array, if present.
fn read_target_names(mesh: &gltf::Mesh) -> Vec<String> {
    let Some(raw) = mesh.extras() else {
        return Vec::new();
    };
    match serde_json::from_str::<MeshExtras>(raw.get()) {
        Ok(extras) => extras.target_names,
        Err(err) => {
            tracing::warn!("ignoring unreadable mesh extras: {}", err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_names_parsing() {
        let extras: MeshExtras =
            serde_json::from_str(r#"{"targetNames": ["Blink", "Smile"], "other": 1}"#).unwrap();
        assert_eq!(extras.target_names, vec!["Blink", "Smile"]);
    }

    #[test]
    fn test_target_names_absent() {
        let extras: MeshExtras = serde_json::from_str("{}").unwrap();
        assert!(extras.target_names.is_empty());
    }
}
