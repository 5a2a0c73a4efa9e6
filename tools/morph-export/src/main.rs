//! morph-export - blend shape conversion tool
//!
//! Converts per-vertex blend shapes from glTF/GLB models into compact,
//! render-ready morph target sets (.morphset).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use morph_common::{ConvertOptions, MORPH_SET_EXT};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use morph_export::{convert_morph_targets, load_source_mesh, read_morph_set, write_morph_set};

#[derive(Parser)]
#[command(name = "morph-export")]
#[command(about = "Blend shape to morph target conversion tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert blend shapes from a model into a .morphset file
    Export {
        /// Input glTF/GLB file
        input: PathBuf,

        /// Output .morphset file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Options file (TOML); flags below override its values
        #[arg(long)]
        options: Option<PathBuf>,

        /// Position scale (default: source meters to engine centimeters)
        #[arg(long)]
        scale: Option<f32>,

        /// Include normal deltas
        #[arg(long)]
        normals: bool,

        /// Keep original morph names (no sanitizing or dedup suffixes)
        #[arg(long)]
        original_names: bool,

        /// Apply the alternate model revision axis flip
        #[arg(long)]
        alternate_revision: bool,

        /// Position delta threshold
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// List blend shape names in a model
    List {
        /// Input glTF/GLB file
        input: PathBuf,
    },

    /// Print a summary of a .morphset file
    Inspect {
        /// Input .morphset file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            options,
            scale,
            normals,
            original_names,
            alternate_revision,
            threshold,
        } => {
            let mut opts = match options {
                Some(path) => load_options(&path)?,
                None => ConvertOptions::default(),
            };
            if let Some(scale) = scale {
                opts.scale = scale;
            }
            if normals {
                opts.include_normal_deltas = true;
            }
            if original_names {
                opts.use_original_names = true;
            }
            if alternate_revision {
                opts.alternate_revision_flip = true;
            }
            if let Some(threshold) = threshold {
                opts.position_delta_threshold = threshold;
            }

            let output = output.unwrap_or_else(|| input.with_extension(MORPH_SET_EXT));
            export(&input, &output, &opts)
        }
        Commands::List { input } => list(&input),
        Commands::Inspect { input } => inspect(&input),
    }
}

fn load_options(path: &Path) -> Result<ConvertOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file: {:?}", path))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse options file: {:?}", path))
}

fn export(input: &Path, output: &Path, options: &ConvertOptions) -> Result<()> {
    if options.skip_morph_targets {
        tracing::info!("morph target conversion is disabled, nothing to do");
        return Ok(());
    }

    let mesh = load_source_mesh(input)?;
    let set = convert_morph_targets(&mesh, options);

    let file =
        File::create(output).with_context(|| format!("Failed to create output: {:?}", output))?;
    let mut writer = BufWriter::new(file);
    write_morph_set(&mut writer, &set)?;

    tracing::info!("wrote {} morph targets to {:?}", set.targets.len(), output);
    Ok(())
}

fn list(input: &Path) -> Result<()> {
    let mesh = load_source_mesh(input)?;
    for (idx, submesh) in mesh.submeshes.iter().enumerate() {
        println!(
            "submesh {} ({} vertices, {} blend shapes):",
            idx,
            submesh.vertex_count,
            submesh.variants.len()
        );
        for variant in &submesh.variants {
            println!("  {}", variant.name);
        }
    }
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read morph set: {:?}", input))?;
    let set = read_morph_set(&data)?;

    println!("{} morph targets", set.targets.len());
    for target in &set.targets {
        println!(
            "  {}: {} deltas, sections {:?}",
            target.name,
            target.deltas.len(),
            target.section_indices
        );
    }
    Ok(())
}
