//! sdkdoc — generate documentation from a Python SDK source tree.
//!
//! The project root is expected to hold the documented API classes
//! directly, plus `models/` and `exceptions/` subdirectories (each with an
//! optional `__init__.py` description file). Two modes:
//!
//! - **site mode**: `sdkdoc sdk/ -o docs/` writes the MDX page tree
//! - **dump mode**: `sdkdoc sdk/ -f json` prints the extracted IR to stdout

mod docstring;
mod error;
mod extract;
mod model;
mod pairing;
mod project;
mod render;
mod syntax;
mod text;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sdkdoc",
    about = "Generate documentation from docstring-annotated Python SDK sources"
)]
struct Cli {
    /// Project root directory containing the SDK sources
    root: PathBuf,

    /// Output directory. With `-f json` it may be omitted to print the
    /// extracted model to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project = project::parse_project(&cli.root).with_context(|| {
        format!(
            "failed to extract documentation from {}",
            cli.root.display()
        )
    })?;

    let Some(output_dir) = cli.output.as_deref() else {
        if cli.format == "json" {
            println!("{}", serde_json::to_string_pretty(&project)?);
            return Ok(());
        }
        anyhow::bail!("--output is required for format `{}`", cli.format);
    };

    let renderer = render::create_renderer(&cli.format)?;
    let files = renderer.render(&project)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;
    for file in files {
        let out_path = output_dir.join(&file.path);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&out_path, &file.contents)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}
