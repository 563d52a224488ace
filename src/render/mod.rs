//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::Project;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// One output file, relative to the destination directory.
#[derive(Debug)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Trait for rendering a Project into a set of output files.
pub trait Renderer {
    fn render(&self, project: &Project) -> Result<Vec<RenderedFile>>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
