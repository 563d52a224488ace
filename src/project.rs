//! Project assembly: walk the conventional source layout and aggregate the
//! extracted entities into one [`Project`].
//!
//! Three phases, run once, in order: root files → `models/` →
//! `exceptions/`. Extraction of each file is independent, so every
//! phase's file list goes through the rayon pool; collecting into
//! `Result<Vec<_>>` keeps results in enumeration order and aborts the
//! phase on the first error.

use crate::error::{ErrorKind, ExtractError};
use crate::extract;
use crate::model::{ExceptionModel, MainClass, Model, Project};
use crate::syntax::{self, Module};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-module description file.
const MODULE_INIT_FILE: &str = "__init__.py";

/// The two conventional subdirectories every project must carry.
const MODELS_DIR: &str = "models";
const EXCEPTIONS_DIR: &str = "exceptions";

/// Parse a whole project root into its IR.
pub fn parse_project(root: &Path) -> Result<Project, ExtractError> {
    let mut project = Project::default();

    // The package-level __init__.py is not part of the documented surface.
    let root_files = entity_files(root)?;
    project.main_classes = root_files
        .par_iter()
        .map(|path| extract_one(path, extract::main_class::extract))
        .collect::<Result<Vec<MainClass>, _>>()?;

    let models_dir = conventional_dir(root, MODELS_DIR)?;
    for path in list_source_files(&models_dir)? {
        if is_module_init(&path) {
            let module = load_module(&path)?;
            project
                .module_docs
                .insert(MODELS_DIR.to_string(), extract::init::extract(&module));
        }
    }
    let model_files = entity_files(&models_dir)?;
    project.models = model_files
        .par_iter()
        .map(|path| extract_one(path, extract::model::extract))
        .collect::<Result<Vec<Model>, _>>()?;

    let exceptions_dir = conventional_dir(root, EXCEPTIONS_DIR)?;
    for path in list_source_files(&exceptions_dir)? {
        if is_module_init(&path) {
            let module = load_module(&path)?;
            project
                .module_docs
                .insert(EXCEPTIONS_DIR.to_string(), extract::init::extract(&module));
        }
    }
    let exception_files = entity_files(&exceptions_dir)?;
    project.exceptions = exception_files
        .par_iter()
        .map(|path| extract_one(path, extract::exception::extract))
        .collect::<Result<Vec<ExceptionModel>, _>>()?;

    Ok(project)
}

/// Run one entity extractor over one file, locating any error at the file
/// (and the documented class, when there is one).
fn extract_one<T>(
    path: &Path,
    extractor: fn(&Module) -> Result<T, ErrorKind>,
) -> Result<T, ExtractError> {
    let module = load_module(path)?;
    extractor(&module).map_err(|kind| match extract::documented_class(&module) {
        Ok(class) => ExtractError::in_entity(path, class.name.clone(), kind),
        Err(_) => ExtractError::new(path, kind),
    })
}

fn load_module(path: &Path) -> Result<Module, ExtractError> {
    let source =
        fs::read_to_string(path).map_err(|e| ExtractError::new(path, ErrorKind::Io(e)))?;
    syntax::parse_module(&source).map_err(|kind| ExtractError::new(path, kind))
}

/// Python files directly in `dir` (subdirectories excluded), sorted so
/// enumeration order is deterministic across platforms.
fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let entries =
        fs::read_dir(dir).map_err(|e| ExtractError::new(dir, ErrorKind::Io(e)))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("py")
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Entity-bearing files of a subdirectory: everything but the module init.
fn entity_files(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    Ok(list_source_files(dir)?
        .into_iter()
        .filter(|path| !is_module_init(path))
        .collect())
}

fn is_module_init(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(MODULE_INIT_FILE)
}

/// A conventional subdirectory; its absence is fatal before any file of
/// that phase is touched.
fn conventional_dir(root: &Path, name: &str) -> Result<PathBuf, ExtractError> {
    let dir = root.join(name);
    if !dir.is_dir() {
        return Err(ExtractError::new(
            root,
            ErrorKind::MissingSubdirectory(name.to_string()),
        ));
    }
    Ok(dir)
}
