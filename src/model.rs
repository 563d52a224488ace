//! Intermediate representation for extracted documentation — format-agnostic.
//!
//! Every entity is built exactly once during extraction of a single source
//! file and handed to the assembler, which only appends to the ordered
//! sequences and never mutates entity contents.

use serde::Serialize;
use std::collections::BTreeMap;

/// The whole documented project: one value per extraction run.
#[derive(Debug, Default, Serialize)]
pub struct Project {
    /// API classes found in root files, in enumeration order.
    pub main_classes: Vec<MainClass>,
    /// Data classes from the `models` subdirectory, in enumeration order.
    pub models: Vec<Model>,
    /// Exception classes from the `exceptions` subdirectory.
    pub exceptions: Vec<ExceptionModel>,
    /// Module-level descriptions, keyed `"models"` / `"exceptions"`.
    pub module_docs: BTreeMap<String, ModuleDoc>,
}

/// An API class whose docstring-bearing methods are the documented surface.
#[derive(Debug, Default, Serialize)]
pub struct MainClass {
    pub name: String,
    /// First line of the class docstring.
    pub short_description: Option<String>,
    /// Full class docstring.
    pub long_description: Option<String>,
    /// One per method defined directly in the class body, in source order.
    pub methods: Vec<Method>,
}

/// A single documented method.
///
/// A method without a docstring still produces a record — only `name` and
/// `definition` are populated.
#[derive(Debug, Default, Serialize)]
pub struct Method {
    pub name: String,
    /// Reconstructed signature, e.g.
    /// `async def ping(self, x: int) -> bool:`
    pub definition: String,
    pub short_description: Option<String>,
    /// Extended docstring body; falls back to the short description.
    pub long_description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub return_description: Option<String>,
    /// Raw example-response block, fence markers included.
    pub example_response: Option<String>,
    pub raises: Vec<RaiseDoc>,
}

/// One `:param:` tag with its correlated `:type:` and `:example:` tags.
#[derive(Debug, Serialize)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub param_type: Option<String>,
    /// Kept as text even for numeric examples — rendering does not care.
    pub example: Option<String>,
}

/// One `:raises:` tag.
#[derive(Debug, Serialize)]
pub struct RaiseDoc {
    pub exception: String,
    pub description: String,
}

/// A plain data class from the `models` subdirectory.
#[derive(Debug, Default, Serialize)]
pub struct Model {
    pub name: String,
    /// Verbatim definition line, e.g. `class AmountIn:`
    pub definition: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub attributes: Vec<Attribute>,
}

/// An exception class from the `exceptions` subdirectory.
#[derive(Debug, Default, Serialize)]
pub struct ExceptionModel {
    pub name: String,
    pub definition: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    /// True when the definition line carries the abstract base marker.
    /// The abstract class is the catch-all parent of the concrete ones.
    pub is_abstract: bool,
    /// Conventionally `status_code` and `detail`.
    pub attributes: Vec<Attribute>,
}

/// A documented class attribute: declaration plus its doc literal.
#[derive(Debug, Serialize)]
pub struct Attribute {
    pub name: String,
    pub description: String,
    /// Textual rendering of the declared type expression, never a value.
    pub attribute_type: String,
    pub example: Option<String>,
}

/// Description extracted from a module's `__init__.py`.
///
/// Both fields stay unset when the file has no docstring.
#[derive(Debug, Default, Serialize)]
pub struct ModuleDoc {
    pub short_description: Option<String>,
    pub long_description: Option<String>,
}
