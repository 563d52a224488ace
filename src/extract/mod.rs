//! Entity extractors — one per project area.
//!
//! Each extractor is a pure function from a [`Module`](crate::syntax::Module)
//! tree to one IR entity; the docstring parser and the pairing resolver do
//! the shared work.

pub mod exception;
pub mod init;
pub mod main_class;
pub mod model;

use crate::error::ErrorKind;
use crate::syntax::{ClassDef, Module, Stmt};

/// The class a file documents.
///
/// Files conventionally hold exactly one top-level class. When several are
/// present the last one wins; a file with none is fatal.
pub fn documented_class(module: &Module) -> Result<&ClassDef, ErrorKind> {
    module
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Class(class) => Some(class),
            _ => None,
        })
        .last()
        .ok_or(ErrorKind::MissingClass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;

    #[test]
    fn last_class_wins() {
        let module = parse_module("class First:\n    pass\n\nclass Second:\n    pass\n").unwrap();
        assert_eq!(documented_class(&module).unwrap().name, "Second");
    }

    #[test]
    fn no_class_is_fatal() {
        let module = parse_module("X = 1\n").unwrap();
        assert!(matches!(
            documented_class(&module).unwrap_err(),
            ErrorKind::MissingClass
        ));
    }
}
