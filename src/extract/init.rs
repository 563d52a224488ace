//! Module description extraction from a subdirectory's `__init__.py`.

use crate::model::ModuleDoc;
use crate::syntax::Module;
use crate::text;

/// Extract a module-level description. A file without a docstring yields
/// a record with both fields unset — never an error.
pub fn extract(module: &Module) -> ModuleDoc {
    let mut doc = ModuleDoc::default();
    if let Some(docstring) = &module.docstring {
        doc.short_description = Some(text::first_paragraph(docstring));
        doc.long_description = Some(docstring.clone());
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;

    #[test]
    fn docstring_split_into_short_and_long() {
        let module = parse_module(
            "\"\"\"Models used by the API\nacross all endpoints\n\nEach model is a frozen dataclass.\n\"\"\"\n",
        )
        .unwrap();
        let doc = extract(&module);
        assert_eq!(
            doc.short_description.as_deref(),
            Some("Models used by the API\nacross all endpoints")
        );
        assert!(doc
            .long_description
            .as_deref()
            .unwrap()
            .contains("frozen dataclass"));
    }

    #[test]
    fn no_docstring_yields_unset_fields() {
        let module = parse_module("from .amount_in import AmountIn\n").unwrap();
        let doc = extract(&module);
        assert!(doc.short_description.is_none());
        assert!(doc.long_description.is_none());
    }
}
