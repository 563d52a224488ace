//! Exception extraction: classes from the `exceptions` subdirectory.

use crate::error::ErrorKind;
use crate::model::ExceptionModel;
use crate::pairing::{self, ExamplePolicy};
use crate::syntax::Module;
use crate::text;

/// Base name marking an abstract exception class.
const ABSTRACT_BASE: &str = "ABC";

/// Extract the exception class an `exceptions/` file documents.
pub fn extract(module: &Module) -> Result<ExceptionModel, ErrorKind> {
    let class = super::documented_class(module)?;

    let mut exception = ExceptionModel {
        name: class.name.clone(),
        definition: class.definition.clone(),
        is_abstract: has_abstract_base(&class.definition),
        ..Default::default()
    };
    if let Some(doc) = &class.docstring {
        exception.short_description = Some(text::first_line(doc));
        exception.long_description = Some(doc.clone());
    }
    exception.attributes = pairing::pair_attributes(&class.body, ExamplePolicy::Optional)?;

    Ok(exception)
}

/// Whether the definition line lists the abstract base marker among its
/// bases. Substring matching alone would trip on class names that merely
/// contain the letters.
fn has_abstract_base(definition: &str) -> bool {
    let Some(open) = definition.find('(') else {
        return false;
    };
    let Some(close) = definition.rfind(')') else {
        return false;
    };
    definition[open + 1..close]
        .split(',')
        .map(str::trim)
        .any(|base| base == ABSTRACT_BASE || base.ends_with(".ABC"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;

    #[test]
    fn abstract_parent_exception() {
        let source = r#"
class BlockchainAPIsException(ABC):
    """The parent exception every API error inherits from
    """

    status_code: int
    """The HTTP status code

    Example: 422
    """

    detail: str
    """A human-readable explanation

    Example: Invalid page
    """
"#;
        let module = parse_module(source).unwrap();
        let exception = extract(&module).unwrap();
        assert_eq!(exception.name, "BlockchainAPIsException");
        assert!(exception.is_abstract);
        assert_eq!(exception.attributes.len(), 2);
        assert_eq!(exception.attributes[0].name, "status_code");
        assert_eq!(exception.attributes[1].name, "detail");
    }

    #[test]
    fn concrete_exception_is_not_abstract() {
        let source = "class InvalidPageException(BlockchainAPIsException):\n    \"\"\"Bad page\n    \"\"\"\n";
        let module = parse_module(source).unwrap();
        let exception = extract(&module).unwrap();
        assert!(!exception.is_abstract);
        assert_eq!(
            exception.definition,
            "class InvalidPageException(BlockchainAPIsException):"
        );
    }

    #[test]
    fn dotted_abstract_base_detected() {
        let module = parse_module("class Base(abc.ABC):\n    \"\"\"Doc\"\"\"\n").unwrap();
        assert!(extract(&module).unwrap().is_abstract);
    }

    #[test]
    fn baseless_class_is_not_abstract() {
        let module = parse_module("class Plain:\n    \"\"\"Doc\"\"\"\n").unwrap();
        assert!(!extract(&module).unwrap().is_abstract);
    }
}
