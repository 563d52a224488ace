//! Attribute pairing: declaration / doc-literal alternation.
//!
//! Model and exception class bodies document each attribute with a
//! standalone string literal immediately below the declaration:
//!
//! ```text
//! class AmountIn:
//!     """..."""
//!
//!     blockchain: str
//!     """The blockchain id
//!
//!     Example: ethereum
//!     """
//! ```
//!
//! Pairing is positional — two statements at a time, in strict
//! alternation. Any deviation would silently attach documentation to the
//! wrong attribute, so it is fatal instead.

use crate::error::ErrorKind;
use crate::model::Attribute;
use crate::syntax::Stmt;

/// Marker splitting an attribute doc literal into description and example.
/// Docstrings are cleaned by the syntax layer, so the marker sits at the
/// start of a paragraph.
const EXAMPLE_MARKER: &str = "\n\nExample:";

/// Whether a call site insists on an example for every attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamplePolicy {
    #[allow(dead_code)]
    Required,
    Optional,
}

/// Pair a class body into its documented attributes.
///
/// `body` is the class body after the class docstring (the syntax layer
/// already peels that off). The remaining statements must hold an even
/// count in strict {declaration, doc-literal} alternation.
pub fn pair_attributes(body: &[Stmt], policy: ExamplePolicy) -> Result<Vec<Attribute>, ErrorKind> {
    if body.len() % 2 != 0 {
        return Err(ErrorKind::MalformedClassBody(format!(
            "expected declaration/doc-literal pairs, got {} statements",
            body.len()
        )));
    }

    let mut attributes = Vec::with_capacity(body.len() / 2);

    for pair in body.chunks(2) {
        let assign = match &pair[0] {
            Stmt::Assign(assign) => assign,
            other => {
                return Err(ErrorKind::MalformedClassBody(format!(
                    "expected an attribute declaration, got {}",
                    stmt_kind(other)
                )))
            }
        };
        let doc = match &pair[1] {
            Stmt::DocLiteral(text) => text,
            other => {
                return Err(ErrorKind::MalformedClassBody(format!(
                    "attribute `{}` is not followed by its documentation literal (got {})",
                    assign.target,
                    stmt_kind(other)
                )))
            }
        };

        let (description, example) = split_example(doc);
        if example.is_none() && policy == ExamplePolicy::Required {
            return Err(ErrorKind::MissingExample(assign.target.clone()));
        }

        attributes.push(Attribute {
            name: assign.target.clone(),
            description,
            attribute_type: assign.annotation.to_string(),
            example,
        });
    }

    Ok(attributes)
}

/// Split a doc literal on the first example marker.
fn split_example(doc: &str) -> (String, Option<String>) {
    match doc.split_once(EXAMPLE_MARKER) {
        Some((description, example)) => (
            description.trim_end().to_string(),
            Some(example.trim().to_string()),
        ),
        None => (doc.trim_end().to_string(), None),
    }
}

fn stmt_kind(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Class(_) => "a class definition",
        Stmt::Function(_) => "a function definition",
        Stmt::Assign(_) => "an attribute declaration",
        Stmt::DocLiteral(_) => "a string literal",
        Stmt::Other => "an unrecognized statement",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse_module, Stmt};

    fn class_body(source: &str) -> Vec<Stmt> {
        let module = parse_module(source).unwrap();
        match module.body.into_iter().next() {
            Some(Stmt::Class(class)) => class.body,
            _ => panic!("expected a class"),
        }
    }

    #[test]
    fn pairs_in_declaration_order() {
        let body = class_body(
            "class AmountIn:\n    \"\"\"Doc\"\"\"\n\n    blockchain: str\n    \"\"\"The chain\n\n    Example: ethereum\n    \"\"\"\n\n    amount: int\n    \"\"\"The amount\n\n    Example: 100\n    \"\"\"\n",
        );
        let attrs = pair_attributes(&body, ExamplePolicy::Optional).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "blockchain");
        assert_eq!(attrs[0].attribute_type, "str");
        assert_eq!(attrs[0].description, "The chain");
        assert_eq!(attrs[0].example.as_deref(), Some("ethereum"));
        assert_eq!(attrs[1].name, "amount");
        assert_eq!(attrs[1].example.as_deref(), Some("100"));
    }

    #[test]
    fn empty_body_yields_no_attributes() {
        let body = class_body("class Empty:\n    \"\"\"Doc\"\"\"\n");
        let attrs = pair_attributes(&body, ExamplePolicy::Optional).unwrap();
        assert!(attrs.is_empty());
    }

    #[test]
    fn odd_count_is_fatal() {
        let body = class_body("class Bad:\n    \"\"\"Doc\"\"\"\n\n    lonely: str\n");
        let err = pair_attributes(&body, ExamplePolicy::Optional).unwrap_err();
        assert!(matches!(err, ErrorKind::MalformedClassBody(_)));
    }

    #[test]
    fn two_consecutive_declarations_are_fatal() {
        let body = class_body(
            "class Bad:\n    \"\"\"Doc\"\"\"\n\n    a: str\n    b: str\n    \"\"\"Doc for b\"\"\"\n    \"\"\"Stray\"\"\"\n",
        );
        let err = pair_attributes(&body, ExamplePolicy::Optional).unwrap_err();
        assert!(matches!(err, ErrorKind::MalformedClassBody(_)));
    }

    #[test]
    fn missing_marker_optional_leaves_example_unset() {
        let body = class_body(
            "class M:\n    \"\"\"Doc\"\"\"\n\n    detail: str\n    \"\"\"The error detail\"\"\"\n",
        );
        let attrs = pair_attributes(&body, ExamplePolicy::Optional).unwrap();
        assert_eq!(attrs[0].description, "The error detail");
        assert!(attrs[0].example.is_none());
    }

    #[test]
    fn missing_marker_required_is_fatal() {
        let body = class_body(
            "class M:\n    \"\"\"Doc\"\"\"\n\n    detail: str\n    \"\"\"The error detail\"\"\"\n",
        );
        let err = pair_attributes(&body, ExamplePolicy::Required).unwrap_err();
        assert!(matches!(err, ErrorKind::MissingExample(_)));
    }

    #[test]
    fn subscripted_type_rendered_verbatim() {
        let body = class_body(
            "class M:\n    \"\"\"Doc\"\"\"\n\n    data: List[Exchange]\n    \"\"\"The exchanges\n\n    Example: []\n    \"\"\"\n",
        );
        let attrs = pair_attributes(&body, ExamplePolicy::Optional).unwrap();
        assert_eq!(attrs[0].attribute_type, "List[Exchange]");
    }
}
