//! Main class extraction: the API class in a root file and its methods.

use crate::docstring;
use crate::error::ErrorKind;
use crate::model::{MainClass, Method, Parameter, RaiseDoc};
use crate::syntax::{FunctionDef, Module, Stmt};
use crate::text;

/// Extract the documented API class from a root file's tree.
pub fn extract(module: &Module) -> Result<MainClass, ErrorKind> {
    let class = super::documented_class(module)?;

    let mut main_class = MainClass {
        name: class.name.clone(),
        ..Default::default()
    };
    if let Some(doc) = &class.docstring {
        main_class.short_description = Some(text::first_line(doc));
        main_class.long_description = Some(doc.clone());
    }

    for stmt in &class.body {
        if let Stmt::Function(func) = stmt {
            main_class.methods.push(extract_method(func)?);
        }
    }

    Ok(main_class)
}

/// Turn one method definition into its IR record.
///
/// A method with no docstring yields a record with only the name and
/// definition populated — that is a normal outcome, not malformed input.
fn extract_method(func: &FunctionDef) -> Result<Method, ErrorKind> {
    let mut method = Method {
        name: func.name.clone(),
        definition: func.signature.clone(),
        ..Default::default()
    };

    let Some(doc) = &func.docstring else {
        return Ok(method);
    };
    let parsed = docstring::parse(doc)?;

    method.short_description = parsed.short_description;
    method.long_description = parsed
        .long_description
        .or_else(|| method.short_description.clone());

    for param in parsed.params {
        method.parameters.push(Parameter {
            name: param.name,
            description: param.description,
            param_type: param.type_name,
            example: param.example,
        });
    }

    if let Some(returns) = parsed.returns {
        method.return_type = returns.type_name;
        if !returns.description.is_empty() {
            method.return_description = Some(returns.description);
        }
        method.example_response = returns.example_response;
    }

    for raise in parsed.raises {
        method.raises.push(RaiseDoc {
            exception: raise.exception,
            description: raise.description,
        });
    }

    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;

    #[test]
    fn class_with_zero_methods() {
        let module = parse_module("class Sample:\n    \"\"\"An API\n    \"\"\"\n").unwrap();
        let main_class = extract(&module).unwrap();
        assert_eq!(main_class.name, "Sample");
        assert_eq!(main_class.short_description.as_deref(), Some("An API"));
        assert!(main_class.methods.is_empty());
    }

    #[test]
    fn method_without_docstring_is_bare() {
        let module = parse_module(
            "class Sample:\n    \"\"\"An API\"\"\"\n\n    def close(self) -> None:\n        pass\n",
        )
        .unwrap();
        let main_class = extract(&module).unwrap();
        assert_eq!(main_class.methods.len(), 1);
        let method = &main_class.methods[0];
        assert_eq!(method.definition, "def close(self) -> None:");
        assert!(method.short_description.is_none());
        assert!(method.long_description.is_none());
        assert!(method.parameters.is_empty());
        assert!(method.return_type.is_none());
        assert!(method.raises.is_empty());
    }

    #[test]
    fn method_fields_mapped() {
        let source = r#"
class Sample:
    """An API
    """

    async def ping(self, x: int) -> bool:
        """Ping the API

        :raises TimeoutException: When the API is unreachable

        :param x: The payload
        :type x: int
        :example x: 5
        :return: Whether the API responded
        :rtype: bool
        """
        return True
"#;
        let module = parse_module(source).unwrap();
        let main_class = extract(&module).unwrap();
        let method = &main_class.methods[0];
        assert_eq!(method.definition, "async def ping(self, x: int) -> bool:");
        assert_eq!(method.short_description.as_deref(), Some("Ping the API"));
        // No extended body: long falls back to short.
        assert_eq!(method.long_description.as_deref(), Some("Ping the API"));
        assert_eq!(method.parameters.len(), 1);
        assert_eq!(method.parameters[0].name, "x");
        assert_eq!(method.parameters[0].param_type.as_deref(), Some("int"));
        assert_eq!(method.parameters[0].example.as_deref(), Some("5"));
        assert_eq!(method.return_type.as_deref(), Some("bool"));
        assert_eq!(
            method.return_description.as_deref(),
            Some("Whether the API responded")
        );
        assert!(method.example_response.is_none());
        assert_eq!(method.raises.len(), 1);
        assert_eq!(method.raises[0].exception, "TimeoutException");
    }

    #[test]
    fn long_description_kept_when_present() {
        let source = "class S:\n    \"\"\"Doc\"\"\"\n\n    def f(self) -> int:\n        \"\"\"Short one\n\n        A much longer body.\n\n        :rtype: int\n        \"\"\"\n        return 1\n";
        let module = parse_module(source).unwrap();
        let method = &extract(&module).unwrap().methods[0];
        assert_eq!(method.short_description.as_deref(), Some("Short one"));
        assert_eq!(method.long_description.as_deref(), Some("A much longer body."));
    }

    #[test]
    fn methods_in_source_order() {
        let source = "class S:\n    \"\"\"Doc\"\"\"\n\n    def b(self) -> int:\n        \"\"\"B\"\"\"\n        return 1\n\n    def a(self) -> int:\n        \"\"\"A\"\"\"\n        return 2\n";
        let module = parse_module(source).unwrap();
        let names: Vec<_> = extract(&module)
            .unwrap()
            .methods
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
