//! Docstring field parser.
//!
//! Parses the Sphinx-style mini-grammar used by the documented sources:
//!
//! ```text
//! Short description
//!
//! Extended description.
//!
//! :raises SomeException: when things go wrong
//! :param page: the page to fetch, defaults to 1
//! :type page: int, Optional
//! :example page: 1
//! :return: what you get back
//! :rtype: Exchanges
//! ```
//!
//! The `:example:` tag is a satellite of its `:param:` tag — correlation is
//! by shared name, independent of the order the two appear in.

use crate::error::ErrorKind;
use crate::text;
use regex::Regex;
use std::sync::LazyLock;

/// A field line: `:label:` or `:label arg:`, followed by inline text.
static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([a-zA-Z][\w-]*)(?:\s+([^:]+?))?:\s?(.*)$").unwrap());

/// Trailing optionality marker on a `:type:` field.
static RE_OPTIONAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*[Oo]ptional\s*$").unwrap());

/// Literal marker splitting a return description from its example block.
const EXAMPLE_RESPONSE_MARKER: &str = "Example response:";

/// Structured form of one docstring.
#[derive(Debug, Default)]
pub struct Docstring {
    /// Text before the first blank line, newlines removed.
    pub short_description: Option<String>,
    /// Extended body: text between the first blank line and the first field.
    pub long_description: Option<String>,
    /// `:param:` fields in authored order, examples and types correlated.
    pub params: Vec<ParamTag>,
    pub returns: Option<ReturnTag>,
    /// `:raises:` fields in authored order.
    pub raises: Vec<RaiseTag>,
    /// Labeled fields outside the fixed vocabulary.
    pub meta: Vec<MetaTag>,
}

#[derive(Debug)]
pub struct ParamTag {
    pub name: String,
    pub description: String,
    pub type_name: Option<String>,
    pub example: Option<String>,
}

#[derive(Debug, Default)]
pub struct ReturnTag {
    pub type_name: Option<String>,
    /// Text before the `Example response:` marker, verbatim.
    pub description: String,
    /// Text after the marker, verbatim, fence markers included.
    pub example_response: Option<String>,
}

#[derive(Debug)]
pub struct RaiseTag {
    pub exception: String,
    pub description: String,
}

#[derive(Debug)]
#[allow(dead_code)]
pub struct MetaTag {
    pub label: String,
    pub arg: Option<String>,
    pub description: String,
}

/// One raw field before dispatch: (label, arg, accumulated text).
struct RawField {
    label: String,
    arg: Option<String>,
    text: String,
}

/// Parse one cleaned docstring.
///
/// Fails only on tag-correlation violations (an `:example:` naming a
/// parameter that has no `:param:` field).
pub fn parse(docstring: &str) -> Result<Docstring, ErrorKind> {
    let lines: Vec<&str> = docstring.lines().collect();
    let first_field = lines
        .iter()
        .position(|l| RE_FIELD.is_match(l))
        .unwrap_or(lines.len());

    let mut parsed = Docstring::default();

    let description = lines[..first_field].join("\n");
    let description = description.trim_end();
    if !description.is_empty() {
        parsed.short_description = Some(text::short_description(description));
        let long = match description.split_once("\n\n") {
            Some((_, rest)) => rest.trim(),
            None => "",
        };
        if !long.is_empty() {
            parsed.long_description = Some(long.to_string());
        }
    }

    let fields = collect_fields(&lines[first_field..]);
    assemble(fields, &mut parsed)?;
    Ok(parsed)
}

/// Group field lines with their continuation lines, in authored order.
fn collect_fields(lines: &[&str]) -> Vec<RawField> {
    let mut fields: Vec<RawField> = Vec::new();

    for line in lines {
        if let Some(caps) = RE_FIELD.captures(line) {
            fields.push(RawField {
                label: caps[1].to_string(),
                arg: caps.get(2).map(|m| m.as_str().trim().to_string()),
                text: caps[3].to_string(),
            });
        } else if let Some(current) = fields.last_mut() {
            current.text.push('\n');
            current.text.push_str(line);
        }
        // Text before the first field was consumed as description.
    }

    fields
}

/// Dispatch raw fields into the structured record and correlate the
/// satellite tags.
fn assemble(fields: Vec<RawField>, parsed: &mut Docstring) -> Result<(), ErrorKind> {
    let mut types: Vec<(String, String)> = Vec::new();
    let mut examples: Vec<(String, String)> = Vec::new();
    let mut return_description: Option<String> = None;
    let mut return_type: Option<String> = None;

    for field in fields {
        match (field.label.as_str(), field.arg) {
            ("param" | "parameter", Some(name)) => {
                parsed.params.push(ParamTag {
                    name,
                    description: field.text.trim().to_string(),
                    type_name: None,
                    example: None,
                });
            }
            ("type", Some(name)) => {
                let stripped = RE_OPTIONAL_SUFFIX.replace(field.text.trim(), "");
                types.push((name, stripped.trim().to_string()));
            }
            ("example", Some(name)) => {
                examples.push((name, field.text.trim().to_string()));
            }
            ("return" | "returns", None) => {
                return_description = Some(field.text);
            }
            ("rtype", None) => {
                return_type = Some(field.text.trim().to_string());
            }
            ("raises" | "raise", Some(name)) => {
                parsed.raises.push(RaiseTag {
                    exception: name,
                    description: field.text.trim().to_string(),
                });
            }
            (_, arg) => {
                parsed.meta.push(MetaTag {
                    label: field.label,
                    arg,
                    description: field.text.trim().to_string(),
                });
            }
        }
    }

    for (name, type_name) in types {
        if let Some(param) = parsed.params.iter_mut().find(|p| p.name == name) {
            param.type_name = Some(type_name);
        }
    }

    for (name, example) in examples {
        match parsed.params.iter_mut().find(|p| p.name == name) {
            Some(param) => param.example = Some(example),
            None => {
                return Err(ErrorKind::MalformedDocstring(format!(
                    "example tag references unknown parameter `{}`",
                    name
                )))
            }
        }
    }

    if return_description.is_some() || return_type.is_some() {
        let full = return_description.unwrap_or_default();
        let (description, example_response) = match full.split_once(EXAMPLE_RESPONSE_MARKER) {
            Some((before, after)) => (before.to_string(), Some(after.to_string())),
            None => (full, None),
        };
        parsed.returns = Some(ReturnTag {
            type_name: return_type,
            description,
            example_response,
        });
    }

    Ok(())
}
