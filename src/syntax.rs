//! Python source scanner — line/indentation state machine.
//!
//! Covers the subset that documented SDK sources actually use: a module
//! docstring, top-level classes, `def` / `async def` methods, annotated
//! attribute declarations and standalone string-literal statements.
//! Function bodies are skipped wholesale; nothing is type-checked or
//! resolved across files.

use crate::error::ErrorKind;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)\s*(\([^)]*\))?\s*:").unwrap());

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());

static RE_ANNOTATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*:\s*(.+)$").unwrap());

static RE_SINGLE_LINE_STR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^("([^"\\]*)"|'([^'\\]*)')\s*$"#).unwrap());

static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w.]*$").unwrap());

static RE_SUBSCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w.]*)\[(.+)\]$").unwrap());

static RE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^("[^"]*"|'[^']*')$"#).unwrap());

static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// -- Tree types ---------------------------------------------------------------

/// A parsed source file.
#[derive(Debug, Default)]
pub struct Module {
    /// Leading string-literal statement, cleaned.
    pub docstring: Option<String>,
    /// Remaining top-level statements, in source order.
    pub body: Vec<Stmt>,
}

/// One statement, tagged by kind. Matching at this boundary is exhaustive;
/// anything the extractors don't care about lands in `Other`.
#[derive(Debug)]
pub enum Stmt {
    Class(ClassDef),
    Function(FunctionDef),
    Assign(AssignDef),
    DocLiteral(String),
    Other,
}

#[derive(Debug)]
pub struct ClassDef {
    pub name: String,
    /// Verbatim definition line, trailing comment stripped, ending in `:`.
    pub definition: String,
    /// Cleaned class docstring, when the body starts with one.
    pub docstring: Option<String>,
    /// Body statements after the docstring, in source order.
    pub body: Vec<Stmt>,
}

#[derive(Debug)]
pub struct FunctionDef {
    pub name: String,
    /// Reconstructed signature ending in `:`; continuation lines joined
    /// with single spaces. Carries the `async` keyword verbatim.
    pub signature: String,
    /// Cleaned docstring, when the body starts with one.
    pub docstring: Option<String>,
}

/// An annotated attribute declaration, `name: Type` (default dropped).
#[derive(Debug)]
pub struct AssignDef {
    pub target: String,
    pub annotation: TypeExpr,
}

/// A declared type expression, re-serializable verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare (possibly dotted) identifier: `int`, `decimal.Decimal`.
    Name(String),
    /// Legacy quoted form, quotes kept: `"AmountIn"`.
    Str(String),
    /// Subscripted generic, slice kept verbatim: `List[AmountOut]`.
    Subscript { value: String, slice: String },
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Name(name) => f.write_str(name),
            TypeExpr::Str(lit) => f.write_str(lit),
            TypeExpr::Subscript { value, slice } => write!(f, "{}[{}]", value, slice),
        }
    }
}

/// Parse a declared type expression.
///
/// Recognized shapes: bare identifier, quoted string literal, subscripted
/// generic. Anything else is an `UnsupportedTypeExpression` error — a
/// misrendered type string in the output is worse than a stopped run.
pub fn parse_type_expr(text: &str) -> Result<TypeExpr, ErrorKind> {
    let text = text.trim();
    if RE_NAME.is_match(text) {
        return Ok(TypeExpr::Name(text.to_string()));
    }
    if RE_QUOTED.is_match(text) {
        return Ok(TypeExpr::Str(text.to_string()));
    }
    if let Some(caps) = RE_SUBSCRIPT.captures(text) {
        let slice = caps[2].trim();
        if brackets_balanced(slice) {
            return Ok(TypeExpr::Subscript {
                value: caps[1].to_string(),
                slice: slice.to_string(),
            });
        }
    }
    Err(ErrorKind::UnsupportedTypeExpression(text.to_string()))
}

fn brackets_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

// -- Scanner ------------------------------------------------------------------

struct Scanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

/// Parse one source file into a [`Module`] tree.
pub fn parse_module(source: &str) -> Result<Module, ErrorKind> {
    let mut scanner = Scanner {
        lines: source.lines().collect(),
        pos: 0,
    };
    let mut body = scanner.parse_block(0)?;

    let docstring = match body.first() {
        Some(Stmt::DocLiteral(_)) => match body.remove(0) {
            Stmt::DocLiteral(text) => Some(text),
            _ => unreachable!(),
        },
        _ => None,
    };

    Ok(Module { docstring, body })
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

impl<'a> Scanner<'a> {
    /// Parse statements at exactly `indent`, stopping at the first
    /// shallower non-blank line.
    fn parse_block(&mut self, indent: usize) -> Result<Vec<Stmt>, ErrorKind> {
        let mut stmts = Vec::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if is_blank(line) {
                self.pos += 1;
                continue;
            }
            let line_indent = indent_of(line);
            if line_indent < indent {
                break;
            }
            if line_indent > indent {
                // Stray continuation of something we don't model.
                self.pos += 1;
                continue;
            }

            let stripped = &line[line_indent..];

            if stripped.starts_with("\"\"\"") || stripped.starts_with("'''") {
                let text = self.read_triple_quoted(line_indent);
                stmts.push(Stmt::DocLiteral(text));
                continue;
            }

            if RE_SINGLE_LINE_STR.is_match(stripped) {
                let caps = RE_SINGLE_LINE_STR.captures(stripped).unwrap();
                let inner = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                stmts.push(Stmt::DocLiteral(inner.to_string()));
                self.pos += 1;
                continue;
            }

            if let Some(caps) = RE_CLASS.captures(stripped) {
                let name = caps[1].to_string();
                let definition = strip_trailing_comment(stripped).to_string();
                self.pos += 1;
                let mut class_body = self.parse_block_deeper(indent)?;
                let docstring = match class_body.first() {
                    Some(Stmt::DocLiteral(_)) => match class_body.remove(0) {
                        Stmt::DocLiteral(text) => Some(text),
                        _ => unreachable!(),
                    },
                    _ => None,
                };
                stmts.push(Stmt::Class(ClassDef {
                    name,
                    definition,
                    docstring,
                    body: class_body,
                }));
                continue;
            }

            if let Some(caps) = RE_DEF.captures(stripped) {
                let name = caps[2].to_string();
                let signature = self.read_signature();
                let docstring = self.read_function_docstring(line_indent);
                self.skip_deeper(line_indent);
                stmts.push(Stmt::Function(FunctionDef {
                    name,
                    signature,
                    docstring,
                }));
                continue;
            }

            if let Some(caps) = RE_ANNOTATED.captures(stripped) {
                let target = caps[1].to_string();
                let annotation_text = split_off_default(&caps[2]);
                let annotation = parse_type_expr(&annotation_text)?;
                stmts.push(Stmt::Assign(AssignDef { target, annotation }));
                self.pos += 1;
                continue;
            }

            stmts.push(Stmt::Other);
            self.pos += 1;
        }

        Ok(stmts)
    }

    /// Parse a nested block: its indent is whatever the next non-blank
    /// line uses, as long as it is deeper than `parent_indent`.
    fn parse_block_deeper(&mut self, parent_indent: usize) -> Result<Vec<Stmt>, ErrorKind> {
        while self.pos < self.lines.len() && is_blank(self.lines[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= self.lines.len() {
            return Ok(Vec::new());
        }
        let body_indent = indent_of(self.lines[self.pos]);
        if body_indent <= parent_indent {
            return Ok(Vec::new());
        }
        self.parse_block(body_indent)
    }

    /// Consume a `def` header, possibly spanning lines, through the colon
    /// that closes it at bracket depth zero. Returns the signature text.
    fn read_signature(&mut self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut depth = 0i32;
        let mut in_str: Option<char> = None;

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim_end();
            let content = line.trim_start();
            let mut end: Option<usize> = None;

            for (idx, c) in content.char_indices() {
                match in_str {
                    Some(quote) => {
                        if c == quote {
                            in_str = None;
                        }
                    }
                    None => match c {
                        '\'' | '"' => in_str = Some(c),
                        '(' | '[' | '{' => depth += 1,
                        ')' | ']' | '}' => depth -= 1,
                        '#' => break,
                        ':' if depth == 0 => {
                            end = Some(idx);
                            break;
                        }
                        _ => {}
                    },
                }
            }

            self.pos += 1;
            match end {
                Some(idx) => {
                    parts.push(content[..=idx].to_string());
                    break;
                }
                None => parts.push(strip_trailing_comment(content).to_string()),
            }
        }

        if parts.len() == 1 {
            parts.pop().unwrap()
        } else {
            RE_SPACE_RUN
                .replace_all(&parts.join(" "), " ")
                .trim()
                .to_string()
        }
    }

    /// Docstring of a function body: the first body statement, when it is
    /// a string literal. Leaves the scanner position untouched otherwise.
    fn read_function_docstring(&mut self, def_indent: usize) -> Option<String> {
        let mut probe = self.pos;
        while probe < self.lines.len() && is_blank(self.lines[probe]) {
            probe += 1;
        }
        if probe >= self.lines.len() {
            return None;
        }
        let line = self.lines[probe];
        let line_indent = indent_of(line);
        if line_indent <= def_indent {
            return None;
        }
        let stripped = &line[line_indent..];
        if stripped.starts_with("\"\"\"") || stripped.starts_with("'''") {
            self.pos = probe;
            return Some(self.read_triple_quoted(line_indent));
        }
        if let Some(caps) = RE_SINGLE_LINE_STR.captures(stripped) {
            self.pos = probe + 1;
            let inner = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or("");
            return Some(inner.to_string());
        }
        None
    }

    /// Skip everything deeper than `indent` (a function body).
    fn skip_deeper(&mut self, indent: usize) {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if !is_blank(line) && indent_of(line) <= indent {
                break;
            }
            self.pos += 1;
        }
    }

    /// Consume a triple-quoted string starting at the current line and
    /// return its cleaned text.
    fn read_triple_quoted(&mut self, indent: usize) -> String {
        let line = self.lines[self.pos];
        let stripped = &line[indent_of(line)..];
        let delim = &stripped[..3];
        let after = &stripped[3..];

        // Single-line form: """text"""
        if let Some(end) = after.find(delim) {
            self.pos += 1;
            return clean_docstring(&after[..end]);
        }

        let mut raw = String::from(after);
        self.pos += 1;
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            self.pos += 1;
            if let Some(end) = line.find(delim) {
                raw.push('\n');
                raw.push_str(&line[..end]);
                break;
            }
            raw.push('\n');
            raw.push_str(line);
        }
        clean_docstring(&raw)
    }
}

/// Drop an `= default` clause at bracket depth zero from an annotation.
fn split_off_default(text: &str) -> String {
    let mut depth = 0i32;
    let mut in_str: Option<char> = None;
    for (idx, c) in text.char_indices() {
        match in_str {
            Some(quote) => {
                if c == quote {
                    in_str = None;
                }
            }
            None => match c {
                '\'' | '"' => in_str = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '=' if depth == 0 => return text[..idx].trim().to_string(),
                _ => {}
            },
        }
    }
    text.trim().to_string()
}

fn strip_trailing_comment(line: &str) -> &str {
    let mut in_str: Option<char> = None;
    for (idx, c) in line.char_indices() {
        match in_str {
            Some(quote) => {
                if c == quote {
                    in_str = None;
                }
            }
            None => match c {
                '\'' | '"' => in_str = Some(c),
                '#' => return line[..idx].trim_end(),
                _ => {}
            },
        }
    }
    line.trim_end()
}

/// Clean a docstring the way Python's `ast.get_docstring` does: the first
/// line is kept (leading whitespace trimmed), the common indentation of
/// the remaining lines is stripped, and blank edges are removed.
fn clean_docstring(raw: &str) -> String {
    let mut lines: Vec<String> = raw.split('\n').map(|l| l.to_string()).collect();

    let min_indent = lines[1..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let first = lines[0].trim_start().to_string();
    let mut cleaned: Vec<String> = vec![first];
    for line in &lines[1..] {
        if line.len() >= min_indent {
            cleaned.push(line[min_indent..].trim_end().to_string());
        } else {
            cleaned.push(line.trim_end().to_string());
        }
    }
    lines = cleaned;

    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
