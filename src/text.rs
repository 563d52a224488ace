//! Small text helpers shared by the extractors and renderers.

/// First line of a class docstring.
pub fn first_line(text: &str) -> String {
    text.split('\n').next().unwrap_or(text).to_string()
}

/// Short description of a module or method docstring: the text before the
/// first blank-line separator, internal newlines removed.
pub fn short_description(text: &str) -> String {
    text.split("\n\n").next().unwrap_or(text).replace('\n', "")
}

/// First paragraph of a docstring, newlines kept.
pub fn first_paragraph(text: &str) -> String {
    text.split("\n\n").next().unwrap_or(text).to_string()
}

/// Folder name for a class: CamelCase → kebab-case.
///
/// `BlockchainAPIs` → `blockchain-apis`, `AmountIn` → `amount-in`.
/// A hyphen goes before an uppercase letter that follows a lowercase one,
/// so runs of capitals stay together.
pub fn folder_name(class_name: &str) -> String {
    let mut out = String::with_capacity(class_name.len() + 4);
    let mut prev_lower = false;
    for c in class_name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('-');
            }
            for lower in c.to_lowercase() {
                out.push(lower);
            }
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}
