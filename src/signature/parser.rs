//! Heuristic single-line signature parser.
//!
//! Works on one line that already holds a whole declaration (multi-line
//! signatures are merged by the scanner first). No grammar: the first `(`
//! splits the head from the parameters, and the first `)` after it closes
//! them. Nested parentheses inside parameter types are not supported.

use crate::ScaffoldError;

use super::types::{Declaration, Parameter};

/// Parse `line` into a [`Declaration`].
///
/// `is_overridable` is not derived from the text (the scanner strips
/// `virtual` before parsing); callers set it on the result.
pub fn parse_declaration(line: &str) -> Result<Declaration, ScaffoldError> {
    let malformed = || ScaffoldError::MalformedSignature {
        line: line.trim().to_string(),
    };

    let open = line.find('(').ok_or_else(malformed)?;
    let close = line[open..].find(')').map(|i| open + i).ok_or_else(malformed)?;

    let head = line[..open].trim();
    let parameter_text = &line[open..=close];

    let mut tokens: Vec<&str> = head.split_whitespace().collect();
    let raw_name = tokens.pop().ok_or_else(malformed)?;
    let method_name = strip_scope(raw_name).to_string();
    if method_name.is_empty() {
        return Err(malformed());
    }

    Ok(Declaration {
        return_type: tokens.join(" "),
        method_name,
        parameters: parse_parameters(&parameter_text[1..parameter_text.len() - 1]),
        parameter_text: parameter_text.to_string(),
        is_overridable: false,
    })
}

/// Drop everything up to and including the last `::`.
pub fn strip_scope(name: &str) -> &str {
    match name.rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

/// Split a raw parameter list (without parentheses) on commas.
///
/// Each piece is split on its last whitespace run into `(type, name)`.
/// An empty list and the C-style `(void)` yield no parameters.
pub fn parse_parameters(body: &str) -> Vec<Parameter> {
    let body = body.trim();
    if body.is_empty() || body == "void" {
        return Vec::new();
    }

    body.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.rfind(char::is_whitespace) {
            Some(pos) => Parameter {
                type_name: piece[..pos].trim_end().to_string(),
                name: piece[pos..].trim_start().to_string(),
            },
            None => Parameter {
                type_name: piece.to_string(),
                name: String::new(),
            },
        })
        .collect()
}
