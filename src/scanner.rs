//! Declaration scanner: finds the member lines of a class or interface body.
//!
//! Starting from the anchor line (usually `class Foo` or `__interface IFoo`),
//! walks forward until the body terminator `};`, collecting every line that
//! looks like an overridable method. Signatures wrapped over several lines are
//! merged back into one line before they reach the parser.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::signature::{parse_declaration, Declaration};
use crate::ScaffoldError;

static VIRTUAL_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvirtual\b").expect("static regex"));

/// One accepted member line, with `virtual` removed and wrapped lines merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMember {
    /// 1-based line where the declaration starts.
    pub line_number: usize,
    pub text: String,
}

/// Split text into lines, dropping a trailing `\r` from each.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Index of the first line whose trimmed text equals the trimmed anchor.
pub fn find_anchor(lines: &[&str], anchor: &str) -> Result<usize, ScaffoldError> {
    let wanted = anchor.trim();
    if wanted.is_empty() {
        return Err(ScaffoldError::NoSelection);
    }
    lines
        .iter()
        .position(|line| line.trim() == wanted)
        .ok_or_else(|| ScaffoldError::AnchorNotFound {
            anchor: wanted.to_string(),
        })
}

/// Concatenate `lines[start..]` until a line containing `)` is reached.
///
/// Line breaks are dropped; indentation of continuation lines is kept.
/// Returns the merged text and the index of the last line consumed.
pub fn merge_signature(lines: &[&str], start: usize) -> Result<(String, usize), ScaffoldError> {
    let mut merged = String::new();
    for (idx, line) in lines.iter().enumerate().skip(start) {
        merged.push_str(line);
        if line.contains(')') {
            return Ok((merged, idx));
        }
    }
    Err(ScaffoldError::MalformedSignature {
        line: merged.trim().to_string(),
    })
}

/// Collect the overridable member lines following `anchor`.
///
/// With `interface_context` every member counts; otherwise only lines that
/// carry the `virtual` keyword do. Everything else is skipped silently, so a
/// body without accepted members gives an empty result rather than an error.
pub fn scan_members(
    file_text: &str,
    anchor: &str,
    interface_context: bool,
) -> Result<Vec<ScannedMember>, ScaffoldError> {
    let lines = split_lines(file_text);
    let anchor_idx = find_anchor(&lines, anchor)?;
    let mut i = body_start(&lines, anchor_idx);
    let mut members = Vec::new();

    while i < lines.len() {
        let line = lines[i];
        if line.contains("};") {
            break;
        }
        if !interface_context && !VIRTUAL_KEYWORD.is_match(line) {
            i += 1;
            continue;
        }

        let (raw, end) = if line.contains('(') && !line.contains(')') {
            merge_signature(&lines, i)?
        } else {
            (line.to_string(), i)
        };

        let text = VIRTUAL_KEYWORD.replace_all(&raw, "");
        let text = text.trim();
        if text.contains('(') && !is_destructor(text) {
            members.push(ScannedMember {
                line_number: i + 1,
                text: text.to_string(),
            });
        }
        i = end + 1;
    }

    Ok(members)
}

/// Scan and parse in one step. Every returned declaration is overridable.
pub fn scan_declarations(
    file_text: &str,
    anchor: &str,
    interface_context: bool,
) -> Result<Vec<Declaration>, ScaffoldError> {
    scan_members(file_text, anchor, interface_context)?
        .into_iter()
        .map(|member| {
            trace!(line = member.line_number, text = %member.text, "Accepted member");
            let mut decl = parse_declaration(&member.text)?;
            decl.is_overridable = true;
            Ok(decl)
        })
        .collect()
}

/// First line of the body: past the anchor and past a lone `{` on its own line.
fn body_start(lines: &[&str], anchor_idx: usize) -> usize {
    let next = anchor_idx + 1;
    match lines[next.min(lines.len())..]
        .iter()
        .position(|line| !line.trim().is_empty())
    {
        Some(offset) if lines[next + offset].trim() == "{" => next + offset + 1,
        _ => next,
    }
}

fn is_destructor(text: &str) -> bool {
    text.split('(')
        .next()
        .and_then(|head| head.split_whitespace().last())
        .is_some_and(|name| name.starts_with('~') || name.contains("::~"))
}
