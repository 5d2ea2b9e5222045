//! Insertion-point locator for appending to an existing generated file.
//!
//! Generated test files open a fixed number of namespaces at the top and close
//! them with a run of `}` lines at the bottom. New content goes just inside
//! those closers: the closers themselves are overwritten and re-emitted after
//! the new text, so the write is a plain overwrite from the offset to EOF.
//!
//! This relies on the file keeping the generated layout. A `}` in a trailing
//! comment, or extra braces after the namespace closers, will shift the
//! offset; that convention is assumed rather than checked.

use serde::Serialize;

use crate::scanner::split_lines;
use crate::ScaffoldError;

/// Markers that end the namespace header section of a file.
const CONTENT_MARKERS: &[&str] = &["class", "TYPED_TEST", "TEST_F", "TEST"];

/// What kind of text is being inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionMarker {
    /// A `TYPED_TEST` block.
    Test,
    /// A mock class; goes ahead of any `TYPED_TEST_SUITE` declaration.
    Mock,
}

impl std::str::FromStr for InsertionMarker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "mock" => Ok(Self::Mock),
            other => Err(format!("Unknown marker '{}' (expected test or mock)", other)),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionMode {
    /// Overwrite from the offset to EOF and re-emit `closing_braces` closers.
    InsideNamespaces,
    /// Insert ahead of the type alias preceding `TYPED_TEST_SUITE`; the
    /// original tail is kept after the new text.
    BeforeTypedTestSuite,
}

/// Byte offset into the current file text. Stale once the file changes.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    pub offset: usize,
    pub closing_braces: usize,
    pub mode: InsertionMode,
}

/// Locate where generated text of kind `marker` belongs in `text`.
pub fn compute_insertion_offset(
    text: &str,
    marker: InsertionMarker,
) -> Result<InsertionPoint, ScaffoldError> {
    if marker == InsertionMarker::Mock {
        if let Some(offset) = offset_before_typed_test_suite(text) {
            return Ok(InsertionPoint {
                offset,
                closing_braces: 0,
                mode: InsertionMode::BeforeTypedTestSuite,
            });
        }
    }

    let count = count_leading_namespaces(text);
    let offset = offset_inside_closing_braces(text, count)?;
    Ok(InsertionPoint {
        offset,
        closing_braces: count,
        mode: InsertionMode::InsideNamespaces,
    })
}

/// Count `namespace` lines before the first class or test marker.
pub fn count_leading_namespaces(text: &str) -> usize {
    let mut count = 0;
    for line in split_lines(text) {
        if line.trim().starts_with("namespace") {
            count += 1;
        }
        if CONTENT_MARKERS.iter().any(|m| line.contains(m)) {
            break;
        }
    }
    count
}

/// Byte index of the `count`-th `}` counted from the end of `text`.
///
/// `count == 0` means there is nothing to stay inside of: append at EOF.
pub fn offset_inside_closing_braces(text: &str, count: usize) -> Result<usize, ScaffoldError> {
    if count == 0 {
        return Ok(text.len());
    }
    text.char_indices()
        .rev()
        .filter(|&(_, c)| c == '}')
        .nth(count - 1)
        .map(|(idx, _)| idx)
        .ok_or_else(|| ScaffoldError::UnbalancedTarget {
            expected: count,
            found: text.matches('}').count(),
        })
}

/// Start of the line preceding the first `TYPED_TEST_SUITE` line, i.e. just
/// ahead of the type alias the suite declaration refers to.
pub fn offset_before_typed_test_suite(text: &str) -> Option<usize> {
    let mut line_starts = Vec::new();
    let mut pos = 0;
    for line in text.split_inclusive('\n') {
        if line.contains("TYPED_TEST_SUITE") {
            return Some(line_starts.last().copied().unwrap_or(0));
        }
        line_starts.push(pos);
        pos += line.len();
    }
    None
}

/// Text to write at `point.offset` so that `generated` lands at the insertion
/// point and the file stays balanced.
pub fn splice(text: &str, point: &InsertionPoint, generated: &str) -> String {
    let mut out = String::from(generated);
    match point.mode {
        InsertionMode::InsideNamespaces => {
            out.push_str(&"}\n".repeat(point.closing_braces));
        }
        InsertionMode::BeforeTypedTestSuite => {
            out.push_str(&text[point.offset..]);
        }
    }
    out
}

/// Whole resulting file: the untouched head followed by [`splice`].
pub fn apply(text: &str, point: &InsertionPoint, generated: &str) -> String {
    let mut out = String::from(&text[..point.offset]);
    out.push_str(&splice(text, point, generated));
    out
}

#[cfg(test)]
#[path = "insertion_tests.rs"]
mod tests;
