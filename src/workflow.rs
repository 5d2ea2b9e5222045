//! Entry points: turn an anchor line into generated text, and place that
//! text into the companion file.
//!
//! `generate_*` and `plan_*` are pure over their inputs. `write_*` run
//! read → locate → write as one unit against the injected collaborators;
//! callers must not let the target change in between.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codegen::{self, MockClass, TestStub};
use crate::insertion::{compute_insertion_offset, splice, InsertionMarker};
use crate::naming::{is_interface_anchor, suite_name_from_test_file, SourceContext};
use crate::scanner::{find_anchor, merge_signature, scan_declarations, split_lines};
use crate::signature::parse_declaration;
use crate::store::{FileStore, PreferenceStore};
use crate::ScaffoldError;

/// Text to write and where. `offset` is an overwrite position, not an insert.
#[derive(Serialize, Debug, Clone)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub offset: usize,
    pub text: String,
    /// True when the target was missing or empty and got a full file.
    pub created: bool,
}

// ─── Generation ──────────────────────────────────────────────────────

/// Mock class for the class or interface declared on `anchor` in `header_text`.
pub fn generate_mock(
    ctx: &SourceContext,
    header_text: &str,
    anchor: &str,
) -> Result<MockClass, ScaffoldError> {
    if anchor.trim().is_empty() {
        return Err(ScaffoldError::NoSelection);
    }
    let is_interface = is_interface_anchor(anchor);
    let methods = scan_declarations(header_text, anchor, is_interface)?;
    debug!(
        class = %ctx.class_name,
        is_interface,
        methods = methods.len(),
        "Scanned class body"
    );
    Ok(codegen::mock_class(
        &ctx.mock_class_name(is_interface),
        &ctx.class_name,
        methods,
    ))
}

/// Typed test stub for the method declared on `anchor` in `cpp_text`.
///
/// The suite name comes from `existing_test` when it already declares a
/// `TYPED_TEST_SUITE`, otherwise from the source file name.
pub fn generate_test_stub(
    ctx: &SourceContext,
    cpp_text: &str,
    anchor: &str,
    existing_test: Option<&str>,
) -> Result<TestStub, ScaffoldError> {
    let lines = split_lines(cpp_text);
    let idx = find_anchor(&lines, anchor)?;
    let line = lines[idx];
    let signature = if line.contains('(') && !line.contains(')') {
        merge_signature(&lines, idx)?.0
    } else {
        line.to_string()
    };

    let decl = parse_declaration(&signature)?;
    let suite = existing_test
        .and_then(suite_name_from_test_file)
        .unwrap_or_else(|| ctx.test_class_name.clone());
    Ok(codegen::test_stub(&suite, &decl))
}

/// Reject paths whose extension is not `expected` (e.g. `.h`).
pub fn check_file_kind(path: &Path, expected: &'static str) -> Result<(), ScaffoldError> {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| format!(".{}", e) == expected);
    if matches {
        Ok(())
    } else {
        Err(ScaffoldError::WrongFileKind {
            path: path.display().to_string(),
            expected,
        })
    }
}

// ─── Planning ────────────────────────────────────────────────────────

/// Decide what to write into `target` for a mock, given its current text.
pub fn plan_mock(
    header_path: &Path,
    header_text: &str,
    anchor: &str,
    target: &Path,
    existing: Option<&str>,
) -> Result<WriteOutcome, ScaffoldError> {
    check_file_kind(header_path, ".h")?;
    let ctx = SourceContext::from_path(&header_path.to_string_lossy());
    let mock = generate_mock(&ctx, header_text, anchor)?;

    match existing.filter(|t| !t.is_empty()) {
        None => Ok(WriteOutcome {
            path: target.to_path_buf(),
            offset: 0,
            text: format!("{}{}", codegen::headers(&ctx.header_file_name), mock.text),
            created: true,
        }),
        Some(text) => {
            let point = compute_insertion_offset(text, InsertionMarker::Mock)?;
            debug!(offset = point.offset, mode = ?point.mode, "Located mock insertion point");
            Ok(WriteOutcome {
                path: target.to_path_buf(),
                offset: point.offset,
                text: splice(text, &point, &mock.text),
                created: false,
            })
        }
    }
}

/// Decide what to write into `target` for a test stub, given its current text.
pub fn plan_test(
    source_path: &Path,
    cpp_text: &str,
    anchor: &str,
    target: &Path,
    existing: Option<&str>,
) -> Result<WriteOutcome, ScaffoldError> {
    check_file_kind(source_path, ".cpp")?;
    let ctx = SourceContext::from_path(&source_path.to_string_lossy());

    match existing.filter(|t| !t.is_empty()) {
        None => {
            let stub = generate_test_stub(&ctx, cpp_text, anchor, None)?;
            Ok(WriteOutcome {
                path: target.to_path_buf(),
                offset: 0,
                text: codegen::test_file_skeleton(&ctx.header_file_name, &stub.suite_name, &stub.text),
                created: true,
            })
        }
        Some(text) => {
            let stub = generate_test_stub(&ctx, cpp_text, anchor, Some(text))?;
            let point = compute_insertion_offset(text, InsertionMarker::Test)?;
            debug!(offset = point.offset, closers = point.closing_braces, "Located test insertion point");
            Ok(WriteOutcome {
                path: target.to_path_buf(),
                offset: point.offset,
                text: splice(text, &point, &format!("\n{}\n", stub.text)),
                created: false,
            })
        }
    }
}

/// Output directory for tests of `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    pub dir: PathBuf,
    /// True when the directory was chosen by the caller and is not stored
    /// yet; it is remembered once a write succeeds.
    pub remember: bool,
}

/// The stored preference for `source`, else the directory chosen by the
/// caller. Nothing is persisted here.
pub fn resolve_output_dir(
    prefs: &dyn PreferenceStore,
    source: &Path,
    chosen: Option<&Path>,
) -> Result<OutputDir, ScaffoldError> {
    if let Some(dir) = prefs.output_dir(source) {
        if let Some(chosen) = chosen.filter(|c| *c != dir.as_path()) {
            warn!(
                stored = %dir.display(),
                ignored = %chosen.display(),
                "Output directory already set for this file; use 'prefs set' to change it"
            );
        }
        return Ok(OutputDir { dir, remember: false });
    }
    match chosen {
        Some(dir) => Ok(OutputDir {
            dir: dir.to_path_buf(),
            remember: true,
        }),
        None => Err(ScaffoldError::OutputPathUnresolved {
            file: source.display().to_string(),
        }),
    }
}

// ─── Writing ─────────────────────────────────────────────────────────

/// Generate a mock from `header_path` and write it into `target`.
pub fn write_mock(
    files: &dyn FileStore,
    header_path: &Path,
    header_text: &str,
    anchor: &str,
    target: &Path,
) -> Result<WriteOutcome, ScaffoldError> {
    let existing = files.read_file(target)?;
    let outcome = plan_mock(header_path, header_text, anchor, target, existing.as_deref())?;
    files.write_at(&outcome.path, outcome.offset, &outcome.text)?;
    info!(path = %outcome.path.display(), created = outcome.created, "Mock written");
    Ok(outcome)
}

/// Generate a test stub from `source_path` and write it into
/// `<output dir>/<Name>Test.cpp`. A newly chosen output directory is
/// remembered only after the write succeeded.
pub fn write_test(
    files: &dyn FileStore,
    prefs: &mut dyn PreferenceStore,
    source_path: &Path,
    cpp_text: &str,
    anchor: &str,
    chosen_dir: Option<&Path>,
) -> Result<WriteOutcome, ScaffoldError> {
    check_file_kind(source_path, ".cpp")?;
    let out = resolve_output_dir(prefs, source_path, chosen_dir)?;
    let ctx = SourceContext::from_path(&source_path.to_string_lossy());
    let target = out.dir.join(&ctx.test_file_name);
    let existing = files.read_file(&target)?;
    let outcome = plan_test(source_path, cpp_text, anchor, &target, existing.as_deref())?;
    files.write_at(&outcome.path, outcome.offset, &outcome.text)?;
    info!(path = %outcome.path.display(), created = outcome.created, "Test written");

    if out.remember {
        prefs.set_output_dir(source_path, &out.dir)?;
        info!(source = %source_path.display(), dir = %out.dir.display(), "Remembered output directory");
    }
    Ok(outcome)
}

/// Path of the test file for `source_path`, without remembering anything.
pub fn test_target(
    prefs: &dyn PreferenceStore,
    source_path: &Path,
    chosen_dir: Option<&Path>,
) -> Result<PathBuf, ScaffoldError> {
    let out = resolve_output_dir(prefs, source_path, chosen_dir)?;
    let ctx = SourceContext::from_path(&source_path.to_string_lossy());
    Ok(out.dir.join(ctx.test_file_name))
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
