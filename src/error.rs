//! Unified error type for mock and test generation.

use thiserror::Error;

/// All errors that can occur while generating or placing scaffolding.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The anchor line is empty
    #[error("No selection: put the cursor on the class or method line you want to generate for")]
    NoSelection,

    /// Mocks need a header, tests need a source file
    #[error("Wrong file kind '{path}': expected a {expected} file")]
    WrongFileKind { path: String, expected: &'static str },

    /// The anchor text does not occur in the file (file changed underneath?)
    #[error("Anchor line not found in file: '{anchor}'")]
    AnchorNotFound { anchor: String },

    /// No `(` ... `)` pair where a signature was expected
    #[error("Malformed signature (no parenthesis pair): '{line}'")]
    MalformedSignature { line: String },

    /// No stored output directory and none chosen
    #[error("No output directory for '{file}'. Pass --out-dir or set one with 'gtest-scaffold prefs set'")]
    OutputPathUnresolved { file: String },

    /// Fewer closing braces at the tail than namespaces at the head
    #[error("Cannot place generated code: expected {expected} closing brace(s) at the end of the file, found {found}")]
    UnbalancedTarget { expected: usize, found: usize },

    /// The file to splice into is not valid UTF-8, so byte offsets would be wrong
    #[error("Cannot update '{path}': file is not valid UTF-8")]
    NonUtf8Target { path: String },

    /// I/O error (file read/write, directory access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference file could not be parsed or written
    #[error("Failed to load preferences from {path}: {message}")]
    Preferences { path: String, message: String },

    /// Mutually exclusive flags or other argument validation error
    #[error("{0}")]
    InvalidArgs(String),
}
