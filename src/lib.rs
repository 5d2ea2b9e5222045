//! # scaffold — GoogleMock / GoogleTest boilerplate from C++ declarations
//!
//! Given a C++ file and one anchor line in it, derives a method signature (or
//! an interface body) with a small set of text heuristics, generates a
//! `MOCK_METHOD` mock class or a `TYPED_TEST` stub, and splices the result
//! into a companion file at a spot that keeps its namespace braces balanced.
//!
//! ## Library usage
//!
//! The `gtest-scaffold` binary is a thin host around this library: editors
//! and tests call [`generate_mock`], [`generate_test_stub`] and
//! [`compute_insertion_offset`] directly, or the `write_*` orchestration
//! functions with their own [`FileStore`] / [`PreferenceStore`].

pub mod codegen;
mod error;
pub mod insertion;
pub mod naming;
pub mod scanner;
pub mod signature;
pub mod store;
pub mod workflow;

pub use codegen::{MockClass, TestStub};
pub use error::ScaffoldError;
pub use insertion::{compute_insertion_offset, InsertionMarker, InsertionMode, InsertionPoint};
pub use naming::SourceContext;
pub use signature::{Declaration, Parameter};
pub use store::{FileStore, FsFileStore, JsonPreferenceStore, PreferenceStore};
pub use workflow::{
    generate_mock, generate_test_stub, plan_mock, plan_test, write_mock, write_test, WriteOutcome,
};

// ─── Property-based tests (proptest) ─────────────────────────────────
