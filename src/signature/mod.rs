//! Signature model and parser for C++ method declarations.

mod parser;
mod types;

pub use parser::{parse_declaration, parse_parameters, strip_scope};
pub use types::{Declaration, Parameter};

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
