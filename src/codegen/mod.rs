//! Code generator: GoogleMock method lines, mock classes, typed-test stubs
//! and first-time test file skeletons.

pub mod templates;

use serde::Serialize;

use crate::signature::{Declaration, Parameter};

pub use templates::{headers, initializer_for};

// ─── Mocks ───────────────────────────────────────────────────────────

/// A generated mock class ready to be written.
#[derive(Serialize, Debug, Clone)]
pub struct MockClass {
    pub class_name: String,
    pub base_name: String,
    pub methods: Vec<Declaration>,
    pub text: String,
}

/// `MOCK_METHOD(<ret>,<name>,<params>,(override));`
///
/// Only the first return-type token is used, and the parameter list is copied
/// verbatim from the declaration rather than rebuilt from the parsed pairs.
pub fn mock_method_line(decl: &Declaration) -> String {
    format!(
        "MOCK_METHOD({},{},{},(override));",
        decl.leading_return_token(),
        decl.method_name,
        decl.parameter_text
    )
}

/// Wrap mock lines in `class <Mock> : public <Base> { public: ... };`.
/// An empty member list still produces a closed, empty class.
pub fn mock_class(class_name: &str, base_name: &str, methods: Vec<Declaration>) -> MockClass {
    let mut text = format!("class {} : public {}\n{{\n", class_name, base_name);
    if !methods.is_empty() {
        text.push_str("public:\n");
        for decl in &methods {
            text.push_str(&mock_method_line(decl));
            text.push('\n');
        }
    }
    text.push_str("};\n\n");

    MockClass {
        class_name: class_name.to_string(),
        base_name: base_name.to_string(),
        methods,
        text,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

/// A generated `TYPED_TEST` block.
#[derive(Serialize, Debug, Clone)]
pub struct TestStub {
    pub suite_name: String,
    pub method_name: String,
    pub text: String,
}

/// One tab-indented line per named parameter.
///
/// Recognized types get an assignment with a default literal (`a=0;`);
/// anything else becomes a bare declaration (`Foo f;`). Unnamed parameters
/// have nothing to declare and are skipped.
pub fn parameter_lines(parameters: &[Parameter]) -> String {
    let mut out = String::new();
    for param in parameters.iter().filter(|p| p.is_named()) {
        match initializer_for(&param.type_name) {
            Some(init) => out.push_str(&format!("\t{}={};\n", param.name, init)),
            None => out.push_str(&format!("\t{} {};\n", param.type_name, param.name)),
        }
    }
    out
}

/// `TYPED_TEST(<Suite>,Should<Method>){ ... }` with parameter lines and the
/// placeholder assertions.
pub fn test_stub(suite_name: &str, decl: &Declaration) -> TestStub {
    let text = format!(
        "TYPED_TEST({},Should{}){{\n{}{}}}",
        suite_name,
        decl.method_name,
        parameter_lines(&decl.parameters),
        templates::ASSERTIONS
    );
    TestStub {
        suite_name: suite_name.to_string(),
        method_name: decl.method_name.clone(),
        text,
    }
}

/// Full test file for the first test of a source file.
pub fn test_file_skeleton(header_file_name: &str, suite_name: &str, first_test: &str) -> String {
    let mut out = headers(header_file_name);
    out.push_str(&templates::namespace_open());
    out.push('\n');
    out.push_str(&templates::typed_test_suite(suite_name));
    out.push('\n');
    out.push_str(&templates::fixture_class(suite_name));
    out.push('\n');
    out.push_str(first_test);
    out.push('\n');
    out.push_str(templates::NAMESPACE_CLOSE);
    out
}

#[cfg(test)]
#[path = "codegen_tests.rs"]
mod tests;
