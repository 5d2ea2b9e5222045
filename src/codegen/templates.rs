//! Fixed C++ text blocks used by generated files.

/// gmock matchers and actions pulled into the test namespace.
const USING_DECLARATIONS: &[&str] = &[
    "_", "A", "An", "AnyNumber", "Const", "DoDefault", "Eq", "Lt",
    "MockFunction", "Ref", "Return", "ReturnRef", "TypedEq",
];

/// Placeholder assertions appended to every stub, meant to be edited by hand.
pub const ASSERTIONS: &str = "\tEXPECT_TRUE(2 == 2);\n\tEXPECT_FALSE(2 == 1);\n\tEXPECT_EQUALS(2, 2);\n";

/// Initializer literal for the handful of type spellings we recognize.
pub fn initializer_for(type_name: &str) -> Option<&'static str> {
    match type_name {
        "int" | "DWORD" => Some("0"),
        "string" => Some("\"\""),
        "wstring" => Some("L\"\""),
        _ => None,
    }
}

/// Include block: precompiled header, gtest/gmock, then the header under test.
pub fn headers(header_file_name: &str) -> String {
    let mut out = String::new();
    for include in [
        "pch.h",
        "iostream",
        "gtest/gtest.h",
        "gmock/gmock.h",
        "gmock/gmock-generated-function-mockers.h",
        header_file_name,
    ] {
        out.push_str(&format!("#include \"{}\"\n", include));
    }
    out.push('\n');
    out
}

/// Opens both test namespaces, then the `using` list and the copyable helper.
pub fn namespace_open() -> String {
    let mut out = String::from("namespace unittest {\nnamespace UnitTesters {\n");
    for name in USING_DECLARATIONS {
        out.push_str(&format!("using testing::{};\n", name));
    }
    out.push_str(
        "\n\
         template <typename T>\n\
         class TemplatedCopyable\n\
         {\n\
         public:\n\
         \x20   TemplatedCopyable() {}\n\
         \n\
         \x20   template <typename U>\n\
         \x20   TemplatedCopyable(const U& other) {}\n\
         };\n",
    );
    out
}

/// Closes the two namespaces opened by [`namespace_open`].
pub const NAMESPACE_CLOSE: &str = "}\n}\n";

/// Type list alias plus the typed suite bound to it.
pub fn typed_test_suite(suite: &str) -> String {
    format!(
        "using {suite}Types = ::testing::Types<bool>;\nTYPED_TEST_SUITE({suite},{suite}Types);\n"
    )
}

/// Fixture class with an empty constructor and destructor.
pub fn fixture_class(suite: &str) -> String {
    format!(
        "class {suite} : public testing::Test\n\
         {{\n\
         public:\n\
         \x20   {suite}() {{\n\
         \x20   }}\n\
         \x20   ~{suite}() {{\n\
         \x20   }}\n\
         }};\n"
    )
}
