//! Class, suite and file names derived from the path of the file under edit.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TYPED_TEST_SUITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TYPED_TEST_SUITE\(\s*(\w+)\s*,").expect("static regex"));

/// Names derived from one source path. Pure function of the path.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    /// File name as given, directory stripped (`Widget.cpp`).
    pub file_name: String,
    /// Companion header (`Widget.h`).
    pub header_file_name: String,
    /// `Widget`
    pub class_name: String,
    /// `WidgetTest`
    pub test_class_name: String,
    /// `WidgetTest.cpp`
    pub test_file_name: String,
}

impl SourceContext {
    /// Derive all names from `path`. Both `/` and `\` count as separators
    /// so Windows paths resolve the same on every host.
    pub fn from_path(path: &str) -> Self {
        let file_name = file_name_of(path).to_string();
        let header_file_name = swap_extension(&file_name, ".cpp", ".h");
        let class_name = header_file_name
            .strip_suffix(".h")
            .unwrap_or(&header_file_name)
            .to_string();
        let test_class_name = format!("{}Test", class_name);
        let test_file_name = format!("{}.cpp", test_class_name);

        Self {
            file_name,
            header_file_name,
            class_name,
            test_class_name,
            test_file_name,
        }
    }

    /// Name of the generated mock class.
    ///
    /// The leading `I` of an interface name (`IWidget` → `WidgetMock`) is
    /// dropped only when the anchor declared an `__interface` AND the name is
    /// `I` followed by an uppercase letter. Anything else keeps the class name
    /// as is (`Widget` → `WidgetMock`, `Item` → `ItemMock`).
    pub fn mock_class_name(&self, is_interface: bool) -> String {
        format!("{}Mock", self.mock_base_name(is_interface))
    }

    fn mock_base_name(&self, is_interface: bool) -> &str {
        let mut chars = self.class_name.chars();
        let stripped = is_interface
            && chars.next() == Some('I')
            && chars.next().is_some_and(|c| c.is_uppercase());
        if stripped {
            &self.class_name[1..]
        } else {
            &self.class_name
        }
    }
}

/// True when the anchor line declares an MSVC `__interface`.
pub fn is_interface_anchor(anchor: &str) -> bool {
    anchor.contains("__interface")
}

/// Last path component, splitting on both separator styles.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Replace the `from` extension with `to`; other names are returned unchanged.
pub fn swap_extension(file_name: &str, from: &str, to: &str) -> String {
    match file_name.strip_suffix(from) {
        Some(stem) => format!("{}{}", stem, to),
        None => file_name.to_string(),
    }
}

/// Suite name from the last `TYPED_TEST_SUITE(<Suite>, ...)` line of an
/// existing test file, so appended tests join the suite already declared there.
pub fn suite_name_from_test_file(text: &str) -> Option<String> {
    TYPED_TEST_SUITE
        .captures_iter(text)
        .last()
        .map(|caps| caps[1].to_string())
}
