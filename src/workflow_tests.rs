//! End-to-end tests for generation, planning and writing.

use super::*;
use crate::store::{FsFileStore, MemoryFileStore, MemoryPreferenceStore};

const IWIDGET_H: &str = "\
#pragma once

__interface IWidget
{
    virtual int Foo(int a, string b);
    void Resize(int width,
                int height);
};
";

const WIDGET_H: &str = "\
#pragma once

class Widget
{
public:
    virtual ~Widget();
    virtual int Foo(int a, string b) = 0;
    void NotMocked();
};
";

const WIDGET_CPP: &str = "\
#include \"Widget.h\"

int Widget::Foo(int a) { return a; }

void Widget::Configure(const Options& opts,
                       wstring name)
{
}
";

// ─── generate_mock ───────────────────────────────────────────────────

#[test]
fn test_generate_mock_interface_strips_prefix() {
    let ctx = SourceContext::from_path("C:\\src\\IWidget.h");
    let mock = generate_mock(&ctx, IWIDGET_H, "__interface IWidget").unwrap();
    assert!(mock.text.starts_with("class WidgetMock : public IWidget\n"));
    assert!(mock.text.contains("MOCK_METHOD(int,Foo,(int a, string b),(override));\n"));
}

#[test]
fn test_generate_mock_merges_wrapped_signature() {
    let ctx = SourceContext::from_path("IWidget.h");
    let mock = generate_mock(&ctx, IWIDGET_H, "__interface IWidget").unwrap();
    assert!(
        mock.text.contains("MOCK_METHOD(void,Resize,(int width,                int height),(override));"),
        "got:\n{}",
        mock.text
    );
    assert_eq!(mock.methods.len(), 2);
}

#[test]
fn test_generate_mock_plain_class_keeps_name() {
    let ctx = SourceContext::from_path("Widget.h");
    let mock = generate_mock(&ctx, WIDGET_H, "class Widget").unwrap();
    assert!(mock.text.starts_with("class WidgetMock : public Widget\n"));
    assert_eq!(mock.methods.len(), 1);
    assert!(!mock.text.contains("NotMocked"));
}

#[test]
fn test_generate_mock_empty_anchor() {
    let ctx = SourceContext::from_path("Widget.h");
    let err = generate_mock(&ctx, WIDGET_H, "").unwrap_err();
    assert!(matches!(err, ScaffoldError::NoSelection));
}

#[test]
fn test_generate_mock_anchor_missing() {
    let ctx = SourceContext::from_path("Widget.h");
    let err = generate_mock(&ctx, WIDGET_H, "class Gadget").unwrap_err();
    assert!(matches!(err, ScaffoldError::AnchorNotFound { .. }));
}

// ─── generate_test_stub ──────────────────────────────────────────────

#[test]
fn test_generate_stub_one_line_method() {
    let ctx = SourceContext::from_path("Widget.cpp");
    let cpp = "int Foo(int a);\n";
    let stub = generate_test_stub(&ctx, cpp, "int Foo(int a);", None).unwrap();
    assert_eq!(
        stub.text,
        "TYPED_TEST(WidgetTest,ShouldFoo){\n\ta=0;\n\tEXPECT_TRUE(2 == 2);\n\tEXPECT_FALSE(2 == 1);\n\tEXPECT_EQUALS(2, 2);\n}"
    );
    assert_eq!(stub.suite_name, "WidgetTest");
}

#[test]
fn test_generate_stub_wrapped_definition() {
    let ctx = SourceContext::from_path("Widget.cpp");
    let anchor = "void Widget::Configure(const Options& opts,";
    let stub = generate_test_stub(&ctx, WIDGET_CPP, anchor, None).unwrap();
    assert!(stub.text.starts_with("TYPED_TEST(WidgetTest,ShouldConfigure){\n"));
    assert!(stub.text.contains("\tconst Options& opts;\n\tname=L\"\";\n"));
}

#[test]
fn test_generate_stub_uses_existing_suite_name() {
    let ctx = SourceContext::from_path("Widget.cpp");
    let existing = "TYPED_TEST_SUITE(LegacyWidgetTests,LegacyTypes);\n";
    let stub = generate_test_stub(
        &ctx,
        WIDGET_CPP,
        "int Widget::Foo(int a) { return a; }",
        Some(existing),
    )
    .unwrap();
    assert!(stub.text.starts_with("TYPED_TEST(LegacyWidgetTests,ShouldFoo){"));
}

#[test]
fn test_generate_stub_without_parenthesis() {
    let ctx = SourceContext::from_path("Widget.cpp");
    let err = generate_test_stub(&ctx, "#include \"Widget.h\"\n", "#include \"Widget.h\"", None)
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::MalformedSignature { .. }));
}

// ─── File kinds and output dirs ──────────────────────────────────────

#[test]
fn test_check_file_kind() {
    assert!(check_file_kind(Path::new("a/Widget.h"), ".h").is_ok());
    assert!(check_file_kind(Path::new("a/Widget.cpp"), ".cpp").is_ok());
    assert!(matches!(
        check_file_kind(Path::new("a/Widget.cpp"), ".h"),
        Err(ScaffoldError::WrongFileKind { expected: ".h", .. })
    ));
    assert!(check_file_kind(Path::new("Makefile"), ".cpp").is_err());
}

#[test]
fn test_resolve_output_dir_uses_choice_without_storing() {
    let prefs = MemoryPreferenceStore::new();
    let source = Path::new("/src/Widget.cpp");
    let out = resolve_output_dir(&prefs, source, Some(Path::new("/tests"))).unwrap();
    assert_eq!(out, OutputDir { dir: PathBuf::from("/tests"), remember: true });
    assert!(prefs.output_dir(source).is_none());
}

#[test]
fn test_resolve_output_dir_stored_wins() {
    let mut prefs = MemoryPreferenceStore::new();
    let source = Path::new("/src/Widget.cpp");
    prefs.set_output_dir(source, Path::new("/stored")).unwrap();
    let out = resolve_output_dir(&prefs, source, Some(Path::new("/other"))).unwrap();
    assert_eq!(out, OutputDir { dir: PathBuf::from("/stored"), remember: false });
}

#[test]
fn test_resolve_output_dir_unresolved() {
    let prefs = MemoryPreferenceStore::new();
    let err = resolve_output_dir(&prefs, Path::new("/src/Widget.cpp"), None).unwrap_err();
    assert!(matches!(err, ScaffoldError::OutputPathUnresolved { .. }));
}

#[test]
fn test_test_target_does_not_remember() {
    let prefs = MemoryPreferenceStore::new();
    let source = Path::new("/src/Widget.cpp");
    let target = test_target(&prefs, source, Some(Path::new("/tests"))).unwrap();
    assert_eq!(target, PathBuf::from("/tests/WidgetTest.cpp"));
    assert!(prefs.output_dir(source).is_none());
}

// ─── write_test ──────────────────────────────────────────────────────

#[test]
fn test_write_test_creates_then_appends() {
    let files = MemoryFileStore::new();
    let mut prefs = MemoryPreferenceStore::new();
    let source = Path::new("/src/Widget.cpp");
    let out = Path::new("/tests");

    let first = write_test(&files, &mut prefs, source, WIDGET_CPP,
        "int Widget::Foo(int a) { return a; }", Some(out)).unwrap();
    assert!(first.created);
    assert_eq!(first.path, PathBuf::from("/tests/WidgetTest.cpp"));

    assert_eq!(prefs.output_dir(source), Some(PathBuf::from("/tests")));

    let second = write_test(&files, &mut prefs, source, WIDGET_CPP,
        "void Widget::Configure(const Options& opts,", None).unwrap();
    assert!(!second.created);

    let text = files.get(Path::new("/tests/WidgetTest.cpp")).unwrap();
    assert!(text.starts_with("#include \"pch.h\"\n"));
    assert!(text.contains("#include \"Widget.h\"\n"));
    let foo = text.find("TYPED_TEST(WidgetTest,ShouldFoo)").unwrap();
    let configure = text.find("TYPED_TEST(WidgetTest,ShouldConfigure)").unwrap();
    assert!(foo < configure);
    assert!(text.ends_with("EXPECT_EQUALS(2, 2);\n}\n}\n}\n"));
    assert_eq!(text.matches('{').count(), text.matches('}').count());
}

#[test]
fn test_write_test_rejects_header() {
    let files = MemoryFileStore::new();
    let mut prefs = MemoryPreferenceStore::new();
    let err = write_test(&files, &mut prefs, Path::new("Widget.h"), WIDGET_H,
        "class Widget", Some(Path::new("/tests"))).unwrap_err();
    assert!(matches!(err, ScaffoldError::WrongFileKind { .. }));
    assert!(prefs.output_dir(Path::new("Widget.h")).is_none());
}

#[test]
fn test_write_test_failed_run_keeps_no_preference() {
    let files = MemoryFileStore::new();
    let mut prefs = MemoryPreferenceStore::new();
    let source = Path::new("/src/Widget.cpp");

    let err = write_test(&files, &mut prefs, source, WIDGET_CPP,
        "int Widget::Missing(int a)", Some(Path::new("/tests"))).unwrap_err();
    assert!(matches!(err, ScaffoldError::AnchorNotFound { .. }));

    let err = write_test(&files, &mut prefs, source, "#include \"Widget.h\"\n",
        "#include \"Widget.h\"", Some(Path::new("/tests"))).unwrap_err();
    assert!(matches!(err, ScaffoldError::MalformedSignature { .. }));

    assert!(prefs.output_dir(source).is_none());
    assert!(files.get(Path::new("/tests/WidgetTest.cpp")).is_none());
}

#[test]
fn test_write_test_treats_empty_target_as_new() {
    let files = MemoryFileStore::new();
    files.insert("/tests/WidgetTest.cpp", "");
    let mut prefs = MemoryPreferenceStore::new();
    let outcome = write_test(&files, &mut prefs, Path::new("/src/Widget.cpp"), WIDGET_CPP,
        "int Widget::Foo(int a) { return a; }", Some(Path::new("/tests"))).unwrap();
    assert!(outcome.created);
    assert!(outcome.text.contains("TYPED_TEST_SUITE(WidgetTest,WidgetTestTypes);"));
}

// ─── write_mock ──────────────────────────────────────────────────────

#[test]
fn test_write_mock_into_new_file_adds_headers() {
    let files = MemoryFileStore::new();
    let target = Path::new("/mocks/WidgetMock.h");
    let outcome = write_mock(&files, Path::new("/src/IWidget.h"), IWIDGET_H,
        "__interface IWidget", target).unwrap();
    assert!(outcome.created);
    let text = files.get(target).unwrap();
    assert!(text.starts_with("#include \"pch.h\"\n"));
    assert!(text.contains("#include \"IWidget.h\"\n\nclass WidgetMock : public IWidget\n"));
}

#[test]
fn test_write_mock_into_test_file_goes_before_suite() {
    let files = MemoryFileStore::new();
    let mut prefs = MemoryPreferenceStore::new();
    write_test(&files, &mut prefs, Path::new("/src/Widget.cpp"), WIDGET_CPP,
        "int Widget::Foo(int a) { return a; }", Some(Path::new("/tests"))).unwrap();

    let target = Path::new("/tests/WidgetTest.cpp");
    let before = files.get(target).unwrap();
    let outcome = write_mock(&files, Path::new("/src/Widget.h"), WIDGET_H,
        "class Widget", target).unwrap();
    assert!(!outcome.created);

    let text = files.get(target).unwrap();
    let mock = text.find("class WidgetMock : public Widget").unwrap();
    let alias = text.find("using WidgetTestTypes").unwrap();
    assert!(mock < alias);
    assert!(text.len() > before.len());
    assert!(text.ends_with(&before[outcome.offset..]));
}

#[test]
fn test_write_mock_rejects_source_file() {
    let files = MemoryFileStore::new();
    let err = write_mock(&files, Path::new("Widget.cpp"), WIDGET_CPP,
        "class Widget", Path::new("WidgetMock.h")).unwrap_err();
    assert!(matches!(err, ScaffoldError::WrongFileKind { expected: ".h", .. }));
}

#[test]
fn test_write_test_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("Widget.cpp");
    let out = tmp.path().join("tests");
    let mut prefs = MemoryPreferenceStore::new();

    write_test(&FsFileStore, &mut prefs, &source, WIDGET_CPP,
        "int Widget::Foo(int a) { return a; }", Some(out.as_path())).unwrap();
    write_test(&FsFileStore, &mut prefs, &source, WIDGET_CPP,
        "void Widget::Configure(const Options& opts,", None).unwrap();

    let text = std::fs::read_to_string(out.join("WidgetTest.cpp")).unwrap();
    assert_eq!(text.matches("TYPED_TEST(WidgetTest,").count(), 2);
    assert_eq!(text.matches('{').count(), text.matches('}').count());
}

#[test]
fn test_write_test_refuses_non_utf8_target() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("Widget.cpp");
    let out = tmp.path().join("tests");
    let mut prefs = MemoryPreferenceStore::new();

    write_test(&FsFileStore, &mut prefs, &source, WIDGET_CPP,
        "int Widget::Foo(int a) { return a; }", Some(out.as_path())).unwrap();

    // A hand-edited comment in a legacy code page ahead of the first test.
    let target = out.join("WidgetTest.cpp");
    let text = std::fs::read_to_string(&target).unwrap();
    let at = text.find("TYPED_TEST(").unwrap();
    let mut raw = text[..at].as_bytes().to_vec();
    raw.extend_from_slice(b"// Widget\x92s tests\n");
    raw.extend_from_slice(text[at..].as_bytes());
    std::fs::write(&target, &raw).unwrap();

    let err = write_test(&FsFileStore, &mut prefs, &source, WIDGET_CPP,
        "void Widget::Configure(const Options& opts,", None).unwrap_err();
    assert!(matches!(err, ScaffoldError::NonUtf8Target { .. }));
    assert_eq!(std::fs::read(&target).unwrap(), raw);
}

#[test]
fn test_write_mock_refuses_non_utf8_target() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("WidgetMock.h");
    std::fs::write(&target, b"// caf\xe9\nnamespace mocks {\n}\n").unwrap();

    let err = write_mock(&FsFileStore, Path::new("/src/IWidget.h"), IWIDGET_H,
        "__interface IWidget", &target).unwrap_err();
    assert!(matches!(err, ScaffoldError::NonUtf8Target { .. }));
}
