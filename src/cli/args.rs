//! CLI argument structs for all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use scaffold::scanner::split_lines;
use scaffold::ScaffoldError;

/// Where the anchor line comes from: literal text or a line of the file.
#[derive(Args, Debug)]
pub struct AnchorArgs {
    /// Anchor line text (the class/interface line for mocks, the method line for tests)
    #[arg(short, long, required_unless_present = "line_number", conflicts_with = "line_number")]
    pub line: Option<String>,

    /// 1-based line number of the anchor in --file
    #[arg(short = 'n', long)]
    pub line_number: Option<usize>,
}

impl AnchorArgs {
    /// Resolve to the anchor text, reading it from `file_text` when given by number.
    pub fn resolve(&self, file_text: &str) -> Result<String, ScaffoldError> {
        if let Some(line) = &self.line {
            return Ok(line.clone());
        }
        let number = self.line_number.unwrap_or(0);
        split_lines(file_text)
            .get(number.wrapping_sub(1))
            .map(|line| line.to_string())
            .ok_or_else(|| ScaffoldError::InvalidArgs(format!(
                "Line {} is out of range for this file",
                number
            )))
    }
}

#[derive(Parser, Debug)]
#[command(after_long_help = r#"EXAMPLES:
  Interface:   gtest-scaffold mock -f src/IWidget.h -l "__interface IWidget" --into tests/WidgetMock.h
  By line:     gtest-scaffold mock -f src/Widget.h -n 12 --into tests/WidgetTest.cpp
  Dry run:     gtest-scaffold mock -f src/Widget.h -n 12 --into tests/WidgetMock.h --print

Members are taken from the line after the anchor up to the closing '};'.
Inside an __interface every method is mocked; inside a class only 'virtual' ones.
When --into already has a TYPED_TEST_SUITE, the mock is inserted ahead of it.
"#)]
pub struct MockArgs {
    /// Header (.h) containing the class or interface
    #[arg(short, long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub anchor: AnchorArgs,

    /// File to create or extend with the mock
    #[arg(long)]
    pub into: PathBuf,

    /// Print the text that would be written instead of writing it
    #[arg(long)]
    pub print: bool,
}

#[derive(Parser, Debug)]
#[command(after_long_help = r#"EXAMPLES:
  First test:  gtest-scaffold test -f src/Widget.cpp -l "int Widget::Foo(int a)" --out-dir tests
  Next tests:  gtest-scaffold test -f src/Widget.cpp -n 42

The test file is <out-dir>/<Name>Test.cpp. The output directory chosen the first
time is remembered per source file (see 'gtest-scaffold prefs').
"#)]
pub struct TestArgs {
    /// Source (.cpp) containing the method
    #[arg(short, long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub anchor: AnchorArgs,

    /// Output directory, used and remembered when none is stored for --file
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Preference file (default: <local data dir>/gtest-scaffold/output-dirs.json)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Print the text that would be written instead of writing it
    #[arg(long)]
    pub print: bool,
}

#[derive(Parser, Debug)]
pub struct OffsetArgs {
    /// Existing generated file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Kind of text to place: test or mock
    #[arg(short, long, default_value = "test")]
    pub marker: scaffold::InsertionMarker,
}

#[derive(Parser, Debug)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub action: PrefsAction,

    /// Preference file (default: <local data dir>/gtest-scaffold/output-dirs.json)
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Show the output directory stored for a source file
    Get {
        #[arg(short, long)]
        source: PathBuf,
    },
    /// Store the output directory for a source file
    Set {
        #[arg(short, long)]
        source: PathBuf,
        #[arg(short, long)]
        dir: PathBuf,
    },
    /// Forget the output directory for a source file
    Clear {
        #[arg(short, long)]
        source: PathBuf,
    },
    /// List all stored output directories
    List,
}
