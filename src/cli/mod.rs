//! CLI layer: argument parsing, command dispatch, and subcommand implementations.

pub mod args;

pub use args::*;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use scaffold::store::{default_prefs_path, read_file_lossy};
use scaffold::workflow::{check_file_kind, test_target};
use scaffold::{
    compute_insertion_offset, plan_mock, plan_test, write_mock, write_test, FileStore,
    FsFileStore, JsonPreferenceStore, PreferenceStore, ScaffoldError, WriteOutcome,
};

// ─── CLI ─────────────────────────────────────────────────────────────

/// Generate GoogleMock classes and GoogleTest typed-test stubs from C++ declarations
#[derive(Parser, Debug)]
#[command(name = "gtest-scaffold", version, about, after_help = "\
Run 'gtest-scaffold <COMMAND> --help' for detailed options and examples.\n\
Common options: -f <FILE> (file under edit), -l <TEXT> or -n <LINE> (anchor line)")]
pub(crate) struct Cli {
    /// Log level for stderr output (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Generate a mock class from a class or __interface in a header
    Mock(MockArgs),

    /// Generate a typed test stub for a method in a source file
    Test(TestArgs),

    /// Show where the next generated block would go in an existing file
    Offset(OffsetArgs),

    /// Manage remembered output directories
    Prefs(PrefsArgs),
}

// ─── Main entry point ───────────────────────────────────────────────

pub fn run() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Mock(args) => cmd_mock(args),
        Commands::Test(args) => cmd_test(args),
        Commands::Offset(args) => cmd_offset(args),
        Commands::Prefs(args) => cmd_prefs(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let log_level = match level {
        "error" => tracing::Level::ERROR,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Strip the `\\?\` extended-length path prefix that Windows canonicalize adds.
pub(crate) fn clean_path(p: &str) -> String {
    p.strip_prefix(r"\\?\").unwrap_or(p).to_string()
}

/// Canonical form of a source path, so preferences key the same file the same way.
pub(crate) fn canonical_source(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(p) => PathBuf::from(clean_path(&p.to_string_lossy())),
        Err(_) => path.to_path_buf(),
    }
}

fn open_prefs(path: Option<&Path>) -> Result<JsonPreferenceStore, ScaffoldError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_prefs_path);
    JsonPreferenceStore::open(path)
}

/// Text of a file the user pointed at. Only scanned, never spliced, so a lossy
/// decode is acceptable here.
fn read_input(path: &Path) -> Result<String, ScaffoldError> {
    let (text, was_lossy) = read_file_lossy(path).map_err(|e| {
        ScaffoldError::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })?;
    if was_lossy {
        warn!(file = %path.display(), "File is not valid UTF-8; invalid bytes were replaced");
    }
    Ok(text)
}

fn report(outcome: &WriteOutcome, print: bool) {
    if print {
        print!("{}", outcome.text);
        return;
    }
    let verb = if outcome.created { "Created" } else { "Updated" };
    eprintln!("{} {} (wrote {} bytes at offset {})",
        verb, outcome.path.display(), outcome.text.len(), outcome.offset);
}

// ─── Commands ───────────────────────────────────────────────────────

fn cmd_mock(args: MockArgs) -> Result<(), ScaffoldError> {
    check_file_kind(&args.file, ".h")?;
    let header_text = read_input(&args.file)?;
    let anchor = args.anchor.resolve(&header_text)?;
    debug!(file = %args.file.display(), anchor = %anchor.trim(), "Generating mock");

    let outcome = if args.print {
        let existing = FsFileStore.read_file(&args.into)?;
        plan_mock(&args.file, &header_text, &anchor, &args.into, existing.as_deref())?
    } else {
        write_mock(&FsFileStore, &args.file, &header_text, &anchor, &args.into)?
    };
    report(&outcome, args.print);
    Ok(())
}

fn cmd_test(args: TestArgs) -> Result<(), ScaffoldError> {
    check_file_kind(&args.file, ".cpp")?;
    let cpp_text = read_input(&args.file)?;
    let anchor = args.anchor.resolve(&cpp_text)?;
    let source = canonical_source(&args.file);
    debug!(file = %source.display(), anchor = %anchor.trim(), "Generating test stub");

    let mut prefs = open_prefs(args.prefs.as_deref())?;
    let outcome = if args.print {
        let target = test_target(&prefs, &source, args.out_dir.as_deref())?;
        let existing = FsFileStore.read_file(&target)?;
        plan_test(&source, &cpp_text, &anchor, &target, existing.as_deref())?
    } else {
        write_test(&FsFileStore, &mut prefs, &source, &cpp_text, &anchor, args.out_dir.as_deref())?
    };
    report(&outcome, args.print);
    Ok(())
}

fn cmd_offset(args: OffsetArgs) -> Result<(), ScaffoldError> {
    let text = read_input(&args.file)?;
    let point = compute_insertion_offset(&text, args.marker)?;
    let json = serde_json::to_string_pretty(&point)
        .map_err(|e| ScaffoldError::InvalidArgs(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn cmd_prefs(args: PrefsArgs) -> Result<(), ScaffoldError> {
    let mut prefs = open_prefs(args.prefs.as_deref())?;
    match args.action {
        PrefsAction::Get { source } => {
            let source = canonical_source(&source);
            match prefs.output_dir(&source) {
                Some(dir) => println!("{}", dir.display()),
                None => eprintln!("No output directory stored for {}", source.display()),
            }
        }
        PrefsAction::Set { source, dir } => {
            let source = canonical_source(&source);
            prefs.set_output_dir(&source, &dir)?;
            eprintln!("{} -> {}", source.display(), dir.display());
        }
        PrefsAction::Clear { source } => {
            let source = canonical_source(&source);
            if prefs.clear_output_dir(&source)? {
                eprintln!("Cleared output directory for {}", source.display());
            } else {
                eprintln!("No output directory stored for {}", source.display());
            }
        }
        PrefsAction::List => {
            eprintln!("Preferences: {}", prefs.path().display());
            for (source, dir) in prefs.entries() {
                println!("{} -> {}", source, dir.display());
            }
        }
    }
    Ok(())
}
