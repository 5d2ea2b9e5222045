//! Collaborators the core talks to: file access and the per-file output
//! directory preference. Filesystem/JSON implementations back the CLI;
//! in-memory ones back tests and `--print` dry runs.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ScaffoldError;

// ─── Traits ──────────────────────────────────────────────────────────

/// Raw file access.
pub trait FileStore {
    /// Full text of `path`, or `None` if the file does not exist.
    ///
    /// The text is later spliced by byte offset, so it must be exact: a file
    /// that is not valid UTF-8 is an error, not a lossy decode.
    fn read_file(&self, path: &Path) -> Result<Option<String>, ScaffoldError>;

    /// Overwrite `path` in place starting at `offset`, creating it if needed,
    /// and truncate it to `offset + text.len()`. Not an insert: callers
    /// pre-splice whatever must follow the new text.
    fn write_at(&self, path: &Path, offset: usize, text: &str) -> Result<(), ScaffoldError>;
}

/// Source path → chosen output directory.
pub trait PreferenceStore {
    fn output_dir(&self, source: &Path) -> Option<PathBuf>;
    fn set_output_dir(&mut self, source: &Path, dir: &Path) -> Result<(), ScaffoldError>;
}

// ─── Filesystem ──────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileStore;

impl FileStore for FsFileStore {
    fn read_file(&self, path: &Path) -> Result<Option<String>, ScaffoldError> {
        match read_file_lossy(path) {
            Ok((_, true)) => Err(ScaffoldError::NonUtf8Target {
                path: path.display().to_string(),
            }),
            Ok((text, false)) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_at(&self, path: &Path, offset: usize, text: &str) -> Result<(), ScaffoldError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.seek(SeekFrom::Start(offset as u64))?;
        file.write_all(text.as_bytes())?;
        file.set_len((offset + text.len()) as u64)?;
        debug!(path = %path.display(), offset, bytes = text.len(), "Wrote generated text");
        Ok(())
    }
}

/// Read a file as UTF-8, replacing invalid sequences.
/// Returns the text and whether any replacement happened.
pub fn read_file_lossy(path: &Path) -> std::io::Result<(String, bool)> {
    let raw = fs::read(path)?;
    match String::from_utf8(raw) {
        Ok(s) => Ok((s, false)),
        Err(e) => Ok((String::from_utf8_lossy(e.as_bytes()).into_owned(), true)),
    }
}

/// Default location of the preference file.
pub fn default_prefs_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("gtest-scaffold").join("output-dirs.json")
}

/// Preferences persisted as a JSON object keyed by source path.
/// Every change is written through immediately.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl JsonPreferenceStore {
    /// Load from `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ScaffoldError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| ScaffoldError::Preferences {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "Loaded output-dir preferences");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, PathBuf> {
        &self.entries
    }

    /// Drop the preference for `source`. Returns whether one existed.
    pub fn clear_output_dir(&mut self, source: &Path) -> Result<bool, ScaffoldError> {
        let removed = self.entries.remove(&key_for(source)).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    fn save(&self) -> Result<(), ScaffoldError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            ScaffoldError::Preferences {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn output_dir(&self, source: &Path) -> Option<PathBuf> {
        self.entries.get(&key_for(source)).cloned()
    }

    fn set_output_dir(&mut self, source: &Path, dir: &Path) -> Result<(), ScaffoldError> {
        self.entries.insert(key_for(source), dir.to_path_buf());
        self.save()
    }
}

fn key_for(source: &Path) -> String {
    source.to_string_lossy().into_owned()
}

// ─── In-memory ───────────────────────────────────────────────────────

/// File store over a map; interior mutability keeps `write_at` on `&self`.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RefCell<HashMap<PathBuf, String>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), text.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl FileStore for MemoryFileStore {
    fn read_file(&self, path: &Path) -> Result<Option<String>, ScaffoldError> {
        Ok(self.get(path))
    }

    fn write_at(&self, path: &Path, offset: usize, text: &str) -> Result<(), ScaffoldError> {
        let mut files = self.files.borrow_mut();
        let current = files.entry(path.to_path_buf()).or_default();
        let keep = offset.min(current.len());
        current.truncate(keep);
        current.push_str(text);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<PathBuf, PathBuf>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn output_dir(&self, source: &Path) -> Option<PathBuf> {
        self.entries.get(source).cloned()
    }

    fn set_output_dir(&mut self, source: &Path, dir: &Path) -> Result<(), ScaffoldError> {
        self.entries.insert(source.to_path_buf(), dir.to_path_buf());
        Ok(())
    }
}
