//! Where an estimate snapshot lives between sessions.
//!
//! The estimate never touches the filesystem directly; it is handed a
//! [`SnapshotStore`] holding a single named slot.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One persisted slot holding a serialized estimate.
pub trait SnapshotStore {
    /// Stored text, or `None` when the slot is empty.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the slot contents.
    fn save(&mut self, contents: &str) -> io::Result<()>;

    /// Empty the slot. Removing an empty slot is not an error.
    fn remove(&mut self) -> io::Result<()>;
}

/// Slot backed by a JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, contents: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), "Wrote snapshot");
        Ok(())
    }

    fn remove(&mut self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-process slot, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    reads_fail: bool,
    writes_fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Slot whose every operation fails, like storage that is full or locked.
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            reads_fail: true,
            writes_fail: true,
        }
    }

    /// Slot holding `contents` that cannot be read back but still accepts
    /// writes, like a file whose permissions were revoked.
    pub fn unreadable(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            reads_fail: true,
            writes_fail: false,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    fn check(failing: bool) -> io::Result<()> {
        if failing {
            Err(io::Error::new(io::ErrorKind::Other, "storage unavailable"))
        } else {
            Ok(())
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> io::Result<Option<String>> {
        Self::check(self.reads_fail)?;
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> io::Result<()> {
        Self::check(self.writes_fail)?;
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn remove(&mut self) -> io::Result<()> {
        Self::check(self.writes_fail)?;
        self.contents = None;
        Ok(())
    }
}
