//! Typed handle for one JSON document on disk.
//!
//! A [`JsonFile`] opens the containing directory once as a capability and
//! then loads or saves the whole document through it. Saves go to a hidden
//! temporary file which is renamed over the target, so the target is never
//! observed half-written.

use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Handle for a single JSON document stored in one file.
///
/// The type parameter is the document's in-memory shape; it only needs
/// `Serialize`/`Deserialize` at the call sites that use it, so a handle can
/// be opened before the document type is fully decided.
pub struct JsonFile<D> {
    dir: Dir,
    path: Utf8PathBuf,
    file_name: String,
    _doc: PhantomData<D>,
}

impl<D> std::fmt::Debug for JsonFile<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<D> JsonFile<D> {
    /// Opens a handle for the document at `path`.
    ///
    /// The path's parent directory is opened as a capability and retained;
    /// a bare file name resolves against the current directory. The file
    /// itself is not touched, so opening a handle for a file that does not
    /// exist yet succeeds and the first [`load`](Self::load) reports it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] if `path` is not UTF-8 or has no
    /// file name component, and [`StoreError::Read`] if the parent
    /// directory cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = path.as_ref();
        let Some(utf8) = Utf8Path::from_path(raw) else {
            return Err(StoreError::InvalidPath {
                path: raw.to_path_buf(),
            });
        };
        let Some(file_name) = utf8.file_name() else {
            return Err(StoreError::InvalidPath {
                path: raw.to_path_buf(),
            });
        };
        let parent = match utf8.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| StoreError::Read {
                path: raw.to_path_buf(),
                message: err.to_string(),
            })?;
        Ok(Self {
            dir,
            path: utf8.to_owned(),
            file_name: file_name.to_owned(),
            _doc: PhantomData,
        })
    }

    /// Reads and parses the entire document.
    ///
    /// Every call re-reads the file; the handle holds no cached state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file is missing or unreadable
    /// and [`StoreError::Parse`] if its contents are not valid JSON for
    /// `D`.
    pub fn load(&self) -> Result<D, StoreError>
    where
        D: DeserializeOwned,
    {
        let bytes = self
            .dir
            .read(&self.file_name)
            .map_err(|err| self.read_error(err))?;
        let contents = String::from_utf8(bytes).map_err(|err| self.read_error(err))?;
        serde_json::from_str(&contents).map_err(|err| StoreError::Parse {
            path: self.std_path(),
            message: err.to_string(),
        })
    }

    /// Serializes the document and atomically replaces the file.
    ///
    /// Output is pretty-printed with two-space indentation. The write goes
    /// to a uniquely named hidden temporary file in the same directory,
    /// which is fsynced and then renamed over the target; the parent
    /// directory is synced best-effort afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if serialization, the temporary
    /// write, or the rename fails. The temporary file is removed on
    /// failure.
    pub fn save(&self, document: &D) -> Result<(), StoreError>
    where
        D: Serialize,
    {
        let json =
            serde_json::to_string_pretty(document).map_err(|err| self.write_error(err))?;
        let tmp_name = temp_name(&self.file_name);
        self.write_temp(&tmp_name, &json)?;
        self.promote_temp(&tmp_name)?;
        sync_directory(&self.dir);
        Ok(())
    }

    fn write_temp(&self, tmp_name: &str, contents: &str) -> Result<(), StoreError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self
            .dir
            .open_with(tmp_name, &options)
            .map_err(|err| self.write_error(err))?;
        let written = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(err) = written {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
            return Err(self.write_error(err));
        }
        Ok(())
    }

    fn promote_temp(&self, tmp_name: &str) -> Result<(), StoreError> {
        if let Err(err) = self.rename_over_target(tmp_name) {
            drop(self.dir.remove_file(tmp_name));
            return Err(self.write_error(err));
        }
        Ok(())
    }

    #[cfg(windows)]
    fn rename_over_target(&self, tmp_name: &str) -> io::Result<()> {
        // Windows rename fails when the target exists, so remove it first.
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(tmp_name, &self.dir, &self.file_name)
    }

    #[cfg(not(windows))]
    fn rename_over_target(&self, tmp_name: &str) -> io::Result<()> {
        self.dir.rename(tmp_name, &self.dir, &self.file_name)
    }

    fn read_error(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::Read {
            path: self.std_path(),
            message: err.to_string(),
        }
    }

    fn write_error(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::Write {
            path: self.std_path(),
            message: err.to_string(),
        }
    }

    fn std_path(&self) -> PathBuf {
        self.path.clone().into_std_path_buf()
    }
}

fn temp_name(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn sync_directory(dir: &Dir) {
    // Best-effort; a failed directory sync does not undo the rename.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Ignore sync failures.
    }
}
