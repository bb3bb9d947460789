//! Flat-file backed data store.
//!
//! Every operation re-reads the document from disk and every mutation
//! rewrites it wholesale; nothing is cached between calls. Mutations run
//! their whole load-mutate-save sequence under one writer lock, so two
//! concurrent writers serialize instead of silently dropping the first
//! writer's change (the lost-update hazard of unguarded read-modify-write
//! on a shared file).

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use flatfile::{JsonFile, StoreError};

use crate::models::{ApiResult, Document};

/// Shared handle to the persisted document.
#[derive(Debug)]
pub struct DataStore {
    file: JsonFile<Document>,
    write_lock: Mutex<()>,
}

impl DataStore {
    /// Opens a store for the document at `path`.
    ///
    /// The file itself is not read here; the first operation reports a
    /// missing or corrupt file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the path has no file name or its parent
    /// directory cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            file: JsonFile::open(path)?,
            write_lock: Mutex::new(()),
        })
    }

    /// Loads a fresh copy of the document without taking the writer lock.
    ///
    /// # Errors
    ///
    /// Returns a redacted internal error when the file is missing or
    /// unparsable.
    pub fn snapshot(&self) -> ApiResult<Document> {
        Ok(self.file.load()?)
    }

    /// Runs `mutate` under the writer lock: load fresh, apply, save.
    ///
    /// The document is saved only when `mutate` returns `Ok`, so failed
    /// validation or lookup leaves the file byte-identical.
    ///
    /// # Errors
    ///
    /// Propagates the mutation's own error, or a redacted internal error
    /// when the load or save fails.
    pub fn update<T>(
        &self,
        mutate: impl FnOnce(&mut Document) -> ApiResult<T>,
    ) -> ApiResult<T> {
        // The guard carries no state; the document is re-read under the
        // lock, so a poisoned lock is recoverable.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut document = self.file.load()?;
        let value = mutate(&mut document)?;
        self.file.save(&document)?;
        Ok(value)
    }
}
