//! Persistence for the shared document.
//!
//! The engine is handed a [`Store`] capability and only ever loads or saves
//! the document whole; there are no partial updates. [`JsonFileStore`] is
//! the production backend, [`MemoryStore`] backs the test suites.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use crate::{Document, StoreError};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

pub trait Store: Send + Sync {
    fn load(&self) -> StoreFuture<'_, Document>;
    fn save<'a>(&'a self, doc: &'a Document) -> StoreFuture<'a, ()>;
}

/// Whole-document JSON file storage.
///
/// Saves write a sibling temp file and rename it into place, so an
/// interrupted write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> StoreFuture<'_, Document> {
        Box::pin(async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                // A store that does not exist yet is an empty document.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    return Ok(Document::default());
                }
                Err(err) => return Err(StoreError::Io(err)),
            };
            Ok(serde_json::from_slice(&bytes)?)
        })
    }

    fn save<'a>(&'a self, doc: &'a Document) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let bytes = serde_json::to_vec_pretty(doc)?;
            let tmp = self.tmp_path();
            tokio::fs::write(&tmp, &bytes).await?;
            tokio::fs::rename(&tmp, &self.path).await?;
            Ok(())
        })
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Mutex<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> StoreFuture<'_, Document> {
        Box::pin(async move {
            Ok(self
                .doc
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone())
        })
    }

    fn save<'a>(&'a self, doc: &'a Document) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            *self.doc.lock().unwrap_or_else(PoisonError::into_inner) = doc.clone();
            Ok(())
        })
    }
}
