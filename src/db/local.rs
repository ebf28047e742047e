// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable storage for the encoded workout list.
//!
//! The whole list lives in a single text blob that is rewritten on every
//! change. On disk the blob is written to a temp file and renamed into
//! place, so readers see either the old or the new document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
enum Backend {
    File(PathBuf),
    Memory(Arc<Mutex<Option<String>>>),
}

/// Blob storage for the workout document.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    backend: Backend,
}

impl LocalStorage {
    /// File-backed storage. The file and its directory are created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::info!(path = %path.display(), "Using workout file");
        Self {
            backend: Backend::File(path),
        }
    }

    /// Empty in-memory storage for testing (offline mode).
    pub fn new_in_memory() -> Self {
        Self::with_contents(None)
    }

    /// In-memory storage seeded with `contents`. Clones share the same blob.
    pub fn with_contents(contents: Option<String>) -> Self {
        Self {
            backend: Backend::Memory(Arc::new(Mutex::new(contents))),
        }
    }

    /// Read the stored document, `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<String>, StorageError> {
        match &self.backend {
            Backend::File(path) => match fs::read_to_string(path) {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(StorageError::Read {
                    path: path.clone(),
                    source,
                }),
            },
            Backend::Memory(blob) => Ok(blob.lock().unwrap_or_else(|e| e.into_inner()).clone()),
        }
    }

    /// Replace the stored document.
    pub fn save(&self, text: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::File(path) => write_atomic(path, text.as_bytes()).map_err(|source| {
                StorageError::Write {
                    path: path.clone(),
                    source,
                }
            }),
            Backend::Memory(blob) => {
                *blob.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
                Ok(())
            }
        }
    }

    /// Remove the stored document entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        match &self.backend {
            Backend::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StorageError::Write {
                    path: path.clone(),
                    source,
                }),
            },
            Backend::Memory(blob) => {
                *blob.lock().unwrap_or_else(|e| e.into_inner()) = None;
                Ok(())
            }
        }
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, contents)?;
    if let Err(e) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
