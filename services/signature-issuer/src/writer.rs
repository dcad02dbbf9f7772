//! Batch file persistence.
//!
//! A batch is serialized to `signatures-{index}.json.tmp` and renamed over
//! `signatures-{index}.json`, so a reader never sees a half written batch.
//! Re-running overwrites previous output.

use crate::error::PersistenceError;
use allowlist_core::{batch_file_name, Batch, BatchFile};
use std::fs;
use std::path::{Path, PathBuf};

pub struct BatchWriter {
    output_dir: PathBuf,
}

impl BatchWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory. A directory that already exists is
    /// left untouched.
    pub fn ensure_output_dir(&self) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| PersistenceError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Path of the artifact for the batch with `index`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.output_dir.join(batch_file_name(index))
    }

    /// Persists `batch` and returns the path written.
    pub fn write(&self, batch: &Batch) -> Result<PathBuf, PersistenceError> {
        self.ensure_output_dir()?;

        let path = self.path_for(batch.index);
        let tmp_path = path.with_extension("json.tmp");
        let contents = serde_json::to_vec(&batch.to_file())?;

        if let Err(source) = fs::write(&tmp_path, &contents) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PersistenceError::Write {
                path: tmp_path,
                source,
            });
        }
        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            PersistenceError::Write {
                path: path.clone(),
                source,
            }
        })?;

        tracing::info!(
            path = %path.display(),
            credentials = batch.credentials.len(),
            "Wrote batch file"
        );
        Ok(path)
    }

    /// Reads a previously written batch file.
    pub fn read(&self, index: usize) -> Result<BatchFile, PersistenceError> {
        read_batch_file(&self.path_for(index))
    }
}

/// Reads a batch file from an arbitrary path.
pub fn read_batch_file(path: &Path) -> Result<BatchFile, PersistenceError> {
    let raw = fs::read(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&raw)?)
}
