// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Disk-backed file store for submission uploads.
//!
//! Uploaded bytes land in a flat uploads directory. The reference string
//! handed back (and stored in the submission log) is the stored file
//! name: a millisecond timestamp prefix plus the sanitized client name.
//! Serving the bytes back by that reference is a static-file concern
//! outside the engine.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use task_track_api::{FileStore, FileStoreError};
use tracing::debug;

/// Stores uploads under one directory on the local disk.
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Strips path components from a client-supplied file name.
    fn sanitize(file_name: &str) -> Result<String, FileStoreError> {
        let cleaned: String = file_name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        if cleaned.trim().is_empty() {
            return Err(FileStoreError::InvalidName {
                name: file_name.to_string(),
            });
        }
        Ok(cleaned)
    }

    /// Current unix time in milliseconds, for reference prefixes.
    fn timestamp_millis() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis())
    }
}

impl FileStore for DiskFileStore {
    fn store(&self, task_id: i64, file_name: &str, bytes: &[u8]) -> Result<String, FileStoreError> {
        let sanitized: String = Self::sanitize(file_name)?;
        let reference: String = format!("{}-{}", Self::timestamp_millis(), sanitized);

        fs::create_dir_all(&self.root).map_err(|e| FileStoreError::WriteFailed {
            name: sanitized.clone(),
            reason: e.to_string(),
        })?;
        fs::write(self.root.join(&reference), bytes).map_err(|e| FileStoreError::WriteFailed {
            name: sanitized.clone(),
            reason: e.to_string(),
        })?;

        debug!(task_id, reference = %reference, size = bytes.len(), "Stored submission file");
        Ok(reference)
    }
}
