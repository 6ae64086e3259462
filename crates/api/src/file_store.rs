// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The file storage collaborator contract.
//!
//! The engine never streams file contents. Uploaded bytes are handed to
//! a `FileStore`, which returns a stable reference string the engine
//! records verbatim in the submission log. Serving bytes back by that
//! reference is entirely the store's responsibility.

use thiserror::Error;

/// Errors produced by a file store implementation.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// The file name was empty or unusable after sanitization.
    #[error("Invalid file name '{name}'")]
    InvalidName {
        /// The rejected file name.
        name: String,
    },
    /// The underlying storage failed to persist the bytes.
    #[error("Failed to store file '{name}': {reason}")]
    WriteFailed {
        /// The file name being stored.
        name: String,
        /// The underlying failure.
        reason: String,
    },
}

/// Stores uploaded submission files and hands back reference strings.
///
/// Reference uniqueness is not required by the engine; callers store
/// whatever reference the implementation returns.
pub trait FileStore: Send + Sync {
    /// Stores one uploaded file for a task and returns its reference.
    ///
    /// # Arguments
    ///
    /// * `task_id` - The task the upload belongs to
    /// * `file_name` - The client-supplied file name
    /// * `bytes` - The raw file contents
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unusable or the write fails.
    fn store(&self, task_id: i64, file_name: &str, bytes: &[u8]) -> Result<String, FileStoreError>;
}
