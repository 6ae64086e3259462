// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the TaskTrack assignment tracker.
//!
//! This crate provides database persistence for task records, the user
//! directory, and the audit trail. It is built on Diesel over `SQLite`.
//!
//! ## Storage Layout
//!
//! Each task is one row. Its assignee ids, assessment criteria, and
//! submission log are embedded JSON documents within that row; they are
//! never independently addressable and cannot outlive their task.
//!
//! ## Backend
//!
//! `SQLite` is the only backend. It requires no external infrastructure
//! and serves development, tests, and deployment alike. File-backed
//! databases run in WAL mode for better read concurrency; tests use
//! unique shared in-memory databases.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory `SQLite`
//! - Each test receives an isolated database instance
//! - Tests fail fast if migrations cannot be applied

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use task_track::{CreateResult, TransitionResult};
use task_track_audit::AuditEvent;
use task_track_domain::{Task, UserProfile, UserRole};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::PersistCreateResult;

/// Persistence adapter for tasks, users, and audit events.
///
/// The adapter owns one `SQLite` connection. Callers serialize access to
/// it (the server keeps it behind a mutex), and the orchestration
/// methods wrap multi-row writes in transactions.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        // Verify foreign key enforcement is active
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        // Verify foreign key enforcement is active
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Task Mutations
    // ========================================================================

    /// Persists a creation result (new task row plus its audit event).
    ///
    /// # Arguments
    ///
    /// * `result` - The creation result to persist
    ///
    /// # Returns
    ///
    /// The assigned task id and the creation event id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_create(
        &mut self,
        result: &CreateResult,
    ) -> Result<PersistCreateResult, PersistenceError> {
        mutations::persist_create(&mut self.conn, result)
    }

    /// Persists a transition result (updated task row plus its audit event).
    ///
    /// # Arguments
    ///
    /// * `result` - The transition result to persist
    ///
    /// # Returns
    ///
    /// The event ID of the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    // ========================================================================
    // Task Queries
    // ========================================================================

    /// Retrieves a task by id.
    ///
    /// # Arguments
    ///
    /// * `task_id` - The task id to retrieve
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TaskNotFound` if no such task exists.
    pub fn get_task(&mut self, task_id: i64) -> Result<Task, PersistenceError> {
        queries::get_task(&mut self.conn, task_id)
    }

    /// Retrieves all tasks in stable creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tasks(&mut self) -> Result<Vec<Task>, PersistenceError> {
        queries::list_tasks(&mut self.conn)
    }

    // ========================================================================
    // User Directory
    // ========================================================================

    /// Persists a directory registration (new user plus its audit event).
    ///
    /// # Arguments
    ///
    /// * `name` - The user's display name
    /// * `email` - The user's email address
    /// * `role` - The user's role
    /// * `event` - The registration audit event
    ///
    /// # Returns
    ///
    /// The assigned user id and the event id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_registration(
        &mut self,
        name: &str,
        email: &str,
        role: UserRole,
        event: &AuditEvent,
    ) -> Result<(i64, i64), PersistenceError> {
        mutations::persist_registration(&mut self.conn, name, email, role, event)
    }

    /// Retrieves a user profile by id.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user id to retrieve
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UserNotFound` if no such user exists.
    pub fn get_user(&mut self, user_id: i64) -> Result<UserProfile, PersistenceError> {
        queries::get_user(&mut self.conn, user_id)
    }

    /// Retrieves all user profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserProfile>, PersistenceError> {
        queries::list_users(&mut self.conn)
    }

    // ========================================================================
    // Audit Trail
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Arguments
    ///
    /// * `event` - The audit event to persist
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The event ID to retrieve
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the ordered audit timeline for one task.
    ///
    /// # Arguments
    ///
    /// * `task_id` - The task whose timeline is requested
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(&mut self, task_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, task_id)
    }
}
