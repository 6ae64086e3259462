// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit` — Audit event persistence
//! - `directory` — User directory mutations
//! - `tasks` — Task row inserts and updates
//!
//! The orchestration functions in this module wrap a state write and its
//! audit event in one transaction, so a transition is recorded either
//! completely or not at all.

use diesel::prelude::*;
use task_track::{CreateResult, TransitionResult};
use task_track_audit::AuditEvent;
use task_track_domain::UserRole;
use tracing::debug;

use crate::error::PersistenceError;

pub mod audit;
pub mod directory;
pub mod tasks;

pub use audit::{persist_audit_event, persist_audit_event_with_task};
pub use directory::insert_user;
pub use tasks::{insert_task, update_task};

/// The ids assigned while persisting a task creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistCreateResult {
    /// The task id assigned by the database.
    pub task_id: i64,
    /// The event id of the creation audit event.
    pub event_id: i64,
}

/// Persists a creation result: the new task row plus its audit event.
///
/// The audit event is scoped to the freshly assigned task id. Both writes
/// happen in one transaction.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The creation result to persist
///
/// # Errors
///
/// Returns an error if any write in the transaction fails.
pub fn persist_create(
    conn: &mut SqliteConnection,
    result: &CreateResult,
) -> Result<PersistCreateResult, PersistenceError> {
    conn.transaction::<PersistCreateResult, PersistenceError, _>(|conn| {
        let task_id: i64 = tasks::insert_task(conn, &result.task)?;
        let event_id: i64 =
            audit::persist_audit_event_with_task(conn, &result.audit_event, Some(task_id))?;
        debug!(task_id, event_id, "Persisted task creation");
        Ok(PersistCreateResult { task_id, event_id })
    })
}

/// Persists a transition result: the updated task row plus its audit event.
///
/// Both writes happen in one transaction.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition result to persist
///
/// # Returns
///
/// The event id of the persisted audit event.
///
/// # Errors
///
/// Returns an error if any write in the transaction fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        tasks::update_task(conn, &result.new_task)?;
        let event_id: i64 = audit::persist_audit_event(conn, &result.audit_event)?;
        debug!(event_id, "Persisted task transition");
        Ok(event_id)
    })
}

/// Persists a directory registration: the new user row plus its audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `name` - The user's display name
/// * `email` - The user's email address
/// * `role` - The user's role
/// * `event` - The registration audit event (not task-scoped)
///
/// # Returns
///
/// The assigned user id and the event id.
///
/// # Errors
///
/// Returns an error if any write in the transaction fails.
pub fn persist_registration(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    role: UserRole,
    event: &AuditEvent,
) -> Result<(i64, i64), PersistenceError> {
    conn.transaction::<(i64, i64), PersistenceError, _>(|conn| {
        let user_id: i64 = directory::insert_user(conn, name, email, role)?;
        let event_id: i64 = audit::persist_audit_event(conn, event)?;
        debug!(user_id, event_id, "Persisted user registration");
        Ok((user_id, event_id))
    })
}
