// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task store mutations.
//!
//! Inserts write the whole aggregate. Updates touch only the fields the
//! engine can change after creation: progress, criteria flags, the
//! submission log, and the updated-at timestamp.

use diesel::prelude::*;
use task_track_domain::Task;
use time::format_description::well_known::Rfc3339;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::tasks;
use crate::error::PersistenceError;

/// Formats a timestamp for storage.
fn format_timestamp(value: time::OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Inserts a new task row and returns the assigned task id.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `task` - The task to insert (its `task_id` is ignored)
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_task(conn: &mut SqliteConnection, task: &Task) -> Result<i64, PersistenceError> {
    let assigned_to_json: String = serde_json::to_string(&task.assigned_to)?;
    let criteria_json: String = serde_json::to_string(&task.assessment_criteria)?;
    let submissions_json: String = serde_json::to_string(&task.submissions)?;

    let time_limit_hours: i32 = i32::try_from(task.time_limit_hours).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "Time limit out of range: {}",
            task.time_limit_hours
        ))
    })?;

    diesel::insert_into(tasks::table)
        .values((
            tasks::title.eq(&task.title),
            tasks::description.eq(&task.description),
            tasks::category.eq(task.category.as_str()),
            tasks::due_date.eq(format_timestamp(task.due_date)?),
            tasks::time_limit_hours.eq(time_limit_hours),
            tasks::priority.eq(task.priority.as_str()),
            tasks::progress.eq(i32::from(task.progress.value())),
            tasks::assigned_to_json.eq(assigned_to_json),
            tasks::criteria_json.eq(criteria_json),
            tasks::submissions_json.eq(submissions_json),
            tasks::created_at.eq(format_timestamp(task.created_at)?),
            tasks::updated_at.eq(format_timestamp(task.updated_at)?),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Updates the mutable fields of an existing task row.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `task` - The task state to store; must carry a `task_id`
///
/// # Errors
///
/// Returns `PersistenceError::TaskNotFound` if the row does not exist,
/// or an error if serialization or the update fails.
pub fn update_task(conn: &mut SqliteConnection, task: &Task) -> Result<(), PersistenceError> {
    let task_id: i64 = task
        .task_id
        .ok_or_else(|| PersistenceError::Other(String::from("Cannot update a task without an id")))?;

    let criteria_json: String = serde_json::to_string(&task.assessment_criteria)?;
    let submissions_json: String = serde_json::to_string(&task.submissions)?;

    let affected: usize = diesel::update(tasks::table.filter(tasks::task_id.eq(task_id)))
        .set((
            tasks::progress.eq(i32::from(task.progress.value())),
            tasks::criteria_json.eq(criteria_json),
            tasks::submissions_json.eq(submissions_json),
            tasks::updated_at.eq(format_timestamp(task.updated_at)?),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::TaskNotFound(task_id));
    }
    Ok(())
}
