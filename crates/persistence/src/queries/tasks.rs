// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task store queries.
//!
//! A task row embeds its assignee ids, criteria, and submission log as
//! JSON documents; reading a row reconstructs the full aggregate.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use task_track_domain::{
    Category, CriterionRecord, Priority, Progress, SubmissionRecord, Task,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::tasks;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full task rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tasks)]
pub(crate) struct TaskRow {
    task_id: i64,
    title: String,
    description: String,
    category: String,
    due_date: String,
    time_limit_hours: i32,
    priority: String,
    progress: i32,
    assigned_to_json: String,
    criteria_json: String,
    submissions_json: String,
    created_at: String,
    updated_at: String,
}

/// Parses an RFC 3339 column value.
fn parse_timestamp(column: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid {column} timestamp '{value}': {e}"))
    })
}

/// Reconstructs a domain task from its stored row.
pub(crate) fn row_to_task(row: TaskRow) -> Result<Task, PersistenceError> {
    let category: Category = Category::parse(&row.category)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let priority: Priority = Priority::parse(&row.priority)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let time_limit_hours: u32 = row.time_limit_hours.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "Time limit out of range: {}",
            row.time_limit_hours
        ))
    })?;

    let due_date: OffsetDateTime = parse_timestamp("due_date", &row.due_date)?;
    let created_at: OffsetDateTime = parse_timestamp("created_at", &row.created_at)?;
    let updated_at: OffsetDateTime = parse_timestamp("updated_at", &row.updated_at)?;

    let assigned_to: Vec<i64> = serde_json::from_str(&row.assigned_to_json)?;
    let criteria: Vec<CriterionRecord> = serde_json::from_str(&row.criteria_json)?;
    let submissions: Vec<SubmissionRecord> = serde_json::from_str(&row.submissions_json)?;

    Ok(Task::with_id(
        row.task_id,
        row.title,
        row.description,
        category,
        due_date,
        time_limit_hours,
        priority,
        assigned_to,
        criteria,
        submissions,
        Progress::clamped(i64::from(row.progress)),
        created_at,
        updated_at,
    ))
}

/// Retrieves a task by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `task_id` - The task id to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::TaskNotFound` if no such task exists, or a
/// reconstruction error if the stored row is malformed.
pub fn get_task(conn: &mut SqliteConnection, task_id: i64) -> Result<Task, PersistenceError> {
    let result = tasks::table
        .filter(tasks::task_id.eq(task_id))
        .select(TaskRow::as_select())
        .first::<TaskRow>(conn);

    let row: TaskRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::TaskNotFound(task_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_task(row)
}

/// Retrieves all tasks in stable creation order.
///
/// Ordering is ascending by creation time with the task id as a
/// tiebreaker, so repeated listings agree on order.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_tasks(conn: &mut SqliteConnection) -> Result<Vec<Task>, PersistenceError> {
    let rows: Vec<TaskRow> = tasks::table
        .order((tasks::created_at.asc(), tasks::task_id.asc()))
        .select(TaskRow::as_select())
        .load::<TaskRow>(conn)?;

    rows.into_iter().map(row_to_task).collect()
}
