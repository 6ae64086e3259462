// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use task_track_domain::{Category, Priority};
use time::OffsetDateTime;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new task.
    ///
    /// String inputs (category, priority, due date) are parsed into
    /// domain types at the API boundary before a command is built;
    /// criteria arrive raw and are normalized during application.
    CreateTask {
        /// The task title.
        title: String,
        /// The task description.
        description: String,
        /// The task category.
        category: Category,
        /// When the task is due.
        due_date: OffsetDateTime,
        /// The time budget for the task, in hours.
        time_limit_hours: u32,
        /// The task priority.
        priority: Priority,
        /// Ids of the assigned users. Not validated for existence;
        /// unresolved ids degrade to a placeholder on display.
        assigned_to: Vec<i64>,
        /// Raw assessment criteria; blank entries are dropped.
        assessment_criteria: Vec<String>,
    },
    /// Set the completion flag of one assessment criterion.
    ToggleCriterion {
        /// The zero-based criterion index.
        index: usize,
        /// The new completion flag.
        completed: bool,
    },
    /// Append a work submission to the task.
    RecordSubmission {
        /// The id of the submitting user. Submitters are not required
        /// to be assigned to the task.
        submitted_by: i64,
        /// Optional free-text notes.
        notes: Option<String>,
        /// References to stored files, in upload order.
        files: Vec<String>,
        /// Optional idempotency token. A token already present in the
        /// submission log turns the command into a no-op.
        request_token: Option<String>,
    },
    /// Overwrite the task's progress value.
    ///
    /// Out-of-range values are clamped to 0..=100 rather than rejected.
    SetProgress {
        /// The requested progress value.
        value: i64,
    },
}
