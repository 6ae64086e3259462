// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use task_track_audit::{AuditEvent, StateSnapshot};
use task_track_domain::Task;

/// The result of a successful state transition on an existing task.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new task state after the transition.
    pub new_task: Task,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful task creation.
///
/// The task has no id yet; the persistence layer assigns one when the
/// result is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    /// The newly created task.
    pub task: Task,
    /// The audit event recording the creation.
    pub audit_event: AuditEvent,
}

/// Converts a task to a snapshot for audit purposes.
#[must_use]
pub fn task_snapshot(task: &Task) -> StateSnapshot {
    let task_id: String = task
        .task_id
        .map_or_else(|| String::from("new"), |id| id.to_string());
    let completed_criteria: usize = task
        .assessment_criteria
        .iter()
        .filter(|c| c.completed)
        .count();
    StateSnapshot::new(format!(
        "task_id={},progress={},criteria_completed={}/{},submissions_count={}",
        task_id,
        task.progress,
        completed_criteria,
        task.assessment_criteria.len(),
        task.submissions.len()
    ))
}
