// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::progress::ProgressPolicy;
use crate::state::{CreateResult, TransitionResult, task_snapshot};
use task_track_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use task_track_domain::{
    CriterionRecord, Progress, SubmissionRecord, Task, normalize_criteria, validate_title,
};
use time::OffsetDateTime;

/// Applies a creation command, producing a new task and audit event.
///
/// The task is not persisted here; the caller persists the result and
/// receives the assigned task id.
///
/// # Arguments
///
/// * `command` - The creation command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The creation timestamp
///
/// # Returns
///
/// * `Ok(CreateResult)` containing the new task and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates domain rules.
pub fn apply_create(
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CreateResult, CoreError> {
    match command {
        Command::CreateTask {
            title,
            description,
            category,
            due_date,
            time_limit_hours,
            priority,
            assigned_to,
            assessment_criteria,
        } => {
            validate_title(&title)?;

            // Blank criteria are dropped; an all-blank list yields a task
            // with zero criteria, which is valid.
            let criteria: Vec<CriterionRecord> = normalize_criteria(&assessment_criteria);

            let task: Task = Task::new(
                title.clone(),
                description,
                category,
                due_date,
                time_limit_hours,
                priority,
                assigned_to,
                criteria,
                now,
            );

            let before: StateSnapshot = StateSnapshot::new(String::from("task_id=none"));
            let after: StateSnapshot = task_snapshot(&task);

            let action: Action = Action::new(
                String::from("CreateTask"),
                Some(format!(
                    "Created task '{}' in category '{}'",
                    title, task.category
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, None);

            Ok(CreateResult { task, audit_event })
        }
        Command::ToggleCriterion { .. }
        | Command::RecordSubmission { .. }
        | Command::SetProgress { .. } => {
            // Task-scoped commands should use apply() instead
            unreachable!("apply_create called with a task-scoped command")
        }
    }
}

/// Applies a command to an existing task, producing a new task state and
/// audit event.
///
/// The input task is not mutated. Transitions are atomic: they either
/// succeed completely or fail without side effects.
///
/// # Arguments
///
/// * `task` - The current task state (immutable)
/// * `command` - The command to apply
/// * `policy` - The progress policy consulted after a submission
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The transition timestamp
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new task state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates domain rules.
#[allow(clippy::too_many_lines)]
pub fn apply(
    task: &Task,
    command: Command,
    policy: &dyn ProgressPolicy,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::ToggleCriterion { index, completed } => {
            let before: StateSnapshot = task_snapshot(task);

            let mut new_task: Task = task.clone();
            new_task.set_criterion(index, completed)?;
            new_task.touch(now);

            let after: StateSnapshot = task_snapshot(&new_task);

            let action: Action = Action::new(
                String::from("ToggleCriterion"),
                Some(format!("Set criterion {index} completed={completed}")),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, task.task_id);

            Ok(TransitionResult {
                new_task,
                audit_event,
            })
        }
        Command::RecordSubmission {
            submitted_by,
            notes,
            files,
            request_token,
        } => {
            // A token already present in the log means a retried request
            // whose original write succeeded: preserve state, record the
            // retry in the audit trail.
            if let Some(token) = request_token
                .as_deref()
                .filter(|t| task.has_submission_token(t))
            {
                let snapshot: StateSnapshot = task_snapshot(task);
                let action: Action = Action::new(
                    String::from("RecordSubmission"),
                    Some(format!("Duplicate request token '{token}' ignored")),
                );
                let audit_event: AuditEvent = AuditEvent::new(
                    actor,
                    cause,
                    action,
                    snapshot.clone(),
                    snapshot,
                    task.task_id,
                );
                return Ok(TransitionResult {
                    new_task: task.clone(),
                    audit_event,
                });
            }

            let before: StateSnapshot = task_snapshot(task);

            let record: SubmissionRecord =
                SubmissionRecord::new(submitted_by, now, notes, files, request_token);
            let file_count: usize = record.files.len();

            let mut new_task: Task = task.clone();
            new_task.push_submission(record);
            let progress: Progress = policy.progress_after_submission(&new_task);
            new_task.set_progress(progress);
            new_task.touch(now);

            let after: StateSnapshot = task_snapshot(&new_task);

            let action: Action = Action::new(
                String::from("RecordSubmission"),
                Some(format!(
                    "Recorded submission by user {submitted_by} with {file_count} files"
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, task.task_id);

            Ok(TransitionResult {
                new_task,
                audit_event,
            })
        }
        Command::SetProgress { value } => {
            let before: StateSnapshot = task_snapshot(task);

            let progress: Progress = Progress::clamped(value);
            let mut new_task: Task = task.clone();
            new_task.set_progress(progress);
            new_task.touch(now);

            let after: StateSnapshot = task_snapshot(&new_task);

            let action: Action = Action::new(
                String::from("SetProgress"),
                Some(format!("Progress set to {progress}")),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, task.task_id);

            Ok(TransitionResult {
                new_task,
                audit_event,
            })
        }
        Command::CreateTask { .. } => {
            // Creation commands should use apply_create() instead
            unreachable!("apply called with a creation command")
        }
    }
}
