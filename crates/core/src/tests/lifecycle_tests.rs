// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests walking a task through its full observable lifecycle.

use crate::{Command, SubmissionCompletes, TransitionResult, apply, apply_create};
use task_track_domain::{Category, Priority, Task, TaskStatus};
use time::Duration;

use super::helpers::{base_time, create_test_actor, create_test_cause, create_test_task};

#[test]
fn test_overdue_task_completes_despite_past_due_date() {
    // Born overdue: due yesterday, zero progress.
    let command: Command = Command::CreateTask {
        title: String::from("Late task"),
        description: String::new(),
        category: Category::WebDevelopment,
        due_date: base_time() - Duration::days(1),
        time_limit_hours: 4,
        priority: Priority::Medium,
        assigned_to: vec![1],
        assessment_criteria: Vec::new(),
    };
    let created =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();
    assert_eq!(created.task.status(base_time()), TaskStatus::Overdue);

    // Setting progress to 100 flips it to completed even though the due
    // date remains in the past.
    let result: TransitionResult = apply(
        &created.task,
        Command::SetProgress { value: 100 },
        &SubmissionCompletes,
        create_test_actor(),
        create_test_cause(),
        base_time(),
    )
    .unwrap();
    assert_eq!(result.new_task.status(base_time()), TaskStatus::Completed);
}

#[test]
fn test_progress_override_moves_not_started_to_in_progress() {
    let task: Task = create_test_task();
    assert_eq!(task.status(base_time()), TaskStatus::NotStarted);

    let result: TransitionResult = apply(
        &task,
        Command::SetProgress { value: 50 },
        &SubmissionCompletes,
        create_test_actor(),
        create_test_cause(),
        base_time(),
    )
    .unwrap();

    assert_eq!(result.new_task.status(base_time()), TaskStatus::InProgress);
}

#[test]
fn test_single_submission_completes_multi_assignee_task() {
    // Observed behavior: the first submission completes the whole task,
    // no matter how many assignees have yet to submit.
    let task: Task = create_test_task();
    assert_eq!(task.assigned_to.len(), 2);

    let result: TransitionResult = apply(
        &task,
        Command::RecordSubmission {
            submitted_by: 1,
            notes: None,
            files: Vec::new(),
            request_token: None,
        },
        &SubmissionCompletes,
        create_test_actor(),
        create_test_cause(),
        base_time(),
    )
    .unwrap();

    assert_eq!(result.new_task.status(base_time()), TaskStatus::Completed);
}

#[test]
fn test_incomplete_task_becomes_overdue_with_time_alone() {
    let task: Task = create_test_task();

    let before_due = base_time() + Duration::days(6);
    let after_due = base_time() + Duration::days(8);

    assert_eq!(task.status(before_due), TaskStatus::NotStarted);
    assert_eq!(task.status(after_due), TaskStatus::Overdue);
}

#[test]
fn test_status_rereads_are_stable() {
    let task: Task = create_test_task();
    let now = base_time() + Duration::days(2);

    let first = task.status(now);
    let second = task.status(now);
    assert_eq!(first, second);
}
