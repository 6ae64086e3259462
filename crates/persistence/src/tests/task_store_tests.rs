// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PersistCreateResult, Persistence, PersistenceError};
use task_track::{Command, SubmissionCompletes, TransitionResult, apply};
use task_track_domain::{Progress, Task};
use time::Duration;

use super::helpers::{
    base_time, create_task_result, create_test_actor, create_test_cause, create_test_persistence,
};

#[test]
fn test_persist_create_assigns_sequential_ids() {
    let mut persistence: Persistence = create_test_persistence();

    let first: PersistCreateResult = persistence
        .persist_create(&create_task_result("First", base_time()))
        .expect("Failed to persist first task");
    let second: PersistCreateResult = persistence
        .persist_create(&create_task_result("Second", base_time()))
        .expect("Failed to persist second task");

    assert!(first.task_id > 0);
    assert!(second.task_id > first.task_id);
}

#[test]
fn test_get_task_round_trips_the_aggregate() {
    let mut persistence: Persistence = create_test_persistence();
    let created = create_task_result("Round trip", base_time());
    let ids: PersistCreateResult = persistence
        .persist_create(&created)
        .expect("Failed to persist task");

    let stored: Task = persistence
        .get_task(ids.task_id)
        .expect("Failed to load task");

    assert_eq!(stored.task_id, Some(ids.task_id));
    assert_eq!(stored.title, "Round trip");
    assert_eq!(stored.category, created.task.category);
    assert_eq!(stored.due_date, created.task.due_date);
    assert_eq!(stored.time_limit_hours, created.task.time_limit_hours);
    assert_eq!(stored.priority, created.task.priority);
    assert_eq!(stored.assigned_to, vec![1, 2]);
    assert_eq!(stored.assessment_criteria, created.task.assessment_criteria);
    assert!(stored.submissions.is_empty());
    assert_eq!(stored.progress, Progress::ZERO);
    assert_eq!(stored.created_at, base_time());
}

#[test]
fn test_get_task_fails_for_unknown_id() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.get_task(999);
    assert_eq!(result, Err(PersistenceError::TaskNotFound(999)));
}

#[test]
fn test_list_tasks_is_ordered_by_creation_time() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .persist_create(&create_task_result("Newer", base_time() + Duration::hours(1)))
        .expect("Failed to persist task");
    persistence
        .persist_create(&create_task_result("Older", base_time()))
        .expect("Failed to persist task");

    let tasks: Vec<Task> = persistence.list_tasks().expect("Failed to list tasks");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Older");
    assert_eq!(tasks[1].title, "Newer");
}

#[test]
fn test_list_tasks_breaks_created_at_ties_by_id() {
    let mut persistence: Persistence = create_test_persistence();

    let first: PersistCreateResult = persistence
        .persist_create(&create_task_result("A", base_time()))
        .expect("Failed to persist task");
    let second: PersistCreateResult = persistence
        .persist_create(&create_task_result("B", base_time()))
        .expect("Failed to persist task");

    let tasks: Vec<Task> = persistence.list_tasks().expect("Failed to list tasks");
    assert_eq!(tasks[0].task_id, Some(first.task_id));
    assert_eq!(tasks[1].task_id, Some(second.task_id));
}

#[test]
fn test_persist_transition_stores_submission_and_progress() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: PersistCreateResult = persistence
        .persist_create(&create_task_result("Submit target", base_time()))
        .expect("Failed to persist task");
    let task: Task = persistence
        .get_task(ids.task_id)
        .expect("Failed to load task");

    let transition: TransitionResult = apply(
        &task,
        Command::RecordSubmission {
            submitted_by: 2,
            notes: Some(String::from("done")),
            files: vec![String::from("final.pdf")],
            request_token: None,
        },
        &SubmissionCompletes,
        create_test_actor(),
        create_test_cause(),
        base_time() + Duration::hours(2),
    )
    .expect("Failed to apply submission");

    persistence
        .persist_transition(&transition)
        .expect("Failed to persist transition");

    let stored: Task = persistence
        .get_task(ids.task_id)
        .expect("Failed to reload task");
    assert_eq!(stored.submissions.len(), 1);
    assert_eq!(stored.submissions[0].files, vec![String::from("final.pdf")]);
    assert_eq!(stored.progress, Progress::COMPLETE);
    assert_eq!(stored.updated_at, base_time() + Duration::hours(2));
}

#[test]
fn test_persist_transition_stores_criterion_flags() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: PersistCreateResult = persistence
        .persist_create(&create_task_result("Toggle target", base_time()))
        .expect("Failed to persist task");
    let task: Task = persistence
        .get_task(ids.task_id)
        .expect("Failed to load task");

    let transition: TransitionResult = apply(
        &task,
        Command::ToggleCriterion {
            index: 1,
            completed: true,
        },
        &SubmissionCompletes,
        create_test_actor(),
        create_test_cause(),
        base_time(),
    )
    .expect("Failed to apply toggle");
    persistence
        .persist_transition(&transition)
        .expect("Failed to persist transition");

    let stored: Task = persistence
        .get_task(ids.task_id)
        .expect("Failed to reload task");
    assert!(!stored.assessment_criteria[0].completed);
    assert!(stored.assessment_criteria[1].completed);
}

#[test]
fn test_persist_transition_fails_for_deleted_row() {
    let mut persistence: Persistence = create_test_persistence();

    // Build a transition against a task that was never persisted here.
    let mut task: Task = create_task_result("Ghost", base_time()).task;
    task.task_id = Some(4242);

    let transition: TransitionResult = apply(
        &task,
        Command::SetProgress { value: 10 },
        &SubmissionCompletes,
        create_test_actor(),
        create_test_cause(),
        base_time(),
    )
    .expect("Failed to apply progress change");

    let result = persistence.persist_transition(&transition);
    assert_eq!(result, Err(PersistenceError::TaskNotFound(4242)));
}
