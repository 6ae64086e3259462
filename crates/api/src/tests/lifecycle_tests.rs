// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end lifecycle tests driven through the API surface.

use crate::{
    ApiError, CreateTaskRequest, CreateTaskResponse, SetProgressRequest, ToggleCriterionRequest,
    create_task, get_task, set_progress, toggle_criterion,
};
use task_track_persistence::Persistence;

use super::helpers::{
    create_test_cause, create_test_coordinator, create_test_member, create_test_persistence,
    create_test_task, create_valid_request,
};

/// Creates a task that is already past its due date.
fn create_overdue_task(persistence: &mut Persistence) -> CreateTaskResponse {
    let mut request: CreateTaskRequest = create_valid_request();
    request.due_date = String::from("2001-01-01");
    create_task(
        persistence,
        request,
        &create_test_coordinator(),
        create_test_cause(),
    )
    .expect("Failed to create task")
}

#[test]
fn test_task_due_yesterday_is_overdue_then_completed() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_overdue_task(&mut persistence);
    assert_eq!(created.task.status, "overdue");

    let response = set_progress(
        &mut persistence,
        created.task.task_id,
        &SetProgressRequest {
            user_id: 2,
            progress: 100,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to set progress");

    // Completion dominates the past due date.
    assert_eq!(response.task.status, "completed");
}

#[test]
fn test_progress_override_is_clamped_not_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let high = set_progress(
        &mut persistence,
        created.task.task_id,
        &SetProgressRequest {
            user_id: 2,
            progress: 250,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to set progress");
    assert_eq!(high.task.progress, 100);

    let low = set_progress(
        &mut persistence,
        created.task.task_id,
        &SetProgressRequest {
            user_id: 2,
            progress: -40,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to set progress");
    assert_eq!(low.task.progress, 0);
}

#[test]
fn test_set_progress_moves_status_to_in_progress() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);
    assert_eq!(created.task.status, "not-started");

    let response = set_progress(
        &mut persistence,
        created.task.task_id,
        &SetProgressRequest {
            user_id: 2,
            progress: 40,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to set progress");

    assert_eq!(response.task.status, "in-progress");
}

#[test]
fn test_toggle_criterion_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let toggled = toggle_criterion(
        &mut persistence,
        created.task.task_id,
        ToggleCriterionRequest {
            criteria_index: 0,
            completed: true,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to toggle criterion");
    assert!(toggled.task.assessment_criteria[0].completed);

    // Toggling back restores the flag; the criteria list itself never
    // changes shape.
    let restored = toggle_criterion(
        &mut persistence,
        created.task.task_id,
        ToggleCriterionRequest {
            criteria_index: 0,
            completed: false,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to toggle criterion");
    assert!(!restored.task.assessment_criteria[0].completed);
    assert_eq!(restored.task.assessment_criteria.len(), 2);
}

#[test]
fn test_toggle_criterion_rejects_out_of_range_index() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let result = toggle_criterion(
        &mut persistence,
        created.task.task_id,
        ToggleCriterionRequest {
            criteria_index: 5,
            completed: true,
        },
        &create_test_member(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_toggle_criterion_does_not_change_progress() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let toggled = toggle_criterion(
        &mut persistence,
        created.task.task_id,
        ToggleCriterionRequest {
            criteria_index: 1,
            completed: true,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to toggle criterion");

    assert_eq!(toggled.task.progress, 0);
    assert_eq!(toggled.task.status, "not-started");
}

#[test]
fn test_get_task_recomputation_is_idempotent() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let first = get_task(&mut persistence, created.task.task_id).expect("Failed to load task");
    let second = get_task(&mut persistence, created.task.task_id).expect("Failed to load task");

    assert_eq!(first, second);
}
