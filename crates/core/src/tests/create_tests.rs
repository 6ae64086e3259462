// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CoreError, CreateResult, apply_create};
use task_track_domain::{Category, DomainError, Priority, Progress, TaskStatus};
use time::Duration;

use super::helpers::{base_time, create_test_actor, create_test_cause};

fn create_command(criteria: Vec<String>) -> Command {
    Command::CreateTask {
        title: String::from("Landing page redesign"),
        description: String::from("Redesign the marketing landing page"),
        category: Category::UiUxDesign,
        due_date: base_time() + Duration::days(7),
        time_limit_hours: 8,
        priority: Priority::Medium,
        assigned_to: vec![1, 2],
        assessment_criteria: criteria,
    }
}

#[test]
fn test_create_task_starts_at_zero_progress() {
    let command: Command = create_command(vec![String::from("a"), String::from("b")]);

    let result: CreateResult =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();

    assert_eq!(result.task.task_id, None);
    assert_eq!(result.task.progress, Progress::ZERO);
    assert!(result.task.submissions.is_empty());
    assert_eq!(result.task.status(base_time()), TaskStatus::NotStarted);
}

#[test]
fn test_create_task_drops_blank_criteria() {
    let command: Command = create_command(vec![
        String::from("a"),
        String::new(),
        String::from("b"),
    ]);

    let result: CreateResult =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();

    assert_eq!(result.task.assessment_criteria.len(), 2);
    assert_eq!(result.task.assessment_criteria[0].criteria, "a");
    assert_eq!(result.task.assessment_criteria[1].criteria, "b");
}

#[test]
fn test_create_task_with_all_blank_criteria_yields_zero_criteria() {
    let command: Command = create_command(vec![String::from("  "), String::new()]);

    let result: CreateResult =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();

    assert!(result.task.assessment_criteria.is_empty());
}

#[test]
fn test_create_task_rejects_empty_title() {
    let command: Command = Command::CreateTask {
        title: String::from("   "),
        description: String::from("desc"),
        category: Category::WebDevelopment,
        due_date: base_time() + Duration::days(1),
        time_limit_hours: 2,
        priority: Priority::High,
        assigned_to: Vec::new(),
        assessment_criteria: Vec::new(),
    };

    let result = apply_create(command, create_test_actor(), create_test_cause(), base_time());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTitle(_)))
    ));
}

#[test]
fn test_create_task_accepts_past_due_date() {
    let command: Command = Command::CreateTask {
        title: String::from("Late already"),
        description: String::new(),
        category: Category::AppDesign,
        due_date: base_time() - Duration::days(1),
        time_limit_hours: 1,
        priority: Priority::Low,
        assigned_to: vec![3],
        assessment_criteria: Vec::new(),
    };

    let result: CreateResult =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();

    assert_eq!(result.task.status(base_time()), TaskStatus::Overdue);
}

#[test]
fn test_create_task_produces_creation_audit_event() {
    let command: Command = create_command(vec![String::from("a")]);

    let result: CreateResult =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();

    assert_eq!(result.audit_event.action.name, "CreateTask");
    // The task has no id yet, so the event cannot be task-scoped.
    assert_eq!(result.audit_event.task_id, None);
    assert_eq!(result.audit_event.before.data, "task_id=none");
    assert!(result.audit_event.after.data.contains("progress=0"));
}

#[test]
fn test_create_task_timestamps_match_creation_time() {
    let command: Command = create_command(Vec::new());

    let result: CreateResult =
        apply_create(command, create_test_actor(), create_test_cause(), base_time()).unwrap();

    assert_eq!(result.task.created_at, base_time());
    assert_eq!(result.task.updated_at, base_time());
}
