// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission recording tests.

use crate::{
    ApiError, CreateTaskResponse, SubmitWorkRequest, SubmitWorkResponse, get_audit_timeline,
    submit_work,
};
use task_track_persistence::Persistence;

use super::helpers::{
    create_test_cause, create_test_member, create_test_persistence, create_test_task,
    register_test_user,
};

fn submit_request(submitted_by: i64) -> SubmitWorkRequest {
    SubmitWorkRequest {
        submitted_by,
        notes: Some(String::from("first draft")),
        files: vec![String::from("1756966234580-design.fig")],
        request_token: None,
    }
}

#[test]
fn test_submit_appends_record_and_completes_task() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let response: SubmitWorkResponse = submit_work(
        &mut persistence,
        created.task.task_id,
        submit_request(2),
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");

    assert_eq!(response.task.submissions.len(), 1);
    assert_eq!(response.task.progress, 100);
    assert_eq!(response.task.status, "completed");
    assert_eq!(
        response.task.submissions[0].files,
        vec![String::from("1756966234580-design.fig")]
    );
}

#[test]
fn test_submit_with_no_notes_and_no_files_still_appends() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let response: SubmitWorkResponse = submit_work(
        &mut persistence,
        created.task.task_id,
        SubmitWorkRequest {
            submitted_by: 2,
            notes: None,
            files: Vec::new(),
            request_token: None,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");

    assert_eq!(response.task.submissions.len(), 1);
    assert_eq!(response.task.submissions[0].notes, None);
    assert!(response.task.submissions[0].files.is_empty());
}

#[test]
fn test_submit_treats_empty_notes_as_absent() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let response: SubmitWorkResponse = submit_work(
        &mut persistence,
        created.task.task_id,
        SubmitWorkRequest {
            submitted_by: 2,
            notes: Some(String::new()),
            files: Vec::new(),
            request_token: None,
        },
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");

    assert_eq!(response.task.submissions[0].notes, None);
}

#[test]
fn test_submit_fails_for_unknown_task() {
    let mut persistence: Persistence = create_test_persistence();

    let result = submit_work(
        &mut persistence,
        999,
        submit_request(2),
        &create_test_member(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_submitter_display_resolves_through_directory() {
    let mut persistence: Persistence = create_test_persistence();
    let ada: i64 = register_test_user(&mut persistence, "Ada Lovelace", "ada@example.com");
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let resolved: SubmitWorkResponse = submit_work(
        &mut persistence,
        created.task.task_id,
        submit_request(ada),
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");
    assert_eq!(resolved.task.submissions[0].submitted_by.name, "Ada Lovelace");

    let unresolved: SubmitWorkResponse = submit_work(
        &mut persistence,
        created.task.task_id,
        submit_request(31337),
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");
    assert_eq!(
        unresolved.task.submissions[1].submitted_by.name,
        "Unknown User"
    );
}

#[test]
fn test_submissions_accumulate_across_submitters() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    for submitter in 1..=3 {
        submit_work(
            &mut persistence,
            created.task.task_id,
            SubmitWorkRequest {
                submitted_by: submitter,
                notes: None,
                files: Vec::new(),
                request_token: None,
            },
            &create_test_member(),
            create_test_cause(),
        )
        .expect("Failed to submit work");
    }

    let task = crate::get_task(&mut persistence, created.task.task_id)
        .expect("Failed to load task");
    assert_eq!(task.submissions.len(), 3);
    assert_eq!(task.submissions[0].submitted_by.user_id, 1);
    assert_eq!(task.submissions[2].submitted_by.user_id, 3);
}

#[test]
fn test_retried_submit_with_same_token_does_not_double_append() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    let request: SubmitWorkRequest = SubmitWorkRequest {
        submitted_by: 2,
        notes: Some(String::from("retried")),
        files: Vec::new(),
        request_token: Some(String::from("token-1")),
    };

    submit_work(
        &mut persistence,
        created.task.task_id,
        request.clone(),
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");
    let retry: SubmitWorkResponse = submit_work(
        &mut persistence,
        created.task.task_id,
        request,
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to retry submit");

    assert_eq!(retry.task.submissions.len(), 1);
    assert_eq!(retry.task.progress, 100);
}

#[test]
fn test_submissions_appear_in_audit_timeline() {
    let mut persistence: Persistence = create_test_persistence();
    let created: CreateTaskResponse = create_test_task(&mut persistence);

    submit_work(
        &mut persistence,
        created.task.task_id,
        submit_request(2),
        &create_test_member(),
        create_test_cause(),
    )
    .expect("Failed to submit work");

    let timeline = get_audit_timeline(&mut persistence, created.task.task_id)
        .expect("Failed to load timeline");

    assert_eq!(timeline.events.len(), 2);
    assert_eq!(timeline.events[0].action, "CreateTask");
    assert_eq!(timeline.events[1].action, "RecordSubmission");
    assert_eq!(timeline.events[1].actor_id, "member-1");
}

#[test]
fn test_audit_timeline_fails_for_unknown_task() {
    let mut persistence: Persistence = create_test_persistence();

    let result = get_audit_timeline(&mut persistence, 999);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
