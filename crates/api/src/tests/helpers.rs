// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AuthenticatedActor, CreateTaskRequest, CreateTaskResponse, RegisterUserRequest, Role,
    create_task, register_user,
};
use task_track_audit::Cause;
use task_track_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_coordinator() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("coord-1"), Role::Coordinator)
}

pub fn create_test_member() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("member-1"), Role::Member)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn create_valid_request() -> CreateTaskRequest {
    CreateTaskRequest {
        title: String::from("Landing page redesign"),
        description: String::from("Redesign the marketing landing page"),
        category: String::from("UI/UX Design"),
        due_date: String::from("2030-06-01"),
        time_limit: 8,
        priority: Some(String::from("medium")),
        assigned_to: vec![1, 2],
        assessment_criteria: vec![String::from("responsive layout"), String::from("a11y")],
    }
}

/// Creates a task through the API and returns the response.
pub fn create_test_task(persistence: &mut Persistence) -> CreateTaskResponse {
    create_task(
        persistence,
        create_valid_request(),
        &create_test_coordinator(),
        create_test_cause(),
    )
    .expect("Failed to create task")
}

/// Registers a directory user and returns the assigned id.
pub fn register_test_user(persistence: &mut Persistence, name: &str, email: &str) -> i64 {
    register_user(
        persistence,
        RegisterUserRequest {
            name: String::from(name),
            email: String::from(email),
            role: String::from("member"),
        },
        &create_test_coordinator(),
        create_test_cause(),
    )
    .expect("Failed to register user")
    .user
    .user_id
}
