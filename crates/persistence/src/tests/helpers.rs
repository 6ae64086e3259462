// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use task_track::{Command, CreateResult, apply_create};
use task_track_audit::{Actor, Cause};
use task_track_domain::{Category, Priority};
use time::{Duration, OffsetDateTime};

/// A fixed reference time so stored rows are deterministic in tests.
pub fn base_time() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::seconds(1_760_000_000)
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("user-1"), String::from("coordinator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// Creates an isolated in-memory persistence instance.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Builds a creation result with the given title, due a week out.
pub fn create_task_result(title: &str, created_at: OffsetDateTime) -> CreateResult {
    let command: Command = Command::CreateTask {
        title: String::from(title),
        description: String::from("Test description"),
        category: Category::UiUxDesign,
        due_date: base_time() + Duration::days(7),
        time_limit_hours: 8,
        priority: Priority::Medium,
        assigned_to: vec![1, 2],
        assessment_criteria: vec![String::from("responsive layout"), String::from("a11y")],
    };
    apply_create(command, create_test_actor(), create_test_cause(), created_at)
        .expect("Failed to build creation result")
}
