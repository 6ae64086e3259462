// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use task_track_audit::{Actor, Cause};
use task_track_domain::{Category, CriterionRecord, Priority, Task};
use time::{Duration, OffsetDateTime};

/// A fixed reference time so transitions are deterministic in tests.
pub fn base_time() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::seconds(1_760_000_000)
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("user-1"), String::from("member"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// A persisted task with two criteria, due a week after `base_time`.
pub fn create_test_task() -> Task {
    Task::with_id(
        1,
        String::from("Landing page redesign"),
        String::from("Redesign the marketing landing page"),
        Category::UiUxDesign,
        base_time() + Duration::days(7),
        8,
        Priority::Medium,
        vec![1, 2],
        vec![
            CriterionRecord::new(String::from("responsive layout")),
            CriterionRecord::new(String::from("accessible colors")),
        ],
        Vec::new(),
        task_track_domain::Progress::ZERO,
        base_time(),
        base_time(),
    )
}
