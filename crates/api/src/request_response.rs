// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! DTOs are distinct from domain types and represent the API contract.
//! Wire field names are camelCase, preserving the JSON contract of the
//! system this engine models.

use serde::{Deserialize, Serialize};

/// API request to create a new task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// The task title.
    pub title: String,
    /// The task description.
    #[serde(default)]
    pub description: String,
    /// The category display string (must be one of the fixed set).
    pub category: String,
    /// The due date: RFC 3339 or `YYYY-MM-DD`.
    pub due_date: String,
    /// The time budget in hours (must be at least 1).
    pub time_limit: i64,
    /// The priority: `low`, `medium`, or `high`. Defaults to `medium`.
    #[serde(default)]
    pub priority: Option<String>,
    /// Ids of the assigned users. Not validated for existence.
    #[serde(default)]
    pub assigned_to: Vec<i64>,
    /// Raw assessment criteria; blank entries are dropped.
    #[serde(default)]
    pub assessment_criteria: Vec<String>,
}

/// API response for a successful task creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResponse {
    /// The created task.
    pub task: TaskResponse,
    /// The event id of the creation audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to list tasks with optional filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksRequest {
    /// Case-insensitive substring matched against title and category.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact category display string.
    #[serde(default)]
    pub category: Option<String>,
}

/// API response for a task listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksResponse {
    /// Matching tasks in stable creation order.
    pub tasks: Vec<TaskResponse>,
}

/// API request to set one assessment criterion's completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCriterionRequest {
    /// The zero-based criterion index.
    pub criteria_index: usize,
    /// The new completion flag.
    pub completed: bool,
}

/// API response for a criterion toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCriterionResponse {
    /// The updated task.
    pub task: TaskResponse,
    /// The event id of the audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to record a work submission.
///
/// File bytes never reach the engine; the caller stores them first and
/// passes the resulting reference strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWorkRequest {
    /// The id of the submitting user. Submitters are not required to be
    /// assigned to the task.
    pub submitted_by: i64,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// File references returned by the file store, in upload order.
    #[serde(default)]
    pub files: Vec<String>,
    /// Optional idempotency token for safe retries.
    #[serde(default)]
    pub request_token: Option<String>,
}

/// API response for a recorded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWorkResponse {
    /// The updated task.
    pub task: TaskResponse,
    /// The event id of the audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to override a task's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProgressRequest {
    /// The acting user. Recorded for audit attribution; the update is
    /// task-wide, never scoped per assignee.
    pub user_id: i64,
    /// The requested progress value. Out-of-range values are clamped.
    pub progress: i64,
}

/// API response for a progress override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProgressResponse {
    /// The updated task.
    pub task: TaskResponse,
    /// The event id of the audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to register a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// The user's display name.
    pub name: String,
    /// The user's email address (unique).
    pub email: String,
    /// The user's role: `coordinator` or `member`.
    pub role: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    /// The registered user.
    pub user: UserView,
    /// The event id of the registration audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// All directory users.
    pub users: Vec<UserView>,
}

/// A directory user as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// The user id.
    pub user_id: i64,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: String,
}

/// A resolved assignee or submitter reference.
///
/// When the directory cannot resolve the id, `name` degrades to
/// "Unknown User" and `email` is empty instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeView {
    /// The referenced user id.
    pub user_id: i64,
    /// The resolved display name, or the placeholder.
    pub name: String,
    /// The resolved email address, or empty.
    pub email: String,
}

/// One assessment criterion as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionView {
    /// The criterion text.
    pub criteria: String,
    /// Whether the criterion has been marked complete.
    pub completed: bool,
}

/// One submission as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    /// The resolved submitter.
    pub submitted_by: AssigneeView,
    /// When the submission was recorded (RFC 3339).
    pub submission_date: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// File references, in upload order.
    pub files: Vec<String>,
}

/// A full task snapshot as exposed by the API.
///
/// `progress` and `status` are derived fresh for every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// The task id.
    pub task_id: i64,
    /// The task title.
    pub title: String,
    /// The task description.
    pub description: String,
    /// The category display string.
    pub category: String,
    /// The due date (RFC 3339).
    pub due_date: String,
    /// The time budget in hours.
    pub time_limit: u32,
    /// The priority string.
    pub priority: String,
    /// Resolved assignees.
    pub assigned_to: Vec<AssigneeView>,
    /// Assessment criteria with completion flags.
    pub assessment_criteria: Vec<CriterionView>,
    /// The submission log in chronological order.
    pub submissions: Vec<SubmissionView>,
    /// The current progress (0 to 100).
    pub progress: u8,
    /// The derived status string.
    pub status: String,
    /// When the task was created (RFC 3339).
    pub created_at: String,
    /// When the task was last mutated (RFC 3339).
    pub updated_at: String,
}

/// One audit event as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventView {
    /// The event id.
    pub event_id: i64,
    /// The acting entity's id.
    pub actor_id: String,
    /// The acting entity's type.
    pub actor_type: String,
    /// The action name.
    pub action: String,
    /// Optional action details.
    pub details: Option<String>,
    /// The state snapshot before the transition.
    pub before: String,
    /// The state snapshot after the transition.
    pub after: String,
}

/// API response for a task's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTimelineResponse {
    /// The task the timeline belongs to.
    pub task_id: i64,
    /// The ordered audit events.
    pub events: Vec<AuditEventView>,
}
