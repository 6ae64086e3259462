// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operation handlers.
//!
//! Each handler validates its request at the boundary, builds a core
//! command, applies it, persists the result, and returns a response DTO.
//! The current time enters the system here; the core transitions stay
//! pure.

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssigneeView, AuditEventView, AuditTimelineResponse, CreateTaskRequest, CreateTaskResponse,
    CriterionView, ListTasksRequest, ListTasksResponse, ListUsersResponse, RegisterUserRequest,
    RegisterUserResponse, SetProgressRequest, SetProgressResponse, SubmissionView,
    SubmitWorkRequest, SubmitWorkResponse, TaskResponse, ToggleCriterionRequest,
    ToggleCriterionResponse, UserView,
};
use crate::{AuthenticatedActor, Role};
use task_track::{
    Command, CreateResult, SubmissionCompletes, TransitionResult, apply, apply_create,
};
use task_track_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use task_track_domain::{
    Category, Priority, Task, UserProfile, UserRole, parse_due_date, validate_time_limit,
};
use task_track_persistence::{PersistCreateResult, Persistence, PersistenceError};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

/// Display placeholder for user ids the directory cannot resolve.
const UNKNOWN_USER: &str = "Unknown User";

/// Requires the coordinator role for a boundary-gated action.
fn require_coordinator(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
    if actor.role == Role::Coordinator {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: action.to_string(),
            required_role: String::from("coordinator"),
        })
    }
}

/// Formats a timestamp for a response DTO.
fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Resolves a user id to a display view.
///
/// A missing directory entry degrades to the "Unknown User" placeholder
/// instead of erroring; any other lookup failure is surfaced.
fn resolve_user_view(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<AssigneeView, ApiError> {
    match persistence.get_user(user_id) {
        Ok(profile) => Ok(AssigneeView {
            user_id,
            name: profile.name,
            email: profile.email,
        }),
        Err(PersistenceError::UserNotFound(_)) => Ok(AssigneeView {
            user_id,
            name: String::from(UNKNOWN_USER),
            email: String::new(),
        }),
        Err(other) => Err(translate_persistence_error(other)),
    }
}

/// Builds a full task response with freshly derived status and resolved
/// user references.
fn task_to_response(
    persistence: &mut Persistence,
    task: &Task,
    now: OffsetDateTime,
) -> Result<TaskResponse, ApiError> {
    let task_id: i64 = task.task_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Task snapshot is missing its id"),
    })?;

    let mut assigned_to: Vec<AssigneeView> = Vec::with_capacity(task.assigned_to.len());
    for user_id in &task.assigned_to {
        assigned_to.push(resolve_user_view(persistence, *user_id)?);
    }

    let mut submissions: Vec<SubmissionView> = Vec::with_capacity(task.submissions.len());
    for record in &task.submissions {
        submissions.push(SubmissionView {
            submitted_by: resolve_user_view(persistence, record.submitted_by)?,
            submission_date: format_timestamp(record.submission_date)?,
            notes: record.notes.clone(),
            files: record.files.clone(),
        });
    }

    let assessment_criteria: Vec<CriterionView> = task
        .assessment_criteria
        .iter()
        .map(|c| CriterionView {
            criteria: c.criteria.clone(),
            completed: c.completed,
        })
        .collect();

    Ok(TaskResponse {
        task_id,
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category.as_str().to_string(),
        due_date: format_timestamp(task.due_date)?,
        time_limit: task.time_limit_hours,
        priority: task.priority.as_str().to_string(),
        assigned_to,
        assessment_criteria,
        submissions,
        progress: task.progress.value(),
        status: task.status(now).as_str().to_string(),
        created_at: format_timestamp(task.created_at)?,
        updated_at: format_timestamp(task.updated_at)?,
    })
}

/// Creates a new task.
///
/// Requires the coordinator role. String inputs are parsed into domain
/// types here; malformed input is rejected before the engine is reached.
///
/// # Errors
///
/// Returns an error if the actor lacks the coordinator role, the request
/// is invalid, or persistence fails.
pub fn create_task(
    persistence: &mut Persistence,
    request: CreateTaskRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateTaskResponse, ApiError> {
    require_coordinator(actor, "create_task")?;

    let category: Category = Category::parse(&request.category).map_err(translate_domain_error)?;
    let priority: Priority = match request.priority.as_deref() {
        Some(value) => Priority::parse(value).map_err(translate_domain_error)?,
        None => Priority::default(),
    };
    let due_date: OffsetDateTime =
        parse_due_date(&request.due_date).map_err(translate_domain_error)?;
    let time_limit_hours: u32 =
        validate_time_limit(request.time_limit).map_err(translate_domain_error)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let command: Command = Command::CreateTask {
        title: request.title,
        description: request.description,
        category,
        due_date,
        time_limit_hours,
        priority,
        assigned_to: request.assigned_to,
        assessment_criteria: request.assessment_criteria,
    };

    let create_result: CreateResult =
        apply_create(command, actor.to_audit_actor(), cause, now).map_err(translate_core_error)?;

    let ids: PersistCreateResult = persistence
        .persist_create(&create_result)
        .map_err(translate_persistence_error)?;

    info!(task_id = ids.task_id, event_id = ids.event_id, "Created task");

    let stored: Task = persistence
        .get_task(ids.task_id)
        .map_err(translate_persistence_error)?;
    let task: TaskResponse = task_to_response(persistence, &stored, now)?;

    Ok(CreateTaskResponse {
        message: format!("Created task '{}'", task.title),
        event_id: ids.event_id,
        task,
    })
}

/// Retrieves one task snapshot with freshly derived status.
///
/// This operation is side-effect free and idempotent.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the task does not exist.
pub fn get_task(persistence: &mut Persistence, task_id: i64) -> Result<TaskResponse, ApiError> {
    let task: Task = persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)?;
    task_to_response(persistence, &task, OffsetDateTime::now_utc())
}

/// Lists tasks matching the optional filters.
///
/// `search` is a case-insensitive substring over title and category;
/// `category` is an exact match. Results keep stable creation order.
/// This operation never mutates state.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_tasks(
    persistence: &mut Persistence,
    request: &ListTasksRequest,
) -> Result<ListTasksResponse, ApiError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let all: Vec<Task> = persistence
        .list_tasks()
        .map_err(translate_persistence_error)?;

    let search: Option<String> = request.search.as_deref().map(str::to_lowercase);
    let mut tasks: Vec<TaskResponse> = Vec::new();
    for task in &all {
        let search_matches: bool = search.as_deref().is_none_or(|needle| {
            task.title.to_lowercase().contains(needle)
                || task.category.as_str().to_lowercase().contains(needle)
        });
        let category_matches: bool = request
            .category
            .as_deref()
            .is_none_or(|category| task.category.as_str() == category);

        if search_matches && category_matches {
            tasks.push(task_to_response(persistence, task, now)?);
        }
    }

    Ok(ListTasksResponse { tasks })
}

/// Sets one assessment criterion's completion flag.
///
/// Any authenticated actor may invoke this; access control beyond
/// authentication is an external concern.
///
/// # Errors
///
/// Returns an error if the task does not exist, the index is out of
/// range, or persistence fails.
pub fn toggle_criterion(
    persistence: &mut Persistence,
    task_id: i64,
    request: ToggleCriterionRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ToggleCriterionResponse, ApiError> {
    let task: Task = persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let command: Command = Command::ToggleCriterion {
        index: request.criteria_index,
        completed: request.completed,
    };
    let transition: TransitionResult = apply(
        &task,
        command,
        &SubmissionCompletes,
        actor.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_transition(&transition)
        .map_err(translate_persistence_error)?;

    let task: TaskResponse = task_to_response(persistence, &transition.new_task, now)?;
    Ok(ToggleCriterionResponse {
        task,
        event_id,
        message: format!(
            "Criterion {} marked {}",
            request.criteria_index,
            if request.completed { "complete" } else { "incomplete" }
        ),
    })
}

/// Records a work submission against a task.
///
/// The submitter is not required to be assigned to the task. The
/// installed progress policy decides the task-wide progress afterwards;
/// the production policy completes the task on any submission.
///
/// # Errors
///
/// Returns an error if the task does not exist or persistence fails.
pub fn submit_work(
    persistence: &mut Persistence,
    task_id: i64,
    request: SubmitWorkRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SubmitWorkResponse, ApiError> {
    let task: Task = persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let command: Command = Command::RecordSubmission {
        submitted_by: request.submitted_by,
        notes: request.notes.filter(|n| !n.is_empty()),
        files: request.files,
        request_token: request.request_token,
    };
    let transition: TransitionResult = apply(
        &task,
        command,
        &SubmissionCompletes,
        actor.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_transition(&transition)
        .map_err(translate_persistence_error)?;

    info!(
        task_id,
        event_id,
        submitted_by = request.submitted_by,
        submissions = transition.new_task.submissions.len(),
        "Recorded submission"
    );

    let task: TaskResponse = task_to_response(persistence, &transition.new_task, now)?;
    Ok(SubmitWorkResponse {
        task,
        event_id,
        message: String::from("Submission recorded"),
    })
}

/// Overrides a task's progress value.
///
/// The value is clamped to 0..=100. The acting user id is recorded for
/// audit attribution but does not scope the update per assignee.
///
/// # Errors
///
/// Returns an error if the task does not exist or persistence fails.
pub fn set_progress(
    persistence: &mut Persistence,
    task_id: i64,
    request: &SetProgressRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SetProgressResponse, ApiError> {
    let task: Task = persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let command: Command = Command::SetProgress {
        value: request.progress,
    };
    let transition: TransitionResult = apply(
        &task,
        command,
        &SubmissionCompletes,
        actor.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_transition(&transition)
        .map_err(translate_persistence_error)?;

    let task: TaskResponse = task_to_response(persistence, &transition.new_task, now)?;
    Ok(SetProgressResponse {
        message: format!("Progress set to {}", task.progress),
        task,
        event_id,
    })
}

/// Registers a new directory user.
///
/// # Errors
///
/// Returns an error if the request is invalid or persistence fails
/// (including duplicate email addresses).
pub fn register_user(
    persistence: &mut Persistence,
    request: RegisterUserRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RegisterUserResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Name cannot be empty"),
        });
    }
    if !request.email.contains('@') {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("Email must contain '@'"),
        });
    }
    let role: UserRole = UserRole::parse(&request.role).map_err(translate_domain_error)?;

    let audit_actor: Actor = actor.to_audit_actor();
    let action: Action = Action::new(
        String::from("RegisterUser"),
        Some(format!("Registered {}", request.email)),
    );
    let event: AuditEvent = AuditEvent::new(
        audit_actor,
        cause,
        action,
        StateSnapshot::new(String::from("user=none")),
        StateSnapshot::new(format!("user={}", request.email)),
        None,
    );

    let (user_id, event_id): (i64, i64) = persistence
        .persist_registration(&request.name, &request.email, role, &event)
        .map_err(translate_persistence_error)?;

    info!(user_id, event_id, "Registered directory user");

    Ok(RegisterUserResponse {
        user: UserView {
            user_id,
            name: request.name,
            email: request.email,
            role: role.as_str().to_string(),
        },
        event_id,
        message: String::from("User registered"),
    })
}

/// Lists all directory users.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_users(persistence: &mut Persistence) -> Result<ListUsersResponse, ApiError> {
    let profiles: Vec<UserProfile> = persistence
        .list_users()
        .map_err(translate_persistence_error)?;

    let users: Vec<UserView> = profiles
        .into_iter()
        .map(|p| UserView {
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            role: p.role.as_str().to_string(),
        })
        .collect();

    Ok(ListUsersResponse { users })
}

/// Retrieves the ordered audit timeline for one task.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the task does not exist.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    task_id: i64,
) -> Result<AuditTimelineResponse, ApiError> {
    // Resolve the task first so an unknown id is a not-found, not an
    // empty timeline.
    persistence
        .get_task(task_id)
        .map_err(translate_persistence_error)?;

    let events: Vec<AuditEventView> = persistence
        .get_audit_timeline(task_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter_map(|event| {
            event.event_id.map(|event_id| AuditEventView {
                event_id,
                actor_id: event.actor.id,
                actor_type: event.actor.actor_type,
                action: event.action.name,
                details: event.action.details,
                before: event.before.data,
                after: event.after.data,
            })
        })
        .collect();

    Ok(AuditTimelineResponse { task_id, events })
}
