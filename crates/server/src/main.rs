// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod file_store;
mod locks;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use task_track_api::{
    ApiError, AuditTimelineResponse, AuthenticatedActor, CreateTaskRequest, CreateTaskResponse,
    FileStore, ListTasksRequest, ListTasksResponse, ListUsersResponse, RegisterUserRequest,
    RegisterUserResponse, Role, SetProgressRequest, SetProgressResponse, SubmitWorkRequest,
    SubmitWorkResponse, TaskResponse, ToggleCriterionRequest, ToggleCriterionResponse,
    authenticate_stub, create_task, get_audit_timeline, get_task, list_tasks, list_users,
    register_user, set_progress, submit_work, toggle_criterion,
};
use task_track_audit::Cause;
use task_track_persistence::Persistence;

use file_store::DiskFileStore;
use locks::TaskLocks;

/// TaskTrack Server - HTTP server for the TaskTrack assignment tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory for uploaded submission files
    #[arg(short, long, default_value = "uploads")]
    uploads_dir: String,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a mutex; the per-task lock registry
/// serializes mutations per task id on top of it.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for tasks, users, and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// Per-task mutual exclusion for mutating operations.
    task_locks: TaskLocks,
    /// Storage collaborator for uploaded submission files.
    file_store: Arc<DiskFileStore>,
}

/// An HTTP-facing error with a status code and message.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

/// JSON body for error responses.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorBody> = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::DomainRuleViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses an actor role string.
fn parse_role(role: &str) -> Result<Role, HttpError> {
    match role {
        "coordinator" => Ok(Role::Coordinator),
        "member" => Ok(Role::Member),
        other => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Unknown actor role: '{other}'"),
        }),
    }
}

/// Authenticates the stub actor identity carried in a request body.
fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(actor_role)?;
    authenticate_stub(actor_id.to_string(), role).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Builds a request cause from optional envelope fields.
fn build_cause(cause_id: Option<String>, cause_description: Option<String>) -> Cause {
    Cause::new(
        cause_id.unwrap_or_else(|| String::from("http")),
        cause_description.unwrap_or_else(|| String::from("HTTP request")),
    )
}

/// API request for creating a task.
///
/// This includes stub authentication information in addition to the
/// task data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    #[serde(default)]
    cause_id: Option<String>,
    /// The cause description.
    #[serde(default)]
    cause_description: Option<String>,
    /// The task title.
    title: String,
    /// The task description.
    #[serde(default)]
    description: String,
    /// The category display string.
    category: String,
    /// The due date: RFC 3339 or `YYYY-MM-DD`.
    due_date: String,
    /// The time budget in hours.
    time_limit: i64,
    /// The priority (defaults to medium).
    #[serde(default)]
    priority: Option<String>,
    /// Ids of the assigned users.
    #[serde(default)]
    assigned_to: Vec<i64>,
    /// Raw assessment criteria.
    #[serde(default)]
    assessment_criteria: Vec<String>,
}

/// API request for toggling an assessment criterion.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleCriterionApiRequest {
    /// The zero-based criterion index.
    criteria_index: usize,
    /// The new completion flag.
    completed: bool,
    /// The actor ID performing this action.
    #[serde(default)]
    actor_id: Option<String>,
    /// The role of the actor.
    #[serde(default)]
    actor_role: Option<String>,
}

/// API request for overriding task progress.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetProgressApiRequest {
    /// The acting user id. Recorded for attribution; the update is
    /// task-wide.
    user_id: i64,
    /// The requested progress value (clamped to 0..=100).
    progress: i64,
}

/// API request for registering a directory user.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterUserApiRequest {
    /// The user's display name.
    name: String,
    /// The user's email address.
    email: String,
    /// The user's role.
    role: String,
}

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
struct ListTasksQuery {
    /// Case-insensitive substring over title and category.
    search: Option<String>,
    /// Exact category display string.
    category: Option<String>,
}

/// Query parameters for the audit timeline endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditTimelineQuery {
    /// The task whose timeline is requested.
    task_id: i64,
}

/// Handler for POST `/tasks` endpoint.
///
/// Creates a new task. Requires the coordinator role.
async fn handle_create_task(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTaskApiRequest>,
) -> Result<Json<CreateTaskResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        title = %req.title,
        "Handling create_task request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = build_cause(req.cause_id, req.cause_description);

    let request: CreateTaskRequest = CreateTaskRequest {
        title: req.title,
        description: req.description,
        category: req.category,
        due_date: req.due_date,
        time_limit: req.time_limit,
        priority: req.priority,
        assigned_to: req.assigned_to,
        assessment_criteria: req.assessment_criteria,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateTaskResponse = create_task(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(task_id = response.task.task_id, "Successfully created task");
    Ok(Json(response))
}

/// Handler for GET `/tasks` endpoint.
///
/// Lists tasks matching the optional `search` and `category` filters.
async fn handle_list_tasks(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<ListTasksResponse>, HttpError> {
    let request: ListTasksRequest = ListTasksRequest {
        search: query.search,
        category: query.category,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListTasksResponse = list_tasks(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/tasks/{task_id}` endpoint.
///
/// Returns one task snapshot with freshly derived status.
async fn handle_get_task(
    AxumState(app_state): AxumState<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: TaskResponse = get_task(&mut persistence, task_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/tasks/{task_id}/assessment` endpoint.
///
/// Sets one assessment criterion's completion flag.
async fn handle_toggle_criterion(
    AxumState(app_state): AxumState<AppState>,
    Path(task_id): Path<i64>,
    Json(req): Json<ToggleCriterionApiRequest>,
) -> Result<Json<ToggleCriterionResponse>, HttpError> {
    info!(
        task_id,
        criteria_index = req.criteria_index,
        completed = req.completed,
        "Handling toggle_criterion request"
    );

    let actor_id: String = req.actor_id.unwrap_or_else(|| String::from("anonymous"));
    let actor_role: String = req.actor_role.unwrap_or_else(|| String::from("member"));
    let actor: AuthenticatedActor = authenticate(&actor_id, &actor_role)?;
    let cause: Cause = build_cause(None, None);

    let request: ToggleCriterionRequest = ToggleCriterionRequest {
        criteria_index: req.criteria_index,
        completed: req.completed,
    };

    // Serialize mutations per task id.
    let _task_guard = app_state.task_locks.acquire(task_id).await;
    let mut persistence = app_state.persistence.lock().await;
    let response: ToggleCriterionResponse =
        toggle_criterion(&mut persistence, task_id, request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/tasks/{task_id}/submit` endpoint.
///
/// Accepts a multipart body: a `submittedBy` part (required), optional
/// `notes` and `requestToken` parts, and zero or more `files` parts.
/// File bytes go to the file store; only their references reach the
/// engine.
async fn handle_submit_task(
    AxumState(app_state): AxumState<AppState>,
    Path(task_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<SubmitWorkResponse>, HttpError> {
    let mut submitted_by: Option<i64> = None;
    let mut notes: Option<String> = None;
    let mut request_token: Option<String> = None;
    let mut files: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Malformed multipart body: {e}"),
    })? {
        let name: String = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "submittedBy" => {
                let text: String = field.text().await.map_err(|e| HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Malformed submittedBy part: {e}"),
                })?;
                submitted_by = Some(text.trim().parse::<i64>().map_err(|_| HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("submittedBy must be a user id, got '{text}'"),
                })?);
            }
            "notes" => {
                notes = Some(field.text().await.map_err(|e| HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Malformed notes part: {e}"),
                })?);
            }
            "requestToken" => {
                request_token = Some(field.text().await.map_err(|e| HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Malformed requestToken part: {e}"),
                })?);
            }
            "files" => {
                let file_name: String = field.file_name().unwrap_or("upload.bin").to_string();
                let bytes = field.bytes().await.map_err(|e| HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Malformed file part: {e}"),
                })?;
                let reference: String = app_state
                    .file_store
                    .store(task_id, &file_name, &bytes)
                    .map_err(|e| HttpError {
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                        message: e.to_string(),
                    })?;
                files.push(reference);
            }
            _ => {}
        }
    }

    let submitted_by: i64 = submitted_by.ok_or_else(|| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: String::from("submittedBy part is required"),
    })?;

    info!(
        task_id,
        submitted_by,
        files = files.len(),
        "Handling submit request"
    );

    let actor: AuthenticatedActor =
        AuthenticatedActor::new(submitted_by.to_string(), Role::Member);
    let cause: Cause = build_cause(request_token.clone(), None);

    let request: SubmitWorkRequest = SubmitWorkRequest {
        submitted_by,
        notes,
        files,
        request_token,
    };

    // Serialize mutations per task id so concurrent submissions cannot
    // lose an append or write stale progress.
    let _task_guard = app_state.task_locks.acquire(task_id).await;
    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitWorkResponse =
        submit_work(&mut persistence, task_id, request, &actor, cause)?;
    drop(persistence);

    info!(
        task_id,
        event_id = response.event_id,
        "Successfully recorded submission"
    );
    Ok(Json(response))
}

/// Handler for PATCH `/tasks/{task_id}/progress` endpoint.
///
/// Overrides the task's progress. The `userId` in the body is recorded
/// as the acting user but does not scope the update.
async fn handle_set_progress(
    AxumState(app_state): AxumState<AppState>,
    Path(task_id): Path<i64>,
    Json(req): Json<SetProgressApiRequest>,
) -> Result<Json<SetProgressResponse>, HttpError> {
    info!(
        task_id,
        user_id = req.user_id,
        progress = req.progress,
        "Handling set_progress request"
    );

    let actor: AuthenticatedActor = AuthenticatedActor::new(req.user_id.to_string(), Role::Member);
    let cause: Cause = build_cause(None, None);

    let request: SetProgressRequest = SetProgressRequest {
        user_id: req.user_id,
        progress: req.progress,
    };

    // Serialize mutations per task id.
    let _task_guard = app_state.task_locks.acquire(task_id).await;
    let mut persistence = app_state.persistence.lock().await;
    let response: SetProgressResponse =
        set_progress(&mut persistence, task_id, &request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/users` endpoint.
///
/// Registers a directory user.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterUserApiRequest>,
) -> Result<Json<RegisterUserResponse>, HttpError> {
    info!(email = %req.email, "Handling register_user request");

    let actor: AuthenticatedActor =
        AuthenticatedActor::new(String::from("registration"), Role::Member);
    let cause: Cause = build_cause(None, Some(String::from("Directory registration")));

    let request: RegisterUserRequest = RegisterUserRequest {
        name: req.name,
        email: req.email,
        role: req.role,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterUserResponse =
        register_user(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/users` endpoint.
///
/// Lists all directory users.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_users(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/timeline` endpoint.
///
/// Returns the ordered audit timeline for one task.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AuditTimelineQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTimelineResponse = get_audit_timeline(&mut persistence, query.task_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tasks", post(handle_create_task))
        .route("/tasks", get(handle_list_tasks))
        .route("/tasks/{task_id}", get(handle_get_task))
        .route("/tasks/{task_id}/assessment", patch(handle_toggle_criterion))
        .route("/tasks/{task_id}/submit", post(handle_submit_task))
        .route("/tasks/{task_id}/progress", patch(handle_set_progress))
        .route("/users", post(handle_register_user))
        .route("/users", get(handle_list_users))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing TaskTrack Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        task_locks: TaskLocks::new(),
        file_store: Arc::new(DiskFileStore::new(&args.uploads_dir)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
