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

mod error;
mod file_store;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use task_track_audit::Actor;

pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use file_store::{FileStore, FileStoreError};
pub use handlers::{
    create_task, get_audit_timeline, get_task, list_tasks, list_users, register_user, set_progress,
    submit_work, toggle_criterion,
};
pub use request_response::{
    AssigneeView, AuditEventView, AuditTimelineResponse, CreateTaskRequest, CreateTaskResponse,
    CriterionView, ListTasksRequest, ListTasksResponse, ListUsersResponse, RegisterUserRequest,
    RegisterUserResponse, SetProgressRequest, SetProgressResponse, SubmissionView,
    SubmitWorkRequest, SubmitWorkResponse, TaskResponse, ToggleCriterionRequest,
    ToggleCriterionResponse, UserView,
};

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Only task creation is role-gated: criteria toggling, submissions, and
/// progress overrides are deliberately open to any authenticated actor,
/// matching the permissiveness of the system this engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Coordinator role: creates tasks, assigns work, and registers
    /// directory users.
    Coordinator,
    /// Member role: receives assignments and submits work.
    Member,
}

/// An authenticated actor with an associated role.
///
/// This represents a caller who has been authenticated and has
/// permission to perform certain actions based on their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated caller.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Coordinator => String::from("coordinator"),
            Role::Member => String::from("member"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Stub authentication function.
///
/// This is a minimal placeholder. It does NOT implement real
/// authentication; session issuance and credential checks belong to an
/// external collaborator.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Returns
///
/// An authenticated actor if successful.
///
/// # Errors
///
/// Returns an error if authentication fails.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
