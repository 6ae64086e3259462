// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents a user's role in the directory.
///
/// Roles are informational at the domain level. Authorization decisions
/// happen at the API boundary, never inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Coordinators create tasks and assign work.
    Coordinator,
    /// Members receive assignments and submit work.
    Member,
}

impl UserRole {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "coordinator",
            Self::Member => "member",
        }
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "coordinator" => Ok(Self::Coordinator),
            "member" => Ok(Self::Member),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user identity resolved through the user directory.
///
/// The engine never owns or mutates users. Tasks hold only user ids;
/// profiles are looked up when display data is needed, and a missing
/// profile degrades to a placeholder rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Canonical identifier assigned by the directory.
    pub user_id: i64,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: UserRole,
}

impl UserProfile {
    /// Creates a new `UserProfile`.
    #[must_use]
    pub const fn new(user_id: i64, name: String, email: String, role: UserRole) -> Self {
        Self {
            user_id,
            name,
            email,
            role,
        }
    }
}

/// A single named yes/no condition used to assess a task.
///
/// Criteria are fixed at task creation; only the `completed` flag
/// mutates afterwards. Individual criteria are never added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionRecord {
    /// The criterion text (non-blank).
    pub criteria: String,
    /// Whether the criterion has been marked complete.
    pub completed: bool,
}

impl CriterionRecord {
    /// Creates a new, not-yet-completed criterion.
    #[must_use]
    pub const fn new(criteria: String) -> Self {
        Self {
            criteria,
            completed: false,
        }
    }
}

/// One recorded delivery of work against a task.
///
/// Submissions are immutable once appended. Notes and files are both
/// optional; an empty submission is still a valid submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// The id of the submitting user.
    pub submitted_by: i64,
    /// When the submission was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub submission_date: OffsetDateTime,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// References to stored files, in upload order. Uniqueness is not
    /// required; the file store owns the bytes behind each reference.
    pub files: Vec<String>,
    /// Optional caller-supplied idempotency token. A resubmission that
    /// carries a token already present in the log is a no-op instead of
    /// a duplicate append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_token: Option<String>,
}

impl SubmissionRecord {
    /// Creates a new `SubmissionRecord` stamped with the given time.
    #[must_use]
    pub const fn new(
        submitted_by: i64,
        submission_date: OffsetDateTime,
        notes: Option<String>,
        files: Vec<String>,
        request_token: Option<String>,
    ) -> Self {
        Self {
            submitted_by,
            submission_date,
            notes,
            files,
            request_token,
        }
    }
}
