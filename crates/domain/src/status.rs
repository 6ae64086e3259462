// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task status derivation.
//!
//! Status is never stored. It is a pure function of progress, the due
//! date, and the current time, recomputed on every read so it can never
//! go stale.

use crate::error::DomainError;
use crate::progress::Progress;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The derived lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// No progress yet and the due date has not passed.
    NotStarted,
    /// Some progress and the due date has not passed.
    InProgress,
    /// The due date has passed with the task still incomplete.
    Overdue,
    /// Progress reached 100, regardless of the due date.
    Completed,
}

impl TaskStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "overdue" => Ok(Self::Overdue),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the status of a task from its progress and due date.
///
/// The derivation is deterministic: the same `(progress, due_date, now)`
/// triple always yields the same status.
///
/// Completion dominates: a task at 100 is `Completed` even when the due
/// date has passed.
#[must_use]
pub const fn derive_status(
    progress: Progress,
    due_date: OffsetDateTime,
    now: OffsetDateTime,
) -> TaskStatus {
    if progress.is_complete() {
        TaskStatus::Completed
    } else if now.unix_timestamp() > due_date.unix_timestamp() {
        TaskStatus::Overdue
    } else if progress.is_zero() {
        TaskStatus::NotStarted
    } else {
        TaskStatus::InProgress
    }
}
