// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Task title is empty or invalid.
    InvalidTitle(String),
    /// Category is not one of the fixed category set.
    InvalidCategory(String),
    /// Due date could not be parsed.
    InvalidDueDate {
        /// The raw due date input.
        value: String,
        /// The parsing error message.
        reason: String,
    },
    /// Time limit is not a positive number of hours.
    InvalidTimeLimit {
        /// The invalid time limit value.
        hours: i64,
    },
    /// Priority is not one of low, medium, or high.
    InvalidPriority(String),
    /// Status string is not a recognized task status.
    InvalidStatus {
        /// The invalid status string.
        status: String,
    },
    /// User role string is not a recognized role.
    InvalidRole(String),
    /// Assessment criterion index is outside the criteria list.
    CriterionIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of criteria on the task.
        len: usize,
    },
    /// Task does not exist.
    TaskNotFound(i64),
    /// User does not exist in the directory.
    UserNotFound(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidCategory(category) => {
                write!(f, "Unknown category: '{category}'")
            }
            Self::InvalidDueDate { value, reason } => {
                write!(f, "Failed to parse due date '{value}': {reason}")
            }
            Self::InvalidTimeLimit { hours } => {
                write!(f, "Invalid time limit: {hours}. Must be at least 1 hour")
            }
            Self::InvalidPriority(priority) => {
                write!(f, "Unknown priority: '{priority}'")
            }
            Self::InvalidStatus { status } => {
                write!(f, "Unknown task status: '{status}'")
            }
            Self::InvalidRole(role) => write!(f, "Unknown user role: '{role}'"),
            Self::CriterionIndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Criterion index {index} is out of range for a task with {len} criteria"
                )
            }
            Self::TaskNotFound(task_id) => write!(f, "Task {task_id} not found"),
            Self::UserNotFound(user_id) => write!(f, "User {user_id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
