// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::category::Category;
use crate::error::DomainError;
use crate::priority::Priority;
use crate::progress::Progress;
use crate::status::{TaskStatus, derive_status};
use crate::types::{CriterionRecord, SubmissionRecord};
use time::OffsetDateTime;

/// The unit of assignable work; the aggregate root of the engine.
///
/// A task exclusively owns its criteria and submission sequences. Users
/// are referenced by id only and resolved through the directory when
/// display data is needed.
///
/// `task_id` is the canonical identifier assigned by the persistence
/// layer. `None` indicates the task has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Canonical identifier, assigned on first save.
    pub task_id: Option<i64>,
    /// The task title (non-empty).
    pub title: String,
    /// The task description.
    pub description: String,
    /// The task category.
    pub category: Category,
    /// When the task is due.
    pub due_date: OffsetDateTime,
    /// The time budget for the task, in hours (at least 1).
    pub time_limit_hours: u32,
    /// The task priority.
    pub priority: Priority,
    /// Ids of the users assigned to this task. May be empty; ids are not
    /// validated against the directory at creation time.
    pub assigned_to: Vec<i64>,
    /// Assessment criteria, fixed length after creation.
    pub assessment_criteria: Vec<CriterionRecord>,
    /// Work submissions in chronological (insertion) order. Append-only.
    pub submissions: Vec<SubmissionRecord>,
    /// The last explicitly set progress value.
    pub progress: Progress,
    /// When the task was created.
    pub created_at: OffsetDateTime,
    /// When the task was last mutated.
    pub updated_at: OffsetDateTime,
}

impl Task {
    /// Creates a new, not-yet-persisted `Task`.
    ///
    /// The task starts at zero progress with an empty submission log.
    /// Criteria must already be normalized (blank entries dropped).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        title: String,
        description: String,
        category: Category,
        due_date: OffsetDateTime,
        time_limit_hours: u32,
        priority: Priority,
        assigned_to: Vec<i64>,
        assessment_criteria: Vec<CriterionRecord>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            task_id: None,
            title,
            description,
            category,
            due_date,
            time_limit_hours,
            priority,
            assigned_to,
            assessment_criteria,
            submissions: Vec::new(),
            progress: Progress::ZERO,
            created_at,
            updated_at: created_at,
        }
    }

    /// Creates a `Task` with an existing `task_id` (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        task_id: i64,
        title: String,
        description: String,
        category: Category,
        due_date: OffsetDateTime,
        time_limit_hours: u32,
        priority: Priority,
        assigned_to: Vec<i64>,
        assessment_criteria: Vec<CriterionRecord>,
        submissions: Vec<SubmissionRecord>,
        progress: Progress,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            task_id: Some(task_id),
            title,
            description,
            category,
            due_date,
            time_limit_hours,
            priority,
            assigned_to,
            assessment_criteria,
            submissions,
            progress,
            created_at,
            updated_at,
        }
    }

    /// Derives the current status of this task.
    ///
    /// Status is a pure function of progress, the due date, and `now`.
    /// It is recomputed on every read and never cached.
    #[must_use]
    pub const fn status(&self, now: OffsetDateTime) -> TaskStatus {
        derive_status(self.progress, self.due_date, now)
    }

    /// Sets the completion flag of one assessment criterion.
    ///
    /// Setting a flag to its current value is a valid, idempotent
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CriterionIndexOutOfRange` if `index` is not
    /// within the criteria list.
    pub fn set_criterion(&mut self, index: usize, completed: bool) -> Result<(), DomainError> {
        let len: usize = self.assessment_criteria.len();
        match self.assessment_criteria.get_mut(index) {
            Some(criterion) => {
                criterion.completed = completed;
                Ok(())
            }
            None => Err(DomainError::CriterionIndexOutOfRange { index, len }),
        }
    }

    /// Appends a submission to the log.
    ///
    /// The log only grows; there is no removal or reorder operation.
    pub fn push_submission(&mut self, record: SubmissionRecord) {
        self.submissions.push(record);
    }

    /// Returns whether any existing submission carries the given
    /// idempotency token.
    #[must_use]
    pub fn has_submission_token(&self, token: &str) -> bool {
        self.submissions
            .iter()
            .any(|s| s.request_token.as_deref() == Some(token))
    }

    /// Overwrites the stored progress value.
    pub const fn set_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    /// Records a mutation time.
    pub const fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    /// Returns the fraction of completed criteria as 0..=100, or `None`
    /// when the task has no criteria.
    #[must_use]
    pub fn completed_criteria_ratio(&self) -> Option<Progress> {
        if self.assessment_criteria.is_empty() {
            return None;
        }
        let completed: usize = self
            .assessment_criteria
            .iter()
            .filter(|c| c.completed)
            .count();
        let percent: usize = completed * 100 / self.assessment_criteria.len();
        #[allow(clippy::cast_possible_wrap)]
        let percent: i64 = percent as i64;
        Some(Progress::clamped(percent))
    }
}
