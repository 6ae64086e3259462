// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::CriterionRecord;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Calendar-date format accepted for due dates (`YYYY-MM-DD`).
const CALENDAR_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validates that a task title is non-empty after trimming.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is empty or
/// whitespace-only.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a time limit and narrows it to hours.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeLimit` if the value is below 1 or
/// does not fit a `u32`.
pub fn validate_time_limit(hours: i64) -> Result<u32, DomainError> {
    if hours < 1 {
        return Err(DomainError::InvalidTimeLimit { hours });
    }
    u32::try_from(hours).map_err(|_| DomainError::InvalidTimeLimit { hours })
}

/// Parses a due date from its wire representation.
///
/// Accepts a full RFC 3339 timestamp or a bare calendar date
/// (`YYYY-MM-DD`, taken as midnight UTC). Past dates are accepted; a
/// task created past its due date is simply born overdue.
///
/// # Errors
///
/// Returns `DomainError::InvalidDueDate` if the value parses as neither
/// form.
pub fn parse_due_date(value: &str) -> Result<OffsetDateTime, DomainError> {
    if let Ok(timestamp) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(timestamp);
    }
    match Date::parse(value, CALENDAR_DATE) {
        Ok(date) => Ok(date.midnight().assume_utc()),
        Err(e) => Err(DomainError::InvalidDueDate {
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Builds the criteria list for a new task from raw caller input.
///
/// Entries that are empty or whitespace after trimming are discarded;
/// surviving entries keep their original text. An all-blank input yields
/// a task with zero criteria, which is valid.
#[must_use]
pub fn normalize_criteria(raw: &[String]) -> Vec<CriterionRecord> {
    raw.iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| CriterionRecord::new(entry.clone()))
        .collect()
}
