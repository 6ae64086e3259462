// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CriterionRecord, DomainError, normalize_criteria, parse_due_date, validate_time_limit,
    validate_title,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[test]
fn test_validate_title_accepts_plain_text() {
    assert!(validate_title("Landing page redesign").is_ok());
}

#[test]
fn test_validate_title_rejects_empty() {
    let result = validate_title("");
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_validate_title_rejects_whitespace_only() {
    let result = validate_title("   \t ");
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_validate_time_limit_accepts_one_hour() {
    assert_eq!(validate_time_limit(1).unwrap(), 1);
}

#[test]
fn test_validate_time_limit_rejects_zero() {
    let result = validate_time_limit(0);
    assert!(matches!(
        result,
        Err(DomainError::InvalidTimeLimit { hours: 0 })
    ));
}

#[test]
fn test_validate_time_limit_rejects_negative() {
    assert!(validate_time_limit(-3).is_err());
}

#[test]
fn test_parse_due_date_accepts_calendar_date() {
    let parsed: OffsetDateTime = parse_due_date("2026-09-15").unwrap();
    assert_eq!(parsed.format(&Rfc3339).unwrap(), "2026-09-15T00:00:00Z");
}

#[test]
fn test_parse_due_date_accepts_rfc3339() {
    let parsed: OffsetDateTime = parse_due_date("2026-09-15T17:30:00Z").unwrap();
    assert_eq!(parsed.format(&Rfc3339).unwrap(), "2026-09-15T17:30:00Z");
}

#[test]
fn test_parse_due_date_accepts_past_dates() {
    // A task may be created already overdue; only unparseable input fails.
    assert!(parse_due_date("2001-01-01").is_ok());
}

#[test]
fn test_parse_due_date_rejects_garbage() {
    let result = parse_due_date("next tuesday");
    assert!(matches!(result, Err(DomainError::InvalidDueDate { .. })));
}

#[test]
fn test_normalize_criteria_drops_blank_entries() {
    let raw: Vec<String> = vec![
        String::from("a"),
        String::new(),
        String::from("b"),
    ];
    let criteria: Vec<CriterionRecord> = normalize_criteria(&raw);

    assert_eq!(criteria.len(), 2);
    assert_eq!(criteria[0].criteria, "a");
    assert_eq!(criteria[1].criteria, "b");
}

#[test]
fn test_normalize_criteria_drops_whitespace_only_entries() {
    let raw: Vec<String> = vec![String::from("  "), String::from("\t")];
    assert!(normalize_criteria(&raw).is_empty());
}

#[test]
fn test_normalize_criteria_keeps_original_text() {
    // Surviving entries are stored verbatim, surrounding whitespace included.
    let raw: Vec<String> = vec![String::from("  responsive layout ")];
    let criteria: Vec<CriterionRecord> = normalize_criteria(&raw);

    assert_eq!(criteria.len(), 1);
    assert_eq!(criteria[0].criteria, "  responsive layout ");
    assert!(!criteria[0].completed);
}

#[test]
fn test_normalize_criteria_starts_incomplete() {
    let raw: Vec<String> = vec![String::from("a"), String::from("b")];
    assert!(normalize_criteria(&raw).iter().all(|c| !c.completed));
}
