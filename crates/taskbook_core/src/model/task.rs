//! Task domain model.
//!
//! # Responsibility
//! - Define the record stored in the task collection file.
//! - Validate raw title and due-date input before a task is built.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `created_at` and `last_updated_at` are equal for a freshly created task.
//! - Two tasks are duplicates iff `title` and `due_date` match exactly.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid due date regex"));

/// Wire and parse format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Fixed priority scale.
///
/// Display labels are locale-specific and live in
/// [`crate::config::PriorityLabels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
}

/// Field-level validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Due date is empty, not `YYYY-MM-DD`, or not a calendar date.
    InvalidDueDate(String),
    /// Priority label is not one of the configured labels.
    InvalidPriority { value: String, allowed: Vec<String> },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidPriority { value, allowed } => write!(
                f,
                "invalid priority `{value}`; expected one of: {}",
                allowed.join(", ")
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Business-duplicate key of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateKey<'a> {
    pub title: &'a str,
    pub due_date: NaiveDate,
}

/// One entry of the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free text, may be empty.
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    /// Free-form status label, e.g. the configured default at creation.
    pub status: String,
    pub created_at: NaiveDateTime,
    pub last_updated_at: NaiveDateTime,
}

impl Task {
    /// Creates a task with a fresh ID and both timestamps set to `now`.
    ///
    /// Callers are expected to have validated `title` and `due_date`.
    pub fn new_at(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
        status: impl Into<String>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            due_date,
            priority,
            status: status.into(),
            created_at: now,
            last_updated_at: now,
        }
    }

    /// Returns the key used for duplicate detection: `(title, due_date)`.
    pub fn duplicate_key(&self) -> DuplicateKey<'_> {
        DuplicateKey {
            title: self.title.as_str(),
            due_date: self.due_date,
        }
    }

    /// Returns whether `other` shares this task's duplicate key.
    pub fn is_duplicate_of(&self, other: &Task) -> bool {
        self.duplicate_key() == other.duplicate_key()
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task{{id={}, title={:?}, due_date={}, priority={:?}, status={:?}}}",
            self.id,
            self.title,
            self.due_date.format(DUE_DATE_FORMAT),
            self.priority,
            self.status
        )
    }
}

/// Rejects empty and whitespace-only titles.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Zero-padding is required and surrounding whitespace is not accepted.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskValidationError> {
    if !DUE_DATE_RE.is_match(value) {
        return Err(TaskValidationError::InvalidDueDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
        .map_err(|_| TaskValidationError::InvalidDueDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, validate_title, TaskValidationError};
    use chrono::NaiveDate;

    #[test]
    fn parse_due_date_requires_zero_padding() {
        assert!(parse_due_date("2025-7-3").is_err());
        assert_eq!(
            parse_due_date("2025-07-03").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 3).unwrap()
        );
    }

    #[test]
    fn parse_due_date_rejects_impossible_dates() {
        let err = parse_due_date("2025-02-30").unwrap_err();
        assert_eq!(
            err,
            TaskValidationError::InvalidDueDate("2025-02-30".to_string())
        );
    }

    #[test]
    fn parse_due_date_rejects_surrounding_whitespace() {
        assert!(parse_due_date(" 2025-07-20").is_err());
        assert!(parse_due_date("2025-07-20\n").is_err());
    }

    #[test]
    fn validate_title_treats_unicode_whitespace_as_empty() {
        assert_eq!(
            validate_title("\u{3000}\t "),
            Err(TaskValidationError::EmptyTitle)
        );
        assert!(validate_title(" x ").is_ok());
    }
}
