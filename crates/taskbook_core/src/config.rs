//! Explicit runtime configuration for the task store and service.
//!
//! # Responsibility
//! - Carry the collection file path and priority locale into constructors.
//! - Provide defaults matching the shipped Vietnamese locale.
//!
//! # Invariants
//! - Priority labels are non-empty and pairwise distinct.
//! - Label matching is exact and case-sensitive.

use crate::model::task::{Priority, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Default collection file, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "tasks_database.json";
/// Status assigned to newly created tasks ("Not completed").
pub const DEFAULT_STATUS: &str = "Chưa hoàn thành";

const VIETNAMESE_LABELS: [&str; 3] = ["Thấp", "Trung bình", "Cao"];
const ENGLISH_LABELS: [&str; 3] = ["Low", "Medium", "High"];

/// Rejected priority label sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPriorityLabel(Priority),
    DuplicatePriorityLabel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPriorityLabel(priority) => {
                write!(f, "priority label for {priority:?} must not be empty")
            }
            Self::DuplicatePriorityLabel(label) => {
                write!(f, "priority label `{label}` is used more than once")
            }
        }
    }
}

impl Error for ConfigError {}

/// Locale labels for the fixed priority scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityLabels {
    low: String,
    medium: String,
    high: String,
}

impl PriorityLabels {
    /// Builds a label set, rejecting empty or repeated labels.
    pub fn new(
        low: impl Into<String>,
        medium: impl Into<String>,
        high: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let labels = Self {
            low: low.into(),
            medium: medium.into(),
            high: high.into(),
        };
        for priority in Priority::ALL {
            let label = labels.label(priority);
            if label.is_empty() {
                return Err(ConfigError::EmptyPriorityLabel(priority));
            }
            if labels.parse(label) != Some(priority) {
                return Err(ConfigError::DuplicatePriorityLabel(label.to_string()));
            }
        }
        Ok(labels)
    }

    /// `Thấp` / `Trung bình` / `Cao`.
    pub fn vietnamese() -> Self {
        Self::builtin(VIETNAMESE_LABELS)
    }

    /// `Low` / `Medium` / `High`.
    pub fn english() -> Self {
        Self::builtin(ENGLISH_LABELS)
    }

    /// Every shipped locale, Vietnamese first.
    pub fn builtin_locales() -> [Self; 2] {
        [Self::vietnamese(), Self::english()]
    }

    // Built-in sets are covered by `builtin_locales_pass_new_validation`.
    fn builtin([low, medium, high]: [&str; 3]) -> Self {
        Self {
            low: low.to_string(),
            medium: medium.to_string(),
            high: high.to_string(),
        }
    }

    pub fn label(&self, priority: Priority) -> &str {
        match priority {
            Priority::Low => &self.low,
            Priority::Medium => &self.medium,
            Priority::High => &self.high,
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(&self, label: &str) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .find(|priority| self.label(*priority) == label)
    }

    /// Lookup for persisted labels: this set first, then every built-in
    /// locale, so a store written under another locale still loads.
    pub fn parse_stored(&self, label: &str) -> Option<Priority> {
        self.parse(label).or_else(|| {
            Self::builtin_locales()
                .iter()
                .find_map(|locale| locale.parse(label))
        })
    }

    /// Like [`PriorityLabels::parse`], but returns a validation error listing
    /// the accepted labels.
    pub fn validate(&self, label: &str) -> Result<Priority, TaskValidationError> {
        self.parse(label)
            .ok_or_else(|| TaskValidationError::InvalidPriority {
                value: label.to_string(),
                allowed: self.labels(),
            })
    }

    /// Labels in ascending priority order.
    pub fn labels(&self) -> Vec<String> {
        Priority::ALL
            .into_iter()
            .map(|priority| self.label(priority).to_string())
            .collect()
    }
}

impl Default for PriorityLabels {
    fn default() -> Self {
        Self::vietnamese()
    }
}

/// Configuration shared by the store and the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbookConfig {
    /// Collection file; relative paths resolve against the working directory.
    pub store_path: PathBuf,
    pub priorities: PriorityLabels,
    /// Status assigned at creation.
    pub default_status: String,
}

impl TaskbookConfig {
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_priorities(mut self, priorities: PriorityLabels) -> Self {
        self.priorities = priorities;
        self
    }

    pub fn with_default_status(mut self, status: impl Into<String>) -> Self {
        self.default_status = status.into();
        self
    }
}

impl Default for TaskbookConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            priorities: PriorityLabels::default(),
            default_status: DEFAULT_STATUS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PriorityLabels, TaskbookConfig};
    use crate::model::task::{Priority, TaskValidationError};
    use std::path::PathBuf;

    #[test]
    fn vietnamese_labels_parse_exactly() {
        let labels = PriorityLabels::vietnamese();
        assert_eq!(labels.parse("Cao"), Some(Priority::High));
        assert_eq!(labels.parse("Trung bình"), Some(Priority::Medium));
        assert_eq!(labels.parse("cao"), None);
        assert_eq!(labels.parse("Rất Cao"), None);
    }

    #[test]
    fn builtin_locales_pass_new_validation() {
        for locale in PriorityLabels::builtin_locales() {
            let [low, medium, high] =
                Priority::ALL.map(|priority| locale.label(priority).to_string());
            assert_eq!(PriorityLabels::new(low, medium, high).unwrap(), locale);
        }
    }

    #[test]
    fn parse_stored_falls_back_to_other_locales() {
        let labels = PriorityLabels::vietnamese();
        assert_eq!(labels.parse("High"), None);
        assert_eq!(labels.parse_stored("High"), Some(Priority::High));
        assert_eq!(labels.parse_stored("Thấp"), Some(Priority::Low));
        assert_eq!(labels.parse_stored("Urgent"), None);

        let custom = PriorityLabels::new("p3", "p2", "p1").unwrap();
        assert_eq!(custom.parse_stored("p1"), Some(Priority::High));
        assert_eq!(custom.parse_stored("Trung bình"), Some(Priority::Medium));
    }

    #[test]
    fn validate_lists_allowed_labels() {
        let err = PriorityLabels::english().validate("Urgent").unwrap_err();
        assert_eq!(
            err,
            TaskValidationError::InvalidPriority {
                value: "Urgent".to_string(),
                allowed: vec!["Low".into(), "Medium".into(), "High".into()],
            }
        );
    }

    #[test]
    fn new_rejects_duplicate_and_empty_labels() {
        assert_eq!(
            PriorityLabels::new("a", "a", "b").unwrap_err(),
            ConfigError::DuplicatePriorityLabel("a".to_string())
        );
        assert_eq!(
            PriorityLabels::new("", "m", "h").unwrap_err(),
            ConfigError::EmptyPriorityLabel(Priority::Low)
        );
        assert!(PriorityLabels::new("l", "m", "h").is_ok());
    }

    #[test]
    fn default_config_uses_fixed_file_name() {
        let config = TaskbookConfig::default();
        assert_eq!(config.store_path, PathBuf::from("tasks_database.json"));
        assert_eq!(config.default_status, "Chưa hoàn thành");

        let config = config.with_store_path("/tmp/other.json");
        assert_eq!(config.store_path, PathBuf::from("/tmp/other.json"));
    }
}
