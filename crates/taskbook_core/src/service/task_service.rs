//! Task use-case service.
//!
//! # Responsibility
//! - Validate raw add-task input (title, due date, priority).
//! - Reject tasks whose `(title, due_date)` already exists.
//! - Assign identity and timestamps, then persist the full collection.
//!
//! # Invariants
//! - Validation runs before any repository access.
//! - Every rejected add leaves the collection file untouched.
//! - At most one save happens per `add_task` call.

use crate::config::{PriorityLabels, TaskbookConfig};
use crate::model::task::{parse_due_date, validate_title, Task, TaskValidationError};
use crate::repo::task_repo::{load_tasks_best_effort, RepoError, TaskRepository};
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Source of creation timestamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone, without offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Input failed field validation.
    Validation(TaskValidationError),
    /// A task with the same title and due date already exists.
    Duplicate { title: String, due_date: NaiveDate },
    /// The stored collection is unusable, or could not be saved.
    Storage(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate { title, due_date } => write!(
                f,
                "task `{title}` already exists with due date {}",
                due_date.format("%Y-%m-%d")
            ),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Duplicate { .. } => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl TaskServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(TaskValidationError::EmptyTitle) => "empty_title",
            Self::Validation(TaskValidationError::InvalidDueDate(_)) => "invalid_due_date",
            Self::Validation(TaskValidationError::InvalidPriority { .. }) => "invalid_priority",
            Self::Duplicate { .. } => "duplicate",
            Self::Storage(_) => "storage_failed",
        }
    }
}

/// Raw add-task input as received from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    pub title: String,
    pub description: String,
    /// Expected as `YYYY-MM-DD`.
    pub due_date: String,
    /// Expected to be one of the configured priority labels.
    pub priority: String,
}

impl AddTaskRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
            priority: priority.into(),
        }
    }
}

/// Successful add, with the diagnostic of a degraded load if one happened.
#[derive(Debug)]
pub struct AddTaskOutcome {
    pub task: Task,
    /// Set when the existing collection could not be read and an empty one
    /// was used instead.
    pub load_warning: Option<RepoError>,
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    priorities: PriorityLabels,
    default_status: String,
    clock: Box<dyn Clock>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service stamping tasks with the system clock.
    pub fn new(repo: R, config: &TaskbookConfig) -> Self {
        Self::with_clock(repo, config, Box::new(SystemClock))
    }

    pub fn with_clock(repo: R, config: &TaskbookConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            repo,
            priorities: config.priorities.clone(),
            default_status: config.default_status.clone(),
            clock,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validates, de-duplicates and persists one new task.
    ///
    /// # Contract
    /// - Checks title, then due date, then priority; the first failure wins.
    /// - A missing or unreadable file, or broken JSON, degrades to an empty
    ///   collection; the load error is returned in `load_warning`.
    /// - Returns the stored task with `status` set to the configured default.
    ///
    /// # Errors
    /// - `Validation` for empty title, malformed due date or unknown priority.
    /// - `Duplicate` when `(title, due_date)` is already stored.
    /// - `Storage` when stored records cannot be converted (the file is left
    ///   untouched) or the collection cannot be saved.
    pub fn add_task(
        &self,
        request: &AddTaskRequest,
    ) -> Result<AddTaskOutcome, TaskServiceError> {
        let result = self.try_add_task(request);
        match &result {
            Ok(outcome) => info!(
                "event=task_add module=service status=ok task_id={} degraded_load={}",
                outcome.task.id,
                outcome.load_warning.is_some()
            ),
            Err(err) => warn!(
                "event=task_add module=service status=rejected error_code={}",
                err.code()
            ),
        }
        result
    }

    fn try_add_task(
        &self,
        request: &AddTaskRequest,
    ) -> Result<AddTaskOutcome, TaskServiceError> {
        validate_title(&request.title)?;
        let due_date = parse_due_date(&request.due_date)?;
        let priority = self.priorities.validate(&request.priority)?;

        let loaded = load_tasks_best_effort(&self.repo)?;
        let mut tasks = loaded.tasks;

        let now = self.clock.now();
        let candidate = Task::new_at(
            request.title.as_str(),
            request.description.as_str(),
            due_date,
            priority,
            self.default_status.as_str(),
            now,
        );
        if tasks.iter().any(|existing| existing.is_duplicate_of(&candidate)) {
            return Err(TaskServiceError::Duplicate {
                title: candidate.title,
                due_date,
            });
        }

        tasks.push(candidate.clone());
        self.repo.save_tasks(&tasks)?;
        Ok(AddTaskOutcome {
            task: candidate,
            load_warning: loaded.warning,
        })
    }
}
