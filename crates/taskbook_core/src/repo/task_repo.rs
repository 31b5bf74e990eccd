//! Task collection repository backed by a single JSON file.
//!
//! # Responsibility
//! - Load the whole collection from a JSON array on disk.
//! - Rewrite the whole file on every save.
//!
//! # Invariants
//! - Insertion order of the collection is preserved across save/load.
//! - Read paths reject invalid persisted records instead of masking them.
//! - Priorities are persisted as their configured locale label.

use crate::config::PriorityLabels;
use crate::model::task::{Task, TaskId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{error, info, warn};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for task collection load and save.
#[derive(Debug)]
pub enum RepoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "task file `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "malformed task file: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl RepoError {
    /// Returns whether the error is a missing collection file.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// Whether a failed load may fall back to an empty collection.
    ///
    /// I/O failures and JSON syntax errors qualify. Valid JSON with records
    /// of the wrong shape does not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io { .. } => true,
            Self::Json(err) => err.is_syntax() || err.is_eof(),
            Self::InvalidData(_) => false,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io_failed",
            Self::Json(_) => "malformed_json",
            Self::InvalidData(_) => "invalid_record",
        }
    }
}

/// Repository interface for the full task collection.
pub trait TaskRepository {
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Outcome of a best-effort load.
#[derive(Debug, Default)]
pub struct LoadedTasks {
    pub tasks: Vec<Task>,
    /// Recoverable load failure that was degraded to an empty collection.
    pub warning: Option<RepoError>,
}

/// Best-effort load.
///
/// A missing or unreadable file and syntactically broken JSON degrade to an
/// empty collection, returned together with the error. Well-formed JSON whose
/// records cannot be converted is returned as `Err`, so callers never save an
/// empty collection over data they could not read.
pub fn load_tasks_best_effort<R: TaskRepository + ?Sized>(repo: &R) -> RepoResult<LoadedTasks> {
    match repo.load_tasks() {
        Ok(tasks) => Ok(LoadedTasks {
            tasks,
            warning: None,
        }),
        Err(err) if err.is_recoverable() => {
            warn!(
                "event=task_load module=repo status=degraded error_code={} error={}",
                err.code(),
                err
            );
            Ok(LoadedTasks {
                tasks: Vec::new(),
                warning: Some(err),
            })
        }
        Err(err) => Err(err),
    }
}

/// On-disk shape of one task.
#[derive(Debug, Serialize, Deserialize)]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    due_date: NaiveDate,
    priority: String,
    status: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    last_updated_at: NaiveDateTime,
}

/// Reads an ISO-8601 date-time; an offset, `Z` or `[zone]` suffix is dropped
/// and the local wall-clock part is kept.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid ISO-8601 date-time `{raw}`")))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = match raw.find('[') {
        Some(zone_start) if raw.ends_with(']') => &raw[..zone_start],
        _ => raw,
    };
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|stamp| stamp.naive_local())
        })
        .or_else(|| {
            DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z")
                .ok()
                .map(|stamp| stamp.naive_local())
        })
}

/// JSON-file-backed task repository.
pub struct JsonTaskRepository {
    path: PathBuf,
    priorities: PriorityLabels,
}

impl JsonTaskRepository {
    pub fn new(path: impl Into<PathBuf>, priorities: PriorityLabels) -> Self {
        Self {
            path: path.into(),
            priorities,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn decode(&self, contents: &str) -> RepoResult<Vec<Task>> {
        let records: Vec<TaskRecord> = serde_json::from_str(contents)?;
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.record_to_task(record, index))
            .collect()
    }

    fn record_to_task(&self, record: TaskRecord, index: usize) -> RepoResult<Task> {
        let id = TaskId::parse_str(&record.id).map_err(|err| {
            RepoError::InvalidData(format!("record {index}: invalid id `{}`: {err}", record.id))
        })?;
        let priority = self.priorities.parse_stored(&record.priority).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "record {index}: unknown priority `{}`",
                record.priority
            ))
        })?;

        Ok(Task {
            id,
            title: record.title,
            description: record.description,
            due_date: record.due_date,
            priority,
            status: record.status,
            created_at: record.created_at,
            last_updated_at: record.last_updated_at,
        })
    }

    fn task_to_record(&self, task: &Task) -> TaskRecord {
        TaskRecord {
            id: task.id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: self.priorities.label(task.priority).to_string(),
            status: task.status.clone(),
            created_at: task.created_at,
            last_updated_at: task.last_updated_at,
        }
    }
}

impl TaskRepository for JsonTaskRepository {
    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let started_at = Instant::now();
        let loaded = std::fs::read_to_string(&self.path)
            .map_err(|err| self.io_error(err))
            .and_then(|contents| self.decode(&contents));

        match &loaded {
            Ok(tasks) => info!(
                "event=task_load module=repo status=ok count={} duration_ms={}",
                tasks.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) if err.is_missing_file() => info!(
                "event=task_load module=repo status=missing path={}",
                self.path.display()
            ),
            Err(err) => error!(
                "event=task_load module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        loaded
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let started_at = Instant::now();
        let records: Vec<TaskRecord> = tasks.iter().map(|task| self.task_to_record(task)).collect();
        let saved = serde_json::to_string_pretty(&records)
            .map_err(RepoError::from)
            .and_then(|json| std::fs::write(&self.path, json).map_err(|err| self.io_error(err)));

        match &saved {
            Ok(()) => info!(
                "event=task_save module=repo status=ok count={} duration_ms={}",
                tasks.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=task_save module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::{load_tasks_best_effort, parse_timestamp, JsonTaskRepository, RepoError};
    use crate::config::PriorityLabels;
    use crate::model::task::Priority;
    use chrono::NaiveDate;

    fn record_json(priority: &str, created_at: &str) -> String {
        format!(
            r#"[{{
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "t",
            "description": "",
            "due_date": "2025-07-20",
            "priority": "{priority}",
            "status": "open",
            "created_at": "{created_at}",
            "last_updated_at": "2025-07-01T08:00:00"
        }}]"#
        )
    }

    #[test]
    fn decode_rejects_unknown_priority_label() {
        let repo = JsonTaskRepository::new("unused.json", PriorityLabels::english());
        let err = repo
            .decode(&record_json("Rất Cao", "2025-07-01T08:00:00"))
            .unwrap_err();
        assert!(
            matches!(err, RepoError::InvalidData(ref message) if message.contains("Rất Cao"))
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn decode_accepts_labels_of_other_builtin_locale() {
        let repo = JsonTaskRepository::new("unused.json", PriorityLabels::english());
        let tasks = repo
            .decode(&record_json("Cao", "2025-07-01T08:00:00"))
            .unwrap();
        assert_eq!(tasks[0].priority, Priority::High);
    }

    #[test]
    fn decode_drops_timestamp_offset() {
        let repo = JsonTaskRepository::new("unused.json", PriorityLabels::default());
        let tasks = repo
            .decode(&record_json("Cao", "2025-07-01T08:00:00+07:00"))
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(tasks[0].created_at, expected);
    }

    #[test]
    fn parse_timestamp_accepts_java_iso_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_milli_opt(8, 0, 0, 500)
            .unwrap();
        assert_eq!(parse_timestamp("2025-07-01T08:00:00.5"), Some(expected));
        assert_eq!(parse_timestamp("2025-07-01T08:00:00.5Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-07-01T08:00:00.500+07:00[Asia/Ho_Chi_Minh]"),
            Some(expected)
        );
        assert!(parse_timestamp("2025-07-01T08:00").is_some());
        assert!(parse_timestamp("2025-07-01").is_none());
    }

    #[test]
    fn syntax_errors_are_recoverable_but_shape_errors_are_not() {
        let repo = JsonTaskRepository::new("unused.json", PriorityLabels::default());

        let syntax = repo.decode("[{not json").unwrap_err();
        assert!(matches!(syntax, RepoError::Json(_)));
        assert!(syntax.is_recoverable());

        let shape = repo.decode(r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(shape, RepoError::Json(_)));
        assert!(!shape.is_recoverable());
    }

    #[test]
    fn best_effort_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo =
            JsonTaskRepository::new(dir.path().join("tasks.json"), PriorityLabels::default());

        let loaded = load_tasks_best_effort(&repo).unwrap();
        assert!(loaded.tasks.is_empty());
        assert!(loaded.warning.unwrap().is_missing_file());
    }
}
