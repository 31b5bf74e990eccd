//! Core domain logic for taskbook.
//! This crate owns task validation, duplicate rules, and persistence.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{
    ConfigError, PriorityLabels, TaskbookConfig, DEFAULT_STATUS, DEFAULT_STORE_FILE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    parse_due_date, validate_title, DuplicateKey, Priority, Task, TaskId, TaskValidationError,
};
pub use repo::task_repo::{
    load_tasks_best_effort, JsonTaskRepository, LoadedTasks, RepoError, RepoResult,
    TaskRepository,
};
pub use service::task_service::{
    AddTaskOutcome, AddTaskRequest, Clock, SystemClock, TaskService, TaskServiceError,
};

/// Builds a JSON-file-backed service from configuration.
pub fn open_task_service(config: &TaskbookConfig) -> TaskService<JsonTaskRepository> {
    let repo = JsonTaskRepository::new(config.store_path.clone(), config.priorities.clone());
    TaskService::new(repo, config)
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
