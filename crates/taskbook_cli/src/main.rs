//! Binary entrypoint for the `taskbook` CLI.
//!
//! # Responsibility
//! - Map command-line flags onto `TaskbookConfig`.
//! - Present service results; business rules stay in `taskbook_core`.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;
use taskbook_core::{
    default_log_level, init_logging, open_task_service, AddTaskOutcome, AddTaskRequest,
    JsonTaskRepository, Priority, TaskService, TaskbookConfig,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.global.log_dir.as_deref() {
        let level = cli
            .global
            .log_level
            .as_deref()
            .unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    let config = cli.global.to_config();
    match cli.command {
        Command::Add {
            title,
            description,
            due,
            priority,
        } => add(
            &config,
            &AddTaskRequest::new(title, description, due, priority),
        ),
        Command::Demo => {
            demo(&open_task_service(&config), &config);
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("taskbook {}", taskbook_core::core_version());
            ExitCode::SUCCESS
        }
    }
}

fn add(config: &TaskbookConfig, request: &AddTaskRequest) -> ExitCode {
    let service = open_task_service(config);
    match service.add_task(request) {
        Ok(outcome) => {
            report_load_warning(&outcome);
            println!("added {}", outcome.task.id);
            println!("{}", outcome.task);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn report_load_warning(outcome: &AddTaskOutcome) {
    if let Some(warning) = &outcome.load_warning {
        eprintln!("warning: started from an empty task list: {warning}");
    }
}

fn demo(service: &TaskService<JsonTaskRepository>, config: &TaskbookConfig) {
    let [low, medium, high] =
        Priority::ALL.map(|priority| config.priorities.label(priority).to_string());

    let steps = [
        (
            "add valid task",
            AddTaskRequest::new(
                "Mua sách",
                "Sách Công nghệ phần mềm.",
                "2025-07-20",
                high.as_str(),
            ),
        ),
        (
            "add duplicate task",
            AddTaskRequest::new(
                "Mua sách",
                "Sách Công nghệ phần mềm.",
                "2025-07-20",
                high.as_str(),
            ),
        ),
        (
            "add task with empty title",
            AddTaskRequest::new("", "Nhiệm vụ không có tiêu đề.", "2025-07-22", low.as_str()),
        ),
        (
            "add task with malformed due date",
            AddTaskRequest::new(
                "Kiểm tra báo cáo",
                "Kiểm tra lỗi chính tả.",
                "2025/07/23",
                medium.as_str(),
            ),
        ),
        (
            "add task with unknown priority",
            AddTaskRequest::new("Gửi email", "Gửi báo cáo cuối kỳ.", "2025-07-24", "Rất Cao"),
        ),
        (
            "add another valid task",
            AddTaskRequest::new(
                "Học tiếng Anh",
                "Luyện nghe 30 phút.",
                "2025-07-25",
                low.as_str(),
            ),
        ),
    ];

    for (index, (label, request)) in steps.iter().enumerate() {
        match service.add_task(request) {
            Ok(outcome) => {
                report_load_warning(&outcome);
                println!("[{}] {label}: ok id={}", index + 1, outcome.task.id);
            }
            Err(err) => println!("[{}] {label}: rejected: {err}", index + 1),
        }
    }
}
