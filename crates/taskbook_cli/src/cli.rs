//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskbook_core::{PriorityLabels, TaskbookConfig, DEFAULT_STORE_FILE};

/// Top-level CLI parser for `taskbook`.
#[derive(Debug, Parser)]
#[command(name = "taskbook", version, about = "Add validated tasks to a JSON task file")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Task collection file.
    #[arg(long, global = true, default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    /// Locale of the priority labels.
    #[arg(long, global = true, value_enum, default_value = "vi")]
    pub priorities: PriorityLocale,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    pub fn to_config(&self) -> TaskbookConfig {
        let config = TaskbookConfig::default().with_store_path(self.store.clone());
        match self.priorities {
            PriorityLocale::Vi => config,
            PriorityLocale::En => config
                .with_priorities(PriorityLabels::english())
                .with_default_status("Not completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityLocale {
    /// Thấp, Trung bình, Cao
    Vi,
    /// Low, Medium, High
    En,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add one task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: String,
        #[arg(long)]
        priority: String,
    },
    /// Run the six-step sample scenario against the store.
    Demo,
    /// Print the core version.
    Version,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, PriorityLocale};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_add_subcommand() {
        let cli = Cli::parse_from([
            "taskbook",
            "add",
            "--title",
            "Mua sách",
            "--due",
            "2025-07-20",
            "--priority",
            "Cao",
        ]);
        match cli.command {
            Command::Add {
                title,
                description,
                due,
                priority,
            } => {
                assert_eq!(title, "Mua sách");
                assert_eq!(description, "");
                assert_eq!(due, "2025-07-20");
                assert_eq!(priority, "Cao");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.global.store, PathBuf::from("tasks_database.json"));
        assert_eq!(cli.global.priorities, PriorityLocale::Vi);
    }

    #[test]
    fn global_options_are_accepted_after_subcommand() {
        let cli = Cli::parse_from([
            "taskbook",
            "demo",
            "--store",
            "/tmp/t.json",
            "--priorities",
            "en",
        ]);
        assert!(matches!(cli.command, Command::Demo));
        assert_eq!(cli.global.store, PathBuf::from("/tmp/t.json"));

        let config = cli.global.to_config();
        assert_eq!(config.priorities.label(taskbook_core::Priority::High), "High");
    }

    #[test]
    fn add_requires_due_date() {
        let result = Cli::try_parse_from(["taskbook", "add", "--title", "x", "--priority", "Cao"]);
        assert!(result.is_err());
    }
}
