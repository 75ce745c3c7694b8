//! Command-line surface for the board and the planner.

use chrono::{DateTime, Utc};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use studyflow_core::enrich::DEFAULT_BASE_URL;
use studyflow_core::{
    Category, Lane, RecordId, SessionFilter, SessionPriority, SessionSort, TaskPriority,
};

/// Top-level parser for the `studyflow` binary.
#[derive(Debug, Parser)]
#[command(name = "studyflow", version, about = "Kanban board and study session planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "STUDYFLOW_DB")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, env = "STUDYFLOW_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, global = true, env = "STUDYFLOW_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Skip topic summary lookups (env accepts 1/0, yes/no, on/off)
    #[arg(
        long,
        global = true,
        env = "STUDYFLOW_NO_ENRICH",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_enrich: bool,

    /// Base URL of the encyclopedia used for topic summaries
    #[arg(long, global = true, env = "STUDYFLOW_WIKI_URL", default_value = DEFAULT_BASE_URL)]
    pub wiki_url: String,

    /// Summary lookup timeout in seconds
    #[arg(long, global = true, default_value_t = 5)]
    pub wiki_timeout: u64,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Kanban task board
    Board {
        #[command(subcommand)]
        action: BoardCommand,
    },
    /// Study session planner
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },
    /// Hours per subject and the last 14 days of completed study
    Stats,
    /// Run a Pomodoro countdown for a session and mark it done at zero
    Timer {
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Add a task to the todo lane
    Add(NewTaskArgs),
    /// Edit a task; omitted fields keep their current value
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: EditTaskArgs,
    },
    /// Delete a task
    Rm { id: RecordId },
    /// Move a task to another lane (todo, inProgress, done)
    Mv { id: RecordId, lane: Lane },
    /// Show the board grouped by lane
    Show,
}

#[derive(Debug, Args)]
pub struct NewTaskArgs {
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Personal or Work
    #[arg(short, long, default_value = "Personal")]
    pub category: Category,
    /// Low, Medium or High
    #[arg(short, long, default_value = "Low")]
    pub priority: TaskPriority,
}

#[derive(Debug, Args)]
pub struct EditTaskArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub category: Option<Category>,
    #[arg(short, long)]
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Plan a new study session
    Add(NewSessionArgs),
    /// Edit a session; omitted fields keep their current value
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: EditSessionArgs,
    },
    /// Delete a session
    Rm { id: RecordId },
    /// Mark a session done now
    Done { id: RecordId },
    /// Delete every session
    Clear {
        /// Confirm deleting all sessions
        #[arg(long)]
        yes: bool,
    },
    /// List sessions
    List {
        #[arg(long, default_value = "all")]
        filter: SessionFilter,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "start")]
        sort: SessionSort,
    },
    /// Write all sessions to a JSON file
    Export { path: Option<PathBuf> },
    /// Append sessions from a JSON file
    Import { path: PathBuf },
}

#[derive(Debug, Args)]
pub struct NewSessionArgs {
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub topic: String,
    /// Minutes
    #[arg(long, default_value_t = 25)]
    pub duration: u32,
    /// RFC 3339 start time; defaults to now
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    #[arg(long, default_value = "Normal")]
    pub priority: SessionPriority,
    /// Comma separated
    #[arg(long, default_value = "")]
    pub tags: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Debug, Args)]
pub struct EditSessionArgs {
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub topic: Option<String>,
    #[arg(long)]
    pub duration: Option<u32>,
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    #[arg(long)]
    pub priority: Option<SessionPriority>,
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{BoardCommand, Cli, Commands, PlanCommand};
    use clap::{CommandFactory, Parser};
    use studyflow_core::{Lane, SessionFilter, SessionSort};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_board_move() {
        let cli = Cli::try_parse_from(["studyflow", "board", "mv", "17", "inProgress"]).unwrap();
        match cli.command {
            Commands::Board {
                action: BoardCommand::Mv { id, lane },
            } => {
                assert_eq!(id.get(), 17);
                assert_eq!(lane, Lane::InProgress);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_plan_list_controls() {
        let cli = Cli::try_parse_from([
            "studyflow", "plan", "list", "--filter", "today", "--sort", "priority",
        ])
        .unwrap();
        match cli.command {
            Commands::Plan {
                action: PlanCommand::List { filter, sort, search },
            } => {
                assert_eq!(filter, SessionFilter::Today);
                assert_eq!(sort, SessionSort::Priority);
                assert!(search.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_enrich_env_accepts_numeric_switches() {
        std::env::set_var("STUDYFLOW_NO_ENRICH", "1");
        let on = Cli::try_parse_from(["studyflow", "stats"]).map(|cli| cli.no_enrich);
        std::env::set_var("STUDYFLOW_NO_ENRICH", "0");
        let off = Cli::try_parse_from(["studyflow", "stats"]).map(|cli| cli.no_enrich);
        std::env::remove_var("STUDYFLOW_NO_ENRICH");

        assert!(on.unwrap());
        assert!(!off.unwrap());
    }

    #[test]
    fn rejects_unknown_lane() {
        assert!(Cli::try_parse_from(["studyflow", "board", "mv", "1", "backlog"]).is_err());
    }
}
