use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use mytasks_core::{ColorScheme, TaskSort, TaskState};

#[derive(Parser)]
#[command(name = "mytasks")]
#[command(about = "My Tasks - a small task list for the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Defaults to the interactive UI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Done,
    Doing,
    NotDone,
}

impl From<StateArg> for TaskState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Done => TaskState::Done,
            StateArg::Doing => TaskState::Doing,
            StateArg::NotDone => TaskState::NotDone,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    Deadline,
    State,
    DoneFirst,
    DoingFirst,
    NotDoneFirst,
}

impl From<SortBy> for TaskSort {
    fn from(arg: SortBy) -> Self {
        match arg {
            SortBy::Deadline => TaskSort::Deadline,
            SortBy::State => TaskSort::State,
            SortBy::DoneFirst => TaskSort::DoneFirst,
            SortBy::DoingFirst => TaskSort::DoingFirst,
            SortBy::NotDoneFirst => TaskSort::NotDoneFirst,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Light => ColorScheme::Light,
            SchemeArg::Dark => ColorScheme::Dark,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Opens the interactive task list
    Tui,

    /// Adds a task
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Short description
        #[arg(long, short = 's', value_name = "TEXT")]
        summary: Option<String>,
        /// Initial state
        #[arg(long, value_enum, default_value = "not-done")]
        state: StateArg,
        /// Deadline, e.g. 2026-01-25, tomorrow, "next friday"
        #[arg(long, short = 'd', value_name = "DATE")]
        deadline: Option<String>,
    },

    /// Lists tasks with filtering and sorting
    List {
        /// Sort tasks
        #[arg(long, value_enum)]
        sort: Option<SortBy>,
        /// Show only tasks in this state
        #[arg(long, short = 'f', value_enum)]
        filter: Option<StateArg>,
        /// Use compact one-line format
        #[arg(long, short = 'c', conflicts_with = "detailed")]
        compact: bool,
        /// Use detailed format with full info
        #[arg(long)]
        detailed: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Edits the task at a list position
    Edit {
        /// 1-based position as shown by `list`
        #[arg(value_parser = clap::value_parser!(usize))]
        position: usize,
        /// New title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
        /// New summary (empty string clears it)
        #[arg(long, short = 's', value_name = "TEXT")]
        summary: Option<String>,
        /// New state
        #[arg(long, value_enum)]
        state: Option<StateArg>,
        /// New deadline (empty string or 'none' clears it)
        #[arg(long, short = 'd', value_name = "DATE")]
        deadline: Option<String>,
    },

    /// Removes the task at a list position
    Remove {
        #[arg(value_parser = clap::value_parser!(usize))]
        position: usize,
    },

    /// Sets the color scheme, or toggles it when none is given
    Theme {
        #[arg(value_enum)]
        scheme: Option<SchemeArg>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["mytasks"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "mytasks", "add", "Buy", "milk", "--state", "doing", "-d", "tomorrow",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Add { title, state, deadline, summary }) => {
                assert_eq!(title.join(" "), "Buy milk");
                assert_eq!(state, StateArg::Doing);
                assert_eq!(deadline.as_deref(), Some("tomorrow"));
                assert!(summary.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_list_sort_and_filter() {
        let cli = Cli::try_parse_from([
            "mytasks", "list", "--sort", "done-first", "--filter", "not-done",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::List { sort, filter, .. }) => {
                assert_eq!(sort.map(TaskSort::from), Some(TaskSort::DoneFirst));
                assert_eq!(filter.map(TaskState::from), Some(TaskState::NotDone));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::try_parse_from(["mytasks", "theme", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Commands::Theme { scheme: None })));
    }
}
