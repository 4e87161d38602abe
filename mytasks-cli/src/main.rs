use chrono::Local;
use clap::Parser;
use tracing::info;

use mytasks_core::date::normalize_deadline;
use mytasks_core::{Draft, TaskList, TaskState};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::display::{DisplayMode, format_summary, format_task, supports_color};
use crate::error::{CliError, Result};
use crate::storage::FileStore;

mod cli;
mod config;
mod display;
mod error;
mod logging;
mod storage;
mod tui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = Config::load()?.with_data_directory(cli.data_dir);

    if let Err(e) = logging::init(&cfg.log_path(), &cfg.log_level) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let store = FileStore::open(cfg.store_path());
    info!(path = %store.path().display(), "opened store");
    let mut list = TaskList::load(store);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run(list)?,

        Commands::Add {
            title,
            summary,
            state,
            deadline,
        } => {
            let draft = Draft {
                title: title.join(" "),
                summary: summary.unwrap_or_default(),
                state: state.into(),
                deadline: deadline.as_deref().map(normalize_deadline).unwrap_or_default(),
            };

            let index = list.create_or_update_task(draft, None)?;
            let task = &list.tasks()[index];
            if task.deadline.is_empty() {
                println!("Task #{} added: {}", index + 1, task.title);
            } else {
                println!(
                    "Task #{} added: {} (deadline: {})",
                    index + 1,
                    task.title,
                    task.deadline
                );
            }
        }

        Commands::List {
            sort,
            filter,
            compact,
            detailed,
            no_color,
        } => {
            if let Some(sort) = sort {
                list.set_sort(sort.into());
            }
            list.set_filter(filter.map(TaskState::from));

            let view = list.view();
            if view.is_empty() {
                println!("You have no tasks.");
                return Ok(());
            }

            let mode = if compact {
                DisplayMode::Compact
            } else if detailed {
                DisplayMode::Detailed
            } else {
                DisplayMode::Default
            };

            let use_color = !no_color && supports_color();
            let today = Local::now().date_naive();

            for entry in &view {
                println!(
                    "{}",
                    format_task(entry.task, entry.index + 1, mode, use_color, today)
                );
            }

            println!();
            println!(
                "{}",
                format_summary(
                    view.len(),
                    list.len(),
                    list.count_in_state(TaskState::Done),
                    list.count_in_state(TaskState::Doing),
                    use_color,
                )
            );
        }

        Commands::Edit {
            position,
            title,
            summary,
            state,
            deadline,
        } => {
            if title.is_none() && summary.is_none() && state.is_none() && deadline.is_none() {
                return Err(CliError::validation(
                    "edit",
                    "At least one of --title, --summary, --state or --deadline must be provided",
                ));
            }

            let index = position_to_index(position)?;
            list.begin_edit(index)?;

            let draft = list.draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(summary) = summary {
                draft.summary = summary;
            }
            if let Some(state) = state {
                draft.state = state.into();
            }
            if let Some(deadline) = deadline {
                draft.deadline = if deadline.trim().eq_ignore_ascii_case("none") {
                    String::new()
                } else {
                    normalize_deadline(&deadline)
                };
            }

            let index = list.submit_draft()?;
            let task = &list.tasks()[index];
            println!("Updated task #{}: {}", index + 1, task.title);
            println!("  State: {}", task.state);
            if !task.deadline.is_empty() {
                println!("  Deadline: {}", task.deadline);
            }
        }

        Commands::Remove { position } => {
            let index = position_to_index(position)?;
            let removed = list.delete_task(index)?;
            println!("Removed: {}", removed.title);
        }

        Commands::Theme { scheme } => {
            let scheme = match scheme {
                Some(scheme) => {
                    list.set_color_scheme(scheme.into())?;
                    list.color_scheme()
                }
                None => list.toggle_color_scheme()?,
            };
            println!("Color scheme: {}", scheme);
        }
    }

    Ok(())
}

/// Convert a 1-based position from the command line to a list index
fn position_to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| CliError::validation("position", "Positions start at 1"))
}
