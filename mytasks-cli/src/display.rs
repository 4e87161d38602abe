//! Task display formatting for command output
//!
//! Handles colored output and the different view modes for `list`.

use chrono::NaiveDate;
use colored::*;

use mytasks_core::date::format_date_human;
use mytasks_core::{Task, TaskState};

/// Display mode for task list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Minimal one-line format
    Compact,
    /// Card with summary, state and raw deadline
    Detailed,
    /// Title line plus summary (default)
    Default,
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn state_marker(state: TaskState) -> &'static str {
    match state {
        TaskState::Done => "[✓]",
        TaskState::Doing => "[~]",
        TaskState::NotDone => "[ ]",
    }
}

fn paint_state(text: &str, state: TaskState, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match state {
        TaskState::Done => text.green().to_string(),
        TaskState::Doing => text.yellow().to_string(),
        TaskState::NotDone => text.normal().to_string(),
    }
}

/// Human deadline text and whether it is overdue
fn deadline_info(task: &Task, today: NaiveDate) -> Option<(String, bool)> {
    if task.deadline.trim().is_empty() {
        return None;
    }

    match task.deadline_date() {
        Some(date) => Some((
            format_date_human(date, today),
            date < today && task.state != TaskState::Done,
        )),
        None => Some((task.deadline.clone(), false)),
    }
}

/// Format a task for display; `position` is the 1-based list position
pub fn format_task(
    task: &Task,
    position: usize,
    mode: DisplayMode,
    use_color: bool,
    today: NaiveDate,
) -> String {
    let marker = paint_state(state_marker(task.state), task.state, use_color);

    let title = if use_color {
        task.title.bold().to_string()
    } else {
        task.title.clone()
    };

    let position_str = if use_color {
        format!("[{}]", position).cyan().to_string()
    } else {
        format!("[{}]", position)
    };

    let deadline = deadline_info(task, today).map(|(text, overdue)| {
        let text = format!("({})", text);
        if use_color && overdue {
            text.red().bold().to_string()
        } else if use_color {
            text.dimmed().to_string()
        } else {
            text
        }
    });

    let summary = if use_color && task.summary.trim().is_empty() {
        task.display_summary().dimmed().italic().to_string()
    } else {
        task.display_summary().to_string()
    };

    match mode {
        DisplayMode::Compact => match deadline {
            Some(d) => format!("{} {} {} {}", marker, position_str, title, d),
            None => format!("{} {} {}", marker, position_str, title),
        },
        DisplayMode::Default => {
            let head = match deadline {
                Some(d) => format!("{} {} {} {}", marker, position_str, title, d),
                None => format!("{} {} {}", marker, position_str, title),
            };
            format!("{}\n    {}", head, summary)
        }
        DisplayMode::Detailed => {
            let deadline_line = if task.deadline.trim().is_empty() {
                "Deadline: (none)".to_string()
            } else {
                format!("Deadline: {}", task.deadline)
            };

            [
                format!("{} Task #{}", marker, position),
                format!("Title: {}", title),
                format!("Summary: {}", summary),
                format!(
                    "State: {}",
                    paint_state(task.state.label(), task.state, use_color)
                ),
                deadline_line,
            ]
            .join("\n  ")
        }
    }
}

/// Format a summary line for task list
pub fn format_summary(shown: usize, total: usize, done: usize, doing: usize, use_color: bool) -> String {
    let shown_str = if shown == total {
        format!("{} total", total)
    } else {
        format!("{} of {} shown", shown, total)
    };

    let done_str = format!("{} done", done);
    let doing_str = format!("{} doing", doing);

    let parts = if use_color {
        [
            shown_str,
            done_str.green().to_string(),
            doing_str.yellow().to_string(),
        ]
    } else {
        [shown_str, done_str, doing_str]
    };

    format!("[{}]", parts.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_format_task_compact() {
        let task = Task::new("Test task");

        let output = format_task(&task, 1, DisplayMode::Compact, false, today());
        assert_eq!(output, "[ ] [1] Test task");
    }

    #[test]
    fn test_format_task_default_shows_placeholder() {
        let task = Task::new("Done task").with_state(TaskState::Done);

        let output = format_task(&task, 2, DisplayMode::Default, false, today());
        assert!(output.starts_with("[✓] [2] Done task"));
        assert!(output.contains("No summary provided"));
    }

    #[test]
    fn test_format_task_overdue_deadline() {
        let task = Task::new("Late").with_deadline("2026-03-07");

        let output = format_task(&task, 1, DisplayMode::Compact, false, today());
        assert!(output.ends_with("(Overdue (3 days ago))"));
    }

    #[test]
    fn test_format_task_opaque_deadline() {
        let task = Task::new("Vague").with_deadline("someday");

        let output = format_task(&task, 1, DisplayMode::Compact, false, today());
        assert!(output.ends_with("(someday)"));
    }

    #[test]
    fn test_format_task_detailed() {
        let task = Task::new("Report")
            .with_summary("Q3 numbers")
            .with_state(TaskState::Doing);

        let output = format_task(&task, 4, DisplayMode::Detailed, false, today());
        assert!(output.contains("Task #4"));
        assert!(output.contains("Summary: Q3 numbers"));
        assert!(output.contains("State: Doing right now"));
        assert!(output.contains("Deadline: (none)"));
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(format_summary(5, 5, 2, 1, false), "[5 total | 2 done | 1 doing]");
        assert_eq!(
            format_summary(2, 5, 2, 1, false),
            "[2 of 5 shown | 2 done | 1 doing]"
        );
    }
}
