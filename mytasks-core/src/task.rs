//! Task domain model
//!
//! Pure domain logic for tasks and the editor draft, no I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::parse_deadline;

/// Placeholder shown in place of an empty summary
pub const EMPTY_SUMMARY: &str = "No summary provided";

/// Progress state of a task
///
/// Serialized as the user-facing label, which is also what the stored
/// `"tasks"` blob contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskState {
    #[default]
    #[serde(rename = "Not done")]
    NotDone,
    #[serde(rename = "Doing right now")]
    Doing,
    #[serde(rename = "Done")]
    Done,
}

impl TaskState {
    /// All states, in the order the editor's select offers them
    pub const ALL: [TaskState; 3] = [TaskState::Done, TaskState::NotDone, TaskState::Doing];

    /// Display label, identical to the persisted value
    pub fn label(&self) -> &'static str {
        match self {
            TaskState::NotDone => "Not done",
            TaskState::Doing => "Doing right now",
            TaskState::Done => "Done",
        }
    }

    /// Next state in select order, wrapping around
    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous state in select order, wrapping around
    pub fn prev(&self) -> Self {
        let pos = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single task
///
/// Tasks have no id; a task is addressed by its position in the list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub state: TaskState,
    /// Kept as entered; see [`Task::deadline_date`] for the parsed value
    #[serde(default)]
    pub deadline: String,
}

impl Task {
    /// Create a new task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: String::new(),
            state: TaskState::NotDone,
            deadline: String::new(),
        }
    }

    /// Builder method to set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Builder method to set the state
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    /// Builder method to set the deadline string
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    /// Summary text to display, falling back to the placeholder
    pub fn display_summary(&self) -> &str {
        if self.summary.trim().is_empty() {
            EMPTY_SUMMARY
        } else {
            &self.summary
        }
    }

    /// Deadline as a calendar date, if present and parseable
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        parse_deadline(&self.deadline)
    }
}

/// In-progress contents of the create/edit form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub summary: String,
    pub state: TaskState,
    pub deadline: String,
}

impl Draft {
    /// Reset every field to its default (empty strings, `Not done`)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the required title is present
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Commit the draft into a task, copying fields verbatim
    pub fn to_task(&self) -> Task {
        Task::new(self.title.as_str())
            .with_summary(self.summary.as_str())
            .with_state(self.state)
            .with_deadline(self.deadline.as_str())
    }
}

impl From<&Task> for Draft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            summary: task.summary.clone(),
            state: task.state,
            deadline: task.deadline.clone(),
        }
    }
}
