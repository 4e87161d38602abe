//! Task view computation: sorting then filtering
//!
//! The view is derived on every render and never written back to the list.

use std::cmp::Ordering;

use crate::task::{Task, TaskState};

/// Sort order for the task view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Insertion order
    #[default]
    None,
    Deadline,
    /// Alphabetical by state label
    State,
    DoneFirst,
    DoingFirst,
    NotDoneFirst,
}

impl TaskSort {
    /// Next sort order, for cycling through them from one key
    pub fn next(&self) -> Self {
        match self {
            Self::None => Self::Deadline,
            Self::Deadline => Self::State,
            Self::State => Self::DoneFirst,
            Self::DoneFirst => Self::DoingFirst,
            Self::DoingFirst => Self::NotDoneFirst,
            Self::NotDoneFirst => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Deadline => "Deadline",
            Self::State => "State",
            Self::DoneFirst => "Done first",
            Self::DoingFirst => "Doing first",
            Self::NotDoneFirst => "Not done first",
        }
    }

    /// State that a partition sort pulls to the front
    fn target_state(&self) -> Option<TaskState> {
        match self {
            Self::DoneFirst => Some(TaskState::Done),
            Self::DoingFirst => Some(TaskState::Doing),
            Self::NotDoneFirst => Some(TaskState::NotDone),
            _ => None,
        }
    }
}

/// One row of the view: a task and where it sits in the underlying list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry<'a> {
    pub index: usize,
    pub task: &'a Task,
}

/// Sort and filter settings for the task view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only tasks in this state
    pub state: Option<TaskState>,
    pub sort: TaskSort,
}

impl TaskFilter {
    /// Create a new filter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set state filter
    pub fn with_state(mut self, state: Option<TaskState>) -> Self {
        self.state = state;
        self
    }

    /// Sort by given order
    pub fn sort_by(mut self, sort: TaskSort) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a task passes the state filter
    pub fn matches(&self, task: &Task) -> bool {
        self.state.is_none_or(|state| task.state == state)
    }

    /// Sort, then filter. Sorting is stable throughout.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<ViewEntry<'a>> {
        let mut entries: Vec<ViewEntry<'a>> = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| ViewEntry { index, task })
            .collect();

        match self.sort {
            TaskSort::None => {}
            TaskSort::Deadline => {
                entries.sort_by(|a, b| compare_deadlines(a.task, b.task));
            }
            TaskSort::State => {
                entries.sort_by(|a, b| a.task.state.label().cmp(b.task.state.label()));
            }
            TaskSort::DoneFirst | TaskSort::DoingFirst | TaskSort::NotDoneFirst => {
                if let Some(target) = self.sort.target_state() {
                    entries.sort_by_key(|e| e.task.state != target);
                }
            }
        }

        entries.retain(|e| self.matches(e.task));
        entries
    }
}

/// Compute the visible task sequence for the given sort and filter
pub fn compute_view(tasks: &[Task], sort: TaskSort, filter: Option<TaskState>) -> Vec<ViewEntry<'_>> {
    TaskFilter::new().sort_by(sort).with_state(filter).apply(tasks)
}

/// Dated tasks ascending, then undated or unparseable ones
fn compare_deadlines(a: &Task, b: &Task) -> Ordering {
    match (a.deadline_date(), b.deadline_date()) {
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(view: &[ViewEntry<'_>]) -> Vec<String> {
        view.iter().map(|e| e.task.title.clone()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new("A").with_state(TaskState::NotDone).with_deadline("2026-03-01"),
            Task::new("B").with_state(TaskState::Done).with_deadline(""),
            Task::new("C").with_state(TaskState::Doing).with_deadline("2026-01-15"),
            Task::new("D").with_state(TaskState::Done).with_deadline("garbage"),
            Task::new("E").with_state(TaskState::NotDone).with_deadline("2026-02-10"),
        ]
    }

    #[test]
    fn test_no_sort_keeps_insertion_order() {
        let tasks = sample();
        let view = compute_view(&tasks, TaskSort::None, None);

        assert_eq!(titles(&view), vec!["A", "B", "C", "D", "E"]);
        let indices: Vec<usize> = view.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_by_deadline_puts_undated_last() {
        let tasks = sample();
        let view = compute_view(&tasks, TaskSort::Deadline, None);

        assert_eq!(titles(&view), vec!["C", "E", "A", "B", "D"]);
    }

    #[test]
    fn test_sort_by_state_label() {
        let tasks = sample();
        let view = compute_view(&tasks, TaskSort::State, None);

        // "Doing right now" < "Done" < "Not done"
        assert_eq!(titles(&view), vec!["C", "B", "D", "A", "E"]);
    }

    #[test]
    fn test_partition_sorts_are_stable() {
        let tasks = sample();

        let view = compute_view(&tasks, TaskSort::DoneFirst, None);
        assert_eq!(titles(&view), vec!["B", "D", "A", "C", "E"]);

        let view = compute_view(&tasks, TaskSort::DoingFirst, None);
        assert_eq!(titles(&view), vec!["C", "A", "B", "D", "E"]);

        let view = compute_view(&tasks, TaskSort::NotDoneFirst, None);
        assert_eq!(titles(&view), vec!["A", "E", "B", "C", "D"]);
    }

    #[test]
    fn test_filter_by_state() {
        let tasks = sample();
        let view = compute_view(&tasks, TaskSort::None, Some(TaskState::Done));

        assert_eq!(titles(&view), vec!["B", "D"]);
        assert!(view.iter().all(|e| e.task.state == TaskState::Done));
        let indices: Vec<usize> = view.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_sort_and_filter_combined() {
        let tasks = sample();
        let view = compute_view(&tasks, TaskSort::Deadline, Some(TaskState::NotDone));

        assert_eq!(titles(&view), vec!["E", "A"]);
    }

    #[test]
    fn test_view_does_not_touch_list() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = compute_view(&tasks, TaskSort::State, Some(TaskState::Doing));
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_sort_cycle() {
        let mut sort = TaskSort::None;
        for _ in 0..6 {
            sort = sort.next();
        }
        assert_eq!(sort, TaskSort::None);
    }
}
