//! Task list controller
//!
//! [`TaskList`] is the single state container for a session: the task list,
//! the editor draft, the view settings and the store they persist to. Every
//! mutation of the list is written through to the store before returning.

use tracing::{debug, info, warn};

use crate::error::{CoreError, Result};
use crate::filter::{TaskSort, ViewEntry, compute_view};
use crate::persistence::{load_tasks, save_tasks};
use crate::preference::{self, ColorScheme};
use crate::store::KeyValueStore;
use crate::task::{Draft, Task, TaskState};

/// Transient view settings, never persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub sort: TaskSort,
    pub filter: Option<TaskState>,
    /// Position of the task being edited, if the editor is editing
    pub editing: Option<usize>,
    pub editor_open: bool,
}

/// Session state for one task list bound to a store
#[derive(Debug)]
pub struct TaskList<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
    view: ViewState,
    draft: Draft,
    scheme: ColorScheme,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Load the task list and display preference from `store`
    pub fn load(store: S) -> Self {
        let tasks = load_tasks(&store);
        let scheme = preference::get_preference(&store);
        info!(tasks = tasks.len(), scheme = %scheme, "task list loaded");

        Self {
            store,
            tasks,
            view: ViewState::default(),
            draft: Draft::default(),
            scheme,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access for the form layer writing into the draft fields
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Count tasks in a given state
    pub fn count_in_state(&self, state: TaskState) -> usize {
        self.tasks.iter().filter(|t| t.state == state).count()
    }

    /// Commit a draft: replace the task at `editing`, or append
    ///
    /// An out-of-range `editing` index appends. The list is persisted, the
    /// editor closed and the session draft reset. Returns the position the
    /// committed task now occupies.
    ///
    /// A draft without a title is rejected and nothing changes.
    pub fn create_or_update_task(&mut self, draft: Draft, editing: Option<usize>) -> Result<usize> {
        if !draft.has_title() {
            return Err(CoreError::validation("title", "Title is required"));
        }

        let task = draft.to_task();
        let mut tasks = self.tasks.clone();
        let index = match editing {
            Some(i) if i < tasks.len() => {
                tasks[i] = task;
                i
            }
            other => {
                if let Some(i) = other {
                    warn!(index = i, len = tasks.len(), "edit target out of range, appending");
                }
                tasks.push(task);
                tasks.len() - 1
            }
        };

        self.commit(tasks)?;
        debug!(index, updated = editing == Some(index), "task committed");
        self.close_editor();
        Ok(index)
    }

    /// Commit the session draft against the current edit target
    pub fn submit_draft(&mut self) -> Result<usize> {
        let draft = self.draft.clone();
        self.create_or_update_task(draft, self.view.editing)
    }

    /// Remove the task at `index` and persist immediately
    pub fn delete_task(&mut self, index: usize) -> Result<Task> {
        if index >= self.tasks.len() {
            return Err(CoreError::TaskNotFound(index));
        }

        let mut tasks = self.tasks.clone();
        let removed = tasks.remove(index);
        self.commit(tasks)?;
        debug!(index, title = %removed.title, "task deleted");

        // Keep an open edit pointing at the same task
        if let Some(editing) = self.view.editing {
            if editing == index {
                self.close_editor();
            } else if editing > index {
                self.view.editing = Some(editing - 1);
            }
        }

        Ok(removed)
    }

    /// Load the task at `index` into the draft and open the editor
    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        let task = self.tasks.get(index).ok_or(CoreError::TaskNotFound(index))?;
        self.draft = Draft::from(task);
        self.view.editing = Some(index);
        self.view.editor_open = true;
        Ok(())
    }

    /// Open the editor on a fresh draft for a new task
    pub fn open_editor(&mut self) {
        self.draft.reset();
        self.view.editing = None;
        self.view.editor_open = true;
    }

    /// Discard the draft and close the editor
    pub fn cancel_edit(&mut self) {
        self.close_editor();
    }

    pub fn set_sort(&mut self, sort: TaskSort) {
        self.view.sort = sort;
    }

    pub fn set_filter(&mut self, filter: Option<TaskState>) {
        self.view.filter = filter;
    }

    pub fn clear_filter(&mut self) {
        self.view.filter = None;
    }

    /// Current filtered and sorted view
    pub fn view(&self) -> Vec<ViewEntry<'_>> {
        compute_view(&self.tasks, self.view.sort, self.view.filter)
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Flip and persist the display preference
    pub fn toggle_color_scheme(&mut self) -> Result<ColorScheme> {
        self.scheme = preference::toggle(&mut self.store)?;
        Ok(self.scheme)
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) -> Result<()> {
        preference::set_preference(&mut self.store, scheme)?;
        self.scheme = scheme;
        Ok(())
    }

    fn close_editor(&mut self) {
        self.draft.reset();
        self.view.editing = None;
        self.view.editor_open = false;
    }

    /// Store `tasks`, then adopt them; a failed write leaves the list as it was
    fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        save_tasks(&mut self.store, &tasks)?;
        self.tasks = tasks;
        Ok(())
    }
}
