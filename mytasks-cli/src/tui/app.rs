//! TUI application state and key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use mytasks_core::date::normalize_deadline;
use mytasks_core::{CoreError, KeyValueStore, TaskList, TaskSort, TaskState};

/// Field of the editor form that receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Title,
    Summary,
    State,
    Deadline,
}

impl EditorField {
    pub fn next(&self) -> Self {
        match self {
            EditorField::Title => EditorField::Summary,
            EditorField::Summary => EditorField::State,
            EditorField::State => EditorField::Deadline,
            EditorField::Deadline => EditorField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            EditorField::Title => EditorField::Deadline,
            EditorField::Summary => EditorField::Title,
            EditorField::State => EditorField::Summary,
            EditorField::Deadline => EditorField::State,
        }
    }
}

/// Filter order used by the cycle key
fn next_filter(filter: Option<TaskState>) -> Option<TaskState> {
    match filter {
        None => Some(TaskState::NotDone),
        Some(TaskState::NotDone) => Some(TaskState::Doing),
        Some(TaskState::Doing) => Some(TaskState::Done),
        Some(TaskState::Done) => None,
    }
}

pub struct App<S: KeyValueStore> {
    pub list: TaskList<S>,
    /// Position in the current view, not in the task list
    pub selected_index: usize,
    pub field: EditorField,
    pub show_help: bool,
    pub should_quit: bool,
    pub message: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(list: TaskList<S>) -> Self {
        Self {
            list,
            selected_index: 0,
            field: EditorField::Title,
            show_help: false,
            should_quit: false,
            message: None,
        }
    }

    pub fn editor_open(&self) -> bool {
        self.list.view_state().editor_open
    }

    /// List index of the task under the cursor
    pub fn selected_task_index(&self) -> Option<usize> {
        self.list.view().get(self.selected_index).map(|entry| entry.index)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list.view().len();
        if len == 0 {
            return;
        }
        self.selected_index = self.selected_index.saturating_add_signed(delta).min(len - 1);
    }

    fn select_last(&mut self) {
        self.selected_index = self.list.view().len().saturating_sub(1);
    }

    /// Put the cursor on a task by list index, if it is visible
    fn select_task(&mut self, index: usize) {
        if let Some(position) = self.list.view().iter().position(|e| e.index == index) {
            self.selected_index = position;
        } else {
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list.view().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Messages live until the next key press
        self.message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('j') => {
                    self.toggle_theme();
                    return;
                }
                _ => {}
            }
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.editor_open() {
            self.handle_editor_key(key);
        } else {
            self.handle_list_key(key);
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home => self.selected_index = 0,
            KeyCode::End => self.select_last(),

            KeyCode::Char('n') | KeyCode::Char('a') => self.open_new(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),

            KeyCode::Char('1') => self.sort(TaskSort::DoneFirst),
            KeyCode::Char('2') => self.sort(TaskSort::DoingFirst),
            KeyCode::Char('3') => self.sort(TaskSort::NotDoneFirst),
            KeyCode::Char('D') => self.sort(TaskSort::Deadline),
            KeyCode::Char('S') => self.sort(TaskSort::State),
            KeyCode::Char('0') => self.sort(TaskSort::None),
            KeyCode::Char('s') => self.sort(self.list.view_state().sort.next()),

            KeyCode::Char('f') => self.filter(next_filter(self.list.view_state().filter)),
            KeyCode::Char('F') => self.filter(Some(TaskState::Done)),
            KeyCode::Char('g') => self.filter(Some(TaskState::Doing)),
            KeyCode::Char('u') => self.filter(Some(TaskState::NotDone)),
            KeyCode::Char('c') => self.filter(None),

            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.list.cancel_edit();
                self.field = EditorField::Title;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            _ if self.field == EditorField::State => {
                let draft = self.list.draft_mut();
                match key.code {
                    KeyCode::Left => draft.state = draft.state.prev(),
                    KeyCode::Right | KeyCode::Char(' ') => draft.state = draft.state.next(),
                    _ => {}
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.field_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                if let Some(text) = self.field_text() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    /// Text buffer behind the focused field, if it is a text field
    fn field_text(&mut self) -> Option<&mut String> {
        let draft = self.list.draft_mut();
        match self.field {
            EditorField::Title => Some(&mut draft.title),
            EditorField::Summary => Some(&mut draft.summary),
            EditorField::Deadline => Some(&mut draft.deadline),
            EditorField::State => None,
        }
    }

    fn open_new(&mut self) {
        self.list.open_editor();
        self.field = EditorField::Title;
    }

    fn open_selected(&mut self) {
        let Some(index) = self.selected_task_index() else {
            return;
        };
        if let Err(e) = self.list.begin_edit(index) {
            warn!(index, error = %e, "cannot edit task");
            self.message = Some(e.to_string());
            return;
        }
        self.field = EditorField::Title;
    }

    fn submit(&mut self) {
        let editing = self.list.view_state().editing;
        // Normalize a copy so a rejected draft keeps what the user typed
        let mut draft = self.list.draft().clone();
        draft.deadline = normalize_deadline(&draft.deadline);

        match self.list.create_or_update_task(draft, editing) {
            Ok(index) => {
                self.field = EditorField::Title;
                self.select_task(index);
                let text = if editing.is_none() { "Task created" } else { "Changes saved" };
                self.message = Some(text.to_string());
            }
            Err(CoreError::Validation { message, .. }) => self.message = Some(message),
            Err(e) => {
                warn!(error = %e, "commit failed");
                self.message = Some(format!("Failed to save: {}", e));
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected_task_index() else {
            return;
        };
        match self.list.delete_task(index) {
            Ok(removed) => {
                debug!(index, "deleted from tui");
                self.message = Some(format!("Deleted: {}", removed.title));
            }
            Err(e) => self.message = Some(format!("Failed to save: {}", e)),
        }
        self.clamp_selection();
    }

    fn sort(&mut self, sort: TaskSort) {
        self.list.set_sort(sort);
        self.clamp_selection();
    }

    fn filter(&mut self, filter: Option<TaskState>) {
        self.list.set_filter(filter);
        self.selected_index = 0;
    }

    fn toggle_theme(&mut self) {
        if let Err(e) = self.list.toggle_color_scheme() {
            self.message = Some(format!("Failed to save: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mytasks_core::{ColorScheme, MemoryStore};

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App<MemoryStore>, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App<MemoryStore>, title: &str) {
        press(app, KeyCode::Char('n'));
        type_text(app, title);
        press(app, KeyCode::Enter);
    }

    fn titles(app: &App<MemoryStore>) -> Vec<String> {
        app.list.tasks().iter().map(|t| t.title.clone()).collect()
    }

    fn new_app() -> App<MemoryStore> {
        App::new(TaskList::load(MemoryStore::new()))
    }

    #[test]
    fn test_create_task_through_editor() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('n'));
        assert!(app.editor_open());

        type_text(&mut app, "Write report");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Q3");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2026-05-01");
        press(&mut app, KeyCode::Enter);

        assert!(!app.editor_open());
        assert_eq!(app.message.as_deref(), Some("Task created"));
        let task = &app.list.tasks()[0];
        assert_eq!(task.title, "Write report");
        assert_eq!(task.summary, "Q3");
        assert_eq!(task.state, TaskState::Doing);
        assert_eq!(task.deadline, "2026-05-01");
    }

    #[test]
    fn test_empty_title_keeps_editor_open() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);

        assert!(app.editor_open());
        assert!(app.list.is_empty());
        assert_eq!(app.message.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_rejected_submit_keeps_typed_deadline() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('n'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "tomorrow");
        press(&mut app, KeyCode::Enter);

        assert!(app.editor_open());
        assert_eq!(app.message.as_deref(), Some("Title is required"));
        assert_eq!(app.list.draft().deadline, "tomorrow");
    }

    #[test]
    fn test_deadline_normalized_on_commit() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Call bank");
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "tomorrow");
        press(&mut app, KeyCode::Enter);

        let expected = (chrono::Local::now().date_naive() + chrono::Days::new(1))
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(app.list.tasks()[0].deadline, expected);
    }

    #[test]
    fn test_edit_targets_list_index_under_filter() {
        let mut app = new_app();
        add(&mut app, "A");
        add(&mut app, "B");
        app.list.begin_edit(1).unwrap();
        app.list.draft_mut().state = TaskState::Done;
        app.list.submit_draft().unwrap();

        // Only B is visible, at view position 0
        press(&mut app, KeyCode::Char('F'));
        assert_eq!(app.selected_task_index(), Some(1));

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.list.draft().title, "B");
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);

        assert_eq!(titles(&app), vec!["A", "B2"]);
        assert_eq!(app.message.as_deref(), Some("Changes saved"));
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = new_app();
        add(&mut app, "A");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "xyz");
        press(&mut app, KeyCode::Esc);

        assert!(!app.editor_open());
        assert!(!app.should_quit);
        assert_eq!(titles(&app), vec!["A"]);
    }

    #[test]
    fn test_delete_selected_task() {
        let mut app = new_app();
        add(&mut app, "A");
        add(&mut app, "B");
        add(&mut app, "C");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(titles(&app), vec!["A", "B"]);
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.message.as_deref(), Some("Deleted: C"));
    }

    #[test]
    fn test_delete_on_empty_list_is_ignored() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.list.is_empty());
        assert!(app.message.is_none());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = new_app();
        add(&mut app, "A");
        add(&mut app, "B");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_index, 0);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_sort_and_filter_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.list.view_state().sort, TaskSort::DoneFirst);
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.list.view_state().sort, TaskSort::None);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.list.view_state().filter, Some(TaskState::NotDone));
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.list.view_state().filter, Some(TaskState::Doing));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.list.view_state().filter, None);
    }

    #[test]
    fn test_ctrl_j_toggles_theme_inside_editor() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('n'));
        ctrl(&mut app, 'j');

        assert_eq!(app.list.color_scheme(), ColorScheme::Dark);
        assert!(app.list.draft().title.is_empty());
        assert!(app.editor_open());
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.editor_open());

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.list.draft().title, "q");

        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }
}
