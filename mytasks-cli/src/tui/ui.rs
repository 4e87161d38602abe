//! TUI rendering

use chrono::{Local, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use mytasks_core::date::format_date_human;
use mytasks_core::{KeyValueStore, Task, TaskState};

use super::app::{App, EditorField};
use super::theme::Palette;

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let palette = Palette::for_scheme(app.list.color_scheme());
    f.render_widget(Block::default().style(palette.base_style()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Task cards
            Constraint::Length(3), // Status bar
            Constraint::Length(3), // Controls
        ])
        .split(f.area());

    draw_header(f, app, &palette, chunks[0]);
    draw_task_list(f, app, &palette, chunks[1]);
    draw_status_bar(f, app, &palette, chunks[2]);
    draw_controls(f, app, &palette, chunks[3]);

    if app.editor_open() {
        draw_editor(f, app, &palette);
    }

    if app.show_help {
        draw_help_dialog(f, &palette);
    }

    if let Some(msg) = &app.message {
        draw_message(f, &palette, msg);
    }
}

fn draw_header<S: KeyValueStore>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let view = app.list.view_state();
    let filter = view.filter.map(|s| s.label()).unwrap_or("All");
    let scheme = if app.list.color_scheme().is_dark() {
        "☾ dark"
    } else {
        "☀ light"
    };

    let line = Line::from(vec![
        Span::styled("Sort: ", palette.dimmed()),
        Span::raw(view.sort.as_str()),
        Span::raw("  "),
        Span::styled("Filter: ", palette.dimmed()),
        Span::raw(filter),
        Span::raw("  "),
        Span::styled(scheme, Style::default().fg(palette.accent)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" My Tasks ")
            .title_alignment(Alignment::Left)
            .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
            .border_style(palette.border(false)),
    );
    f.render_widget(header, area);
}

fn draw_task_list<S: KeyValueStore>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let view = app.list.view();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tasks ")
        .border_style(palette.border(!app.editor_open()));

    if view.is_empty() {
        let text = if app.list.is_empty() {
            "You have no tasks"
        } else {
            "No tasks match the filter"
        };
        let empty = Paragraph::new(text)
            .style(palette.dimmed())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let today = Local::now().date_naive();
    let items: Vec<ListItem> = view
        .iter()
        .map(|entry| task_card(entry.task, palette, today))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selected())
        .highlight_symbol("▌");

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

/// Title, summary, state and deadline of one task, followed by a spacer line
fn task_card(task: &Task, palette: &Palette, today: NaiveDate) -> ListItem<'static> {
    let summary_style = if task.summary.trim().is_empty() {
        palette.dimmed().add_modifier(Modifier::ITALIC)
    } else {
        palette.dimmed()
    };

    let deadline = match task.deadline_date() {
        Some(date) => {
            let style = if date < today && task.state != TaskState::Done {
                Style::default().fg(palette.red).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(
                format!("{} ({})", task.deadline, format_date_human(date, today)),
                style,
            )
        }
        None if task.deadline.trim().is_empty() => Span::styled("none", palette.dimmed()),
        None => Span::raw(task.deadline.clone()),
    };

    ListItem::new(vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(task.display_summary().to_string(), summary_style)),
        Line::from(vec![
            Span::styled("State: ", palette.dimmed()),
            Span::styled(task.state.label(), palette.state(task.state)),
        ]),
        Line::from(vec![Span::styled("Deadline: ", palette.dimmed()), deadline]),
        Line::from(""),
    ])
}

fn draw_status_bar<S: KeyValueStore>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let shown = app.list.view().len();
    let total = app.list.len();
    let shown_text = if shown == total {
        format!("{} total", total)
    } else {
        format!("{} of {} shown", shown, total)
    };

    let mut status = vec![Span::raw(shown_text)];
    for state in [TaskState::NotDone, TaskState::Doing, TaskState::Done] {
        status.push(Span::raw(" | "));
        status.push(Span::styled(
            format!("{} {}", app.list.count_in_state(state), state.label().to_lowercase()),
            palette.state(state),
        ));
    }

    let paragraph = Paragraph::new(Line::from(status))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(false)),
        )
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn key_hint<'a>(key: &'a str, action: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(action),
    ]
}

fn draw_controls<S: KeyValueStore>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let hints: &[(&str, &str)] = if app.editor_open() {
        &[
            ("Tab", ":Next field "),
            ("←→", ":State "),
            ("Enter", ":Save "),
            ("Esc", ":Cancel "),
            ("C-j", ":Theme"),
        ]
    } else {
        &[
            ("↑↓", ":Nav "),
            ("n", ":New "),
            ("e", ":Edit "),
            ("d", ":Del "),
            ("s", ":Sort "),
            ("f", ":Filter "),
            ("t", ":Theme "),
            ("?", ":Help "),
            ("q", ":Quit"),
        ]
    };

    let controls: Vec<Span> = hints
        .iter()
        .flat_map(|&(key, action)| key_hint(key, action))
        .collect();

    let paragraph = Paragraph::new(Line::from(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Controls ")
                .border_style(palette.border(false)),
        )
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn draw_editor<S: KeyValueStore>(f: &mut Frame, app: &App<S>, palette: &Palette) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let editing = app.list.view_state().editing.is_some();
    let (title, action) = if editing {
        (" Edit Task ", "Save Changes")
    } else {
        (" New Task ", "Create Task")
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(palette.base_style())
        .border_style(palette.border(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);

    let draft = app.list.draft();
    let state_text = format!("◀ {} ▶", draft.state.label());
    let fields = [
        (EditorField::Title, "Title", draft.title.as_str()),
        (EditorField::Summary, "Summary", draft.summary.as_str()),
        (EditorField::State, "State", state_text.as_str()),
        (EditorField::Deadline, "Deadline", draft.deadline.as_str()),
    ];

    for (chunk, (field, label, value)) in chunks.iter().zip(fields) {
        let focused = app.field == field;
        let cursor = if focused && field != EditorField::State {
            "_"
        } else {
            ""
        };
        let style = if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default()
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(format!("{}: ", label), palette.dimmed()),
            Span::styled(format!("{}{}", value, cursor), style),
        ]))
        .wrap(Wrap { trim: false });
        f.render_widget(input, *chunk);
    }

    let hint = Paragraph::new(format!("Enter: {}  Esc: Cancel", action))
        .style(palette.dimmed())
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[4]);
}

fn draw_help_dialog(f: &mut Frame, palette: &Palette) {
    let area = centered_rect(65, 80, f.area());
    f.render_widget(Clear, area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        heading("Navigation"),
        Line::from("  ↑/↓ or j/k  Move selection"),
        Line::from("  Home/End    Go to top/bottom"),
        Line::from(""),
        heading("Tasks"),
        Line::from("  n/a         New task"),
        Line::from("  e/Enter     Edit selected task"),
        Line::from("  d/Delete    Delete selected task"),
        Line::from(""),
        heading("Sorting"),
        Line::from("  1/2/3       Done, Doing, Not done first"),
        Line::from("  D/S         By deadline / by state"),
        Line::from("  s           Cycle sort"),
        Line::from("  0           No sorting"),
        Line::from(""),
        heading("Filtering"),
        Line::from("  F/g/u       Done / Doing / Not done"),
        Line::from("  f           Cycle filter"),
        Line::from("  c           Show all"),
        Line::from(""),
        heading("General"),
        Line::from("  t or Ctrl+J Toggle light/dark"),
        Line::from("  ?           Toggle this help"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(Span::styled("Esc or ? to close", palette.dimmed())),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .style(palette.base_style())
                .border_style(palette.border(true)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_message(f: &mut Frame, palette: &Palette, message: &str) {
    let frame = f.area();
    if frame.height < 3 || frame.width < 5 {
        return;
    }
    let area = Rect {
        x: 2,
        y: frame.height - 2,
        width: frame.width - 4,
        height: 1,
    };
    let msg = Paragraph::new(message)
        .style(Style::default().fg(palette.yellow).bg(palette.base))
        .alignment(Alignment::Center);
    f.render_widget(msg, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use mytasks_core::{Draft, MemoryStore, TaskList};
    use ratatui::{Terminal, backend::TestBackend};

    fn render_to_string(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut lines = Vec::new();
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn app_with(tasks: &[(&str, TaskState)]) -> App<MemoryStore> {
        let mut list = TaskList::load(MemoryStore::new());
        for (title, state) in tasks {
            let draft = Draft {
                title: title.to_string(),
                state: *state,
                ..Draft::default()
            };
            list.create_or_update_task(draft, None).unwrap();
        }
        App::new(list)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_empty_list_placeholder() {
        let app = app_with(&[]);
        let out = render_to_string(&app);

        assert!(out.contains("My Tasks"));
        assert!(out.contains("You have no tasks"));
        assert!(out.contains("0 total"));
    }

    #[test]
    fn test_task_cards() {
        let app = app_with(&[("Buy milk", TaskState::Doing), ("File taxes", TaskState::Done)]);
        let out = render_to_string(&app);

        assert!(out.contains("Buy milk"));
        assert!(out.contains("No summary provided"));
        assert!(out.contains("State: Doing right now"));
        assert!(out.contains("Deadline: none"));
        assert!(out.contains("2 total"));
        assert!(out.contains("1 done"));
    }

    #[test]
    fn test_filtered_out_placeholder() {
        let mut app = app_with(&[("Buy milk", TaskState::NotDone)]);
        press(&mut app, KeyCode::Char('F'));
        let out = render_to_string(&app);

        assert!(out.contains("No tasks match the filter"));
        assert!(out.contains("Filter: Done"));
        assert!(out.contains("0 of 1 shown"));
    }

    #[test]
    fn test_editor_titles() {
        let mut app = app_with(&[("Buy milk", TaskState::NotDone)]);
        press(&mut app, KeyCode::Char('n'));
        let out = render_to_string(&app);
        assert!(out.contains("New Task"));
        assert!(out.contains("Create Task"));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('e'));
        let out = render_to_string(&app);
        assert!(out.contains("Edit Task"));
        assert!(out.contains("Save Changes"));
        assert!(out.contains("Title: Buy milk_"));
    }

    #[test]
    fn test_validation_message_is_drawn() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        let out = render_to_string(&app);

        assert!(out.contains("Title is required"));
    }

    #[test]
    fn test_scheme_indicator_and_background() {
        let mut app = app_with(&[]);
        let light = render_to_string(&app);
        assert!(light.contains("light"));

        press(&mut app, KeyCode::Char('t'));
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let corner = &terminal.backend().buffer()[(0, 0)];
        assert_eq!(corner.bg, Palette::MOCHA.base);
        assert!(render_to_string(&app).contains("dark"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app_with(&[("A", TaskState::NotDone)]);
        app.message = Some("hello".to_string());
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
