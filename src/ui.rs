use crate::app::{App, Pane, StatusKind};
use crate::form::{display_category, FormField};
use crate::task::{Category, Task};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, app: &App<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(8), Constraint::Length(3)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    draw_form(f, app, chunks[0]);
    draw_tasks(f, app, chunks[1]);
    draw_status(f, app, rows[1]);
}

fn pane_block(title: &str, active: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        })
}

fn draw_form(f: &mut Frame, app: &App<'_>, area: Rect) {
    let active = app.pane == Pane::Form;
    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| {
            let focused = active && app.form.focus == *field;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            match field {
                FormField::Submit => {
                    Line::from(Span::styled(format!("[ {} ]", field.label()), label_style))
                }
                _ => Line::from(vec![
                    Span::styled(format!("{}: ", field.label()), label_style),
                    Span::styled(app.form.value(*field), Style::default().fg(Color::White)),
                ]),
            }
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(pane_block("Create New Task", active)),
        area,
    );
}

fn task_line(t: &Task) -> Line<'_> {
    let done_style = if t.is_done {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let mut spans = vec![
        Span::raw(format!("Task ID: {}, ", t.id)),
        Span::styled(format!("Name: {}", t.name), Style::default().fg(Color::White)),
        Span::raw(format!(", Description: {}, ", t.description)),
        Span::styled(format!("Is Done: {}", t.is_done), done_style),
    ];
    if t.category != Category::Unspecified {
        spans.push(Span::raw(format!(" [{}]", display_category(t.category))));
    }
    if !t.created_by.is_empty() {
        spans.push(Span::raw(format!(" by {}", t.created_by)));
    }
    Line::from(spans)
}

fn draw_tasks(f: &mut Frame, app: &App<'_>, area: Rect) {
    let items: Vec<ListItem> = app.tasks.iter().map(|t| ListItem::new(task_line(t))).collect();

    let list = List::new(items)
        .block(pane_block("Task List", app.pane == Pane::Tasks))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = ListState::default();
    if app.pane == Pane::Tasks && !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status(f: &mut Frame, app: &App<'_>, area: Rect) {
    let help = match app.pane {
        Pane::Form => "Tab/Up/Down: field  Left/Right: category  Space: done  Enter: submit  Esc: task list",
        Pane::Tasks => "Up/Down: select  Space: toggle done  d: delete  a: new task  r: reload  q: quit",
    };
    let line = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Success => Color::Green,
                StatusKind::Info => Color::Blue,
                StatusKind::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(status.message.as_str(), Style::default().fg(color)),
                Span::raw("  |  "),
                Span::raw(help),
            ])
        }
        None => Line::from(help),
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::task::NewTask;
    use ratatui::backend::TestBackend;

    fn render(app: &App<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_form_and_stored_tasks() {
        let store = Store::open_in_memory().unwrap();
        store
            .tasks()
            .create(&NewTask {
                name: "Buy milk".to_string(),
                description: "2%".to_string(),
                category: Category::Personal,
                ..NewTask::default()
            })
            .unwrap();
        let app = App::new(store.tasks());

        let screen = render(&app);
        assert!(screen.contains("Create New Task"));
        assert!(screen.contains("Task Name:"));
        assert!(screen.contains("Task ID: 1, Name: Buy milk"));
        assert!(screen.contains("[Personal]"));
    }

    #[test]
    fn renders_status_message() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new(store.tasks());
        app.submit_form();

        assert!(render(&app).contains("Error: invalid task"));
    }
}
