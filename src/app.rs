use crate::error::TaskError;
use crate::form::{FormAction, TaskForm};
use crate::repository::TaskRepository;
use crate::task::Task;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Tasks,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// Screen state. Repository failures end up in `status`; none of them stop the app.
pub struct App<'a> {
    repo: TaskRepository<'a>,
    pub tasks: Vec<Task>,
    pub selected: usize,
    pub pane: Pane,
    pub form: TaskForm,
    pub status: Option<Status>,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(repo: TaskRepository<'a>) -> Self {
        let mut app = Self {
            repo,
            tasks: Vec::new(),
            selected: 0,
            pane: Pane::Form,
            form: TaskForm::new(),
            status: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn refresh(&mut self) {
        match self.repo.list_all() {
            Ok(tasks) => {
                self.tasks = tasks;
                if self.selected >= self.tasks.len() {
                    self.selected = self.tasks.len().saturating_sub(1);
                }
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn submit_form(&mut self) {
        match self.repo.create(&self.form.to_new_task()) {
            Ok(id) => {
                self.form.clear();
                self.refresh();
                if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
                    self.selected = pos;
                }
                self.succeed(format!("Task saved successfully! (id {id})"));
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn toggle_selected(&mut self) {
        let Some((id, is_done)) = self.selected_task().map(|t| (t.id, !t.is_done)) else {
            self.info("No task selected".to_string());
            return;
        };
        match self.repo.update_status(id, is_done) {
            Ok(true) => self.succeed("Task status updated successfully!".to_string()),
            Ok(false) => self.info(format!("No task with id {id}")),
            Err(err) => {
                self.fail(err);
                return;
            }
        }
        self.refresh();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            self.info("No task selected".to_string());
            return;
        };
        match self.repo.delete(id) {
            Ok(true) => self.succeed("Task deleted successfully!".to_string()),
            Ok(false) => self.info(format!("No task with id {id}")),
            Err(err) => {
                self.fail(err);
                return;
            }
        }
        self.refresh();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.pane {
            Pane::Form => match self.form.handle_key(key) {
                FormAction::Submit => self.submit_form(),
                FormAction::Leave => self.pane = Pane::Tasks,
                FormAction::None => {}
            },
            Pane::Tasks => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
                KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
                KeyCode::Char('r') => self.refresh(),
                KeyCode::Char('a') | KeyCode::Tab => self.pane = Pane::Form,
                _ => {}
            },
        }
    }

    fn succeed(&mut self, message: String) {
        self.set_status(StatusKind::Success, message);
    }

    fn info(&mut self, message: String) {
        self.set_status(StatusKind::Info, message);
    }

    fn fail(&mut self, err: TaskError) {
        warn!("{err}");
        self.set_status(StatusKind::Error, format!("Error: {err}"));
    }

    fn set_status(&mut self, kind: StatusKind, message: String) {
        self.status = Some(Status { kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::task::NewTask;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn status_kind(app: &App<'_>) -> Option<StatusKind> {
        app.status.as_ref().map(|s| s.kind)
    }

    #[test]
    fn submitting_the_form_creates_and_selects_task() {
        let store = Store::open_in_memory().unwrap();
        store.tasks().create(&NewTask::named("first")).unwrap();
        let mut app = App::new(store.tasks());

        for c in "second".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.selected_task().unwrap().name, "second");
        assert!(app.form.name.is_empty());
        assert_eq!(status_kind(&app), Some(StatusKind::Success));
    }

    #[test]
    fn blank_form_reports_error_and_keeps_running() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new(store.tasks());

        app.handle_key(key(KeyCode::Enter));

        assert!(app.tasks.is_empty());
        assert!(!app.should_quit);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.starts_with("Error: "));
    }

    #[test]
    fn toggle_and_delete_act_on_selection() {
        let store = Store::open_in_memory().unwrap();
        store.tasks().create(&NewTask::named("a")).unwrap();
        store.tasks().create(&NewTask::named("b")).unwrap();
        let mut app = App::new(store.tasks());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.pane, Pane::Tasks);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.tasks[1].is_done);
        assert!(!app.tasks[0].is_done);

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].name, "a");
        assert_eq!(app.selected, 0);
        assert_eq!(
            app.status.as_ref().unwrap().message,
            "Task deleted successfully!"
        );
    }

    #[test]
    fn stale_selection_reports_missing_id() {
        let store = Store::open_in_memory().unwrap();
        let id = store.tasks().create(&NewTask::named("gone")).unwrap();
        let mut app = App::new(store.tasks());
        store.tasks().delete(id).unwrap();

        app.toggle_selected();

        assert_eq!(status_kind(&app), Some(StatusKind::Info));
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn empty_list_has_nothing_to_act_on() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new(store.tasks());
        app.pane = Pane::Tasks;

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(status_kind(&app), Some(StatusKind::Info));

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
