use crate::task::{Category, NewTask};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Description,
    CreatedBy,
    Category,
    Done,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Description,
        FormField::CreatedBy,
        FormField::Category,
        FormField::Done,
        FormField::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Task Name",
            FormField::Description => "Task Description",
            FormField::CreatedBy => "Created By",
            FormField::Category => "Category",
            FormField::Done => "Is Done?",
            FormField::Submit => "Submit Task",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the caller should do after the form consumed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Leave,
}

#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub category: Category,
    pub is_done: bool,
    pub focus: FormField,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            name: self.name.clone(),
            description: self.description.clone(),
            is_done: self.is_done,
            created_by: self.created_by.clone(),
            category: self.category,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Text shown for `field`; the checkbox and button render their own state.
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Description => self.description.clone(),
            FormField::CreatedBy => self.created_by.clone(),
            FormField::Category => format!("< {} >", display_category(self.category)),
            FormField::Done => (if self.is_done { "[x]" } else { "[ ]" }).to_string(),
            FormField::Submit => String::new(),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::CreatedBy => Some(&mut self.created_by),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Leave,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Left if self.focus == FormField::Category => {
                self.category = self.category.previous();
            }
            KeyCode::Right if self.focus == FormField::Category => {
                self.category = self.category.next();
            }
            KeyCode::Char(' ') if self.focus == FormField::Done => self.is_done = !self.is_done,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
        FormAction::None
    }
}

pub fn display_category(category: Category) -> &'static str {
    match category {
        Category::Unspecified => "(none)",
        other => other.as_str(),
    }
}
