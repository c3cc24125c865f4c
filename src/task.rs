use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_done: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub category: Category,
}

/// Fields a client may supply when creating a task. The store assigns `id`
/// and the repository stamps `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub is_done: bool,
    pub created_by: String,
    pub category: Category,
}

impl NewTask {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    School,
    Work,
    Personal,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Unspecified,
        Category::School,
        Category::Work,
        Category::Personal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Unspecified => "",
            Category::School => "School",
            Category::Work => "Work",
            Category::Personal => "Personal",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

// NULL reads back as Unspecified; rows written before the column existed carry it.
impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Category::Unspecified),
            _ => value
                .as_str()?
                .parse()
                .map_err(|err| FromSqlError::Other(Box::new(err))),
        }
    }
}
