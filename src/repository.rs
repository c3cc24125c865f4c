use crate::error::{Result, TaskError};
use crate::task::{NewTask, Task};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

const INSERT_TASK: &str = "INSERT INTO tasks (name, description, is_done, created_at, created_by, category)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_TASKS: &str = "SELECT id, name, description, is_done, created_at, created_by, category
    FROM tasks ORDER BY id";
const UPDATE_STATUS: &str = "UPDATE tasks SET is_done = ?1 WHERE id = ?2";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Task operations over a borrowed connection. Each statement commits on its own.
#[derive(Debug, Clone, Copy)]
pub struct TaskRepository<'a> {
    conn: &'a Connection,
}

impl<'a> TaskRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a task and return the id the store assigned to it.
    pub fn create(&self, task: &NewTask) -> Result<i64> {
        let name = task.name.trim();
        if name.is_empty() {
            return Err(TaskError::Validation("task name must not be empty"));
        }

        let created_at = Utc::now();
        self.conn.execute(
            INSERT_TASK,
            params![
                name,
                task.description,
                task.is_done,
                created_at,
                task.created_by,
                task.category,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("Created task {id} ({name})");
        Ok(id)
    }

    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS)?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("Listed {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Set `is_done` for `id`. Returns `false` when no task has that id;
    /// that case is not an error.
    pub fn update_status(&self, id: i64, is_done: bool) -> Result<bool> {
        let changed = self.conn.execute(UPDATE_STATUS, params![is_done, id])?;
        info!("Updated status of task {id} to is_done={is_done} ({changed} row(s))");
        Ok(changed > 0)
    }

    /// Delete `id`. Returns `false` when no task has that id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute(DELETE_TASK, params![id])?;
        info!("Deleted task {id} ({changed} row(s))");
        Ok(changed > 0)
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        is_done: row.get::<_, Option<bool>>(3)?.unwrap_or_default(),
        created_at: row.get(4)?,
        created_by: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        category: row.get(6)?,
    })
}
