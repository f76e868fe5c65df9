use super::enums::{Category, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

/// A user-defined unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    /// Stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Number of focus sessions completed while this task was active
    #[serde(default, rename = "pomodorosCompleted")]
    pub sessions_completed: u32,
}

impl Task {
    /// Build a task record from form input, assigning id and creation time
    pub fn from_new(new: NewTask, created_at: DateTime<Utc>) -> Self {
        let completed_at = if new.completed { Some(created_at) } else { None };
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            completed: new.completed,
            priority: new.priority,
            category: new.category,
            created_at,
            completed_at,
            sessions_completed: 0,
        }
    }

    /// Merge a partial update into this task.
    ///
    /// Returns true if the task moved from incomplete to complete.
    pub fn apply(&mut self, update: TaskUpdate, now: DateTime<Utc>) -> bool {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = update.category {
            self.category = category;
        }

        match update.completed {
            Some(true) if !self.completed => {
                self.completed = true;
                self.completed_at = Some(now);
                true
            }
            Some(false) if self.completed => {
                self.completed = false;
                self.completed_at = None;
                false
            }
            _ => false,
        }
    }
}

/// Fields supplied by the task form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub completed: bool,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a task; `None` fields are left unchanged
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

impl TaskUpdate {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
