use crate::domain::{
    sort_tasks, NewTask, Statistics, Task, TaskId, TaskUpdate, Theme, TimerSettings,
    TimerSettingsUpdate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything that gets persisted, as one record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub active_task_id: Option<TaskId>,
    #[serde(default)]
    pub timer_settings: TimerSettings,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub theme: Theme,
}

impl StoreState {
    pub fn with_settings(timer_settings: TimerSettings) -> Self {
        Self {
            timer_settings,
            ..Self::default()
        }
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.active_task_id.and_then(|id| self.find_task(id))
    }
}

/// Owner of the application state.
///
/// Every mutation replaces the shared snapshot (copy on write), bumps the
/// revision and marks the store as needing a save.
#[derive(Debug)]
pub struct Store {
    state: Arc<StoreState>,
    revision: u64,
    pub needs_save: bool,
}

impl Store {
    pub fn new(state: StoreState) -> Self {
        let mut state = state;
        state.timer_settings = state.timer_settings.clamped();

        // Drop a dangling active pointer left by hand-edited data
        if let Some(id) = state.active_task_id {
            if state.find_task(id).is_none() {
                tracing::warn!(%id, "active task not found in saved state, clearing");
                state.active_task_id = None;
            }
        }

        Self {
            state: Arc::new(state),
            revision: 0,
            needs_save: false,
        }
    }

    /// Current immutable snapshot
    pub fn snapshot(&self) -> Arc<StoreState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Number of mutations applied since the store was created
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn sorted_tasks(&self) -> Vec<&Task> {
        sort_tasks(&self.state.tasks)
    }

    pub fn active_task_id(&self) -> Option<TaskId> {
        self.state.active_task_id
    }

    pub fn timer_settings(&self) -> TimerSettings {
        self.state.timer_settings
    }

    pub fn statistics(&self) -> Statistics {
        self.state.statistics
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let result = f(Arc::make_mut(&mut self.state));
        self.revision += 1;
        self.needs_save = true;
        result
    }

    /// Add a task built from form input
    pub fn add_task(&mut self, new: NewTask) -> TaskId {
        self.add_task_at(new, Utc::now())
    }

    pub fn add_task_at(&mut self, new: NewTask, now: DateTime<Utc>) -> TaskId {
        let task = Task::from_new(new, now);
        let id = task.id;
        tracing::debug!(%id, title = %task.title, "task added");
        self.mutate(|s| s.tasks.push(task));
        id
    }

    /// Merge a partial update into a task. Unknown ids are ignored.
    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) {
        self.update_task_at(id, update, Utc::now())
    }

    pub fn update_task_at(&mut self, id: TaskId, update: TaskUpdate, now: DateTime<Utc>) {
        if self.state.find_task(id).is_none() {
            tracing::debug!(%id, "update for unknown task ignored");
            return;
        }

        self.mutate(|s| {
            let newly_completed = s
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .map(|task| task.apply(update, now))
                .unwrap_or(false);

            if newly_completed {
                s.statistics.record_task_completed();
                tracing::info!(%id, total = s.statistics.tasks_completed, "task completed");
            }
        });
    }

    /// Remove a task, clearing the active pointer if it referenced it
    pub fn delete_task(&mut self, id: TaskId) {
        if self.state.find_task(id).is_none() {
            return;
        }

        self.mutate(|s| {
            s.tasks.retain(|t| t.id != id);
            if s.active_task_id == Some(id) {
                s.active_task_id = None;
            }
        });
        tracing::debug!(%id, "task deleted");
    }

    /// Select the task to focus on, or clear the selection
    pub fn set_active_task(&mut self, id: Option<TaskId>) {
        if let Some(id) = id {
            if self.state.find_task(id).is_none() {
                tracing::warn!(%id, "cannot focus unknown task");
                return;
            }
        }
        self.mutate(|s| s.active_task_id = id);
    }

    pub fn update_timer_settings(&mut self, update: TimerSettingsUpdate) {
        self.mutate(|s| s.timer_settings.merge(update));
        tracing::debug!(settings = ?self.state.timer_settings, "timer settings updated");
    }

    /// Record a completed focus session against a task.
    ///
    /// The aggregate counters move even if the task no longer exists.
    pub fn increment_session(&mut self, task_id: TaskId) {
        self.mutate(|s| {
            if let Some(task) = s.tasks.iter_mut().find(|t| t.id == task_id) {
                task.sessions_completed += 1;
            }
            let work_minutes = s.timer_settings.work_minutes;
            s.statistics.record_session(work_minutes);
        });
    }

    /// Record a completed focus session with no task attached
    pub fn record_session(&mut self) {
        self.mutate(|s| {
            let work_minutes = s.timer_settings.work_minutes;
            s.statistics.record_session(work_minutes);
        });
    }

    pub fn toggle_theme(&mut self) {
        self.mutate(|s| s.theme = s.theme.toggled());
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreState::default())
    }
}
