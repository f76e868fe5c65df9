use crate::config::AppConfig;
use crate::domain::{
    parse_setting, Category, NewTask, Priority, Task, TaskId, TaskUpdate, TimerSettings,
    TimerSettingsUpdate, UiMode, MAX_DURATION_MINUTES, MAX_LONG_BREAK_INTERVAL,
};
use crate::notifications;
use crate::persistence::save_state;
use crate::store::Store;
use crate::timer::{PhaseChange, TimerController};
use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Field being edited in the add-task form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Category,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::Category,
            FormField::Category => FormField::Title,
        }
    }
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub editing_field: FormField,
    pub error: Option<String>,
}

impl Default for TaskFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            category: Category::Work,
            editing_field: FormField::Title,
            error: None,
        }
    }
}

/// Labels of the settings panel rows, in field order
pub const SETTINGS_LABELS: [&str; 4] = [
    "Work duration (minutes)",
    "Short break duration (minutes)",
    "Long break duration (minutes)",
    "Long break interval (sessions)",
];

/// Settings panel state; values are kept as typed text until submitted
#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub values: [String; 4],
    pub editing_field: usize,
}

impl SettingsFormState {
    pub fn from_settings(settings: &TimerSettings) -> Self {
        Self {
            values: [
                settings.work_minutes.to_string(),
                settings.short_break_minutes.to_string(),
                settings.long_break_minutes.to_string(),
                settings.long_break_interval.to_string(),
            ],
            editing_field: 0,
        }
    }

    /// Parse the typed values; unparseable fields are left out of the update
    pub fn to_update(&self) -> TimerSettingsUpdate {
        TimerSettingsUpdate {
            work_minutes: parse_setting(&self.values[0], MAX_DURATION_MINUTES),
            short_break_minutes: parse_setting(&self.values[1], MAX_DURATION_MINUTES),
            long_break_minutes: parse_setting(&self.values[2], MAX_DURATION_MINUTES),
            long_break_interval: parse_setting(&self.values[3], MAX_LONG_BREAK_INTERVAL),
        }
    }
}

/// Inline title editor for an existing task
#[derive(Debug, Clone)]
pub struct TitleEditState {
    pub task_id: TaskId,
    pub buffer: String,
}

/// Main application state
pub struct AppState {
    pub store: Store,
    pub timer: TimerController,
    pub config: AppConfig,
    /// Where snapshots are written; None keeps everything in memory
    pub state_path: Option<PathBuf>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub task_form: Option<TaskFormState>,
    pub settings_form: Option<SettingsFormState>,
    pub title_edit: Option<TitleEditState>,
    pub pending_delete: Option<TaskId>,
    pub status_message: Option<String>,
    pub last_save_error: Option<String>,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        let timer = TimerController::new(&store.timer_settings());

        Self {
            store,
            timer,
            config,
            state_path: None,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            task_form: None,
            settings_form: None,
            title_edit: None,
            pending_delete: None,
            status_message: None,
            last_save_error: None,
        }
    }

    pub fn with_state_path(mut self, path: PathBuf) -> Self {
        self.state_path = Some(path);
        self
    }

    /// Tasks in display order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.store.sorted_tasks()
    }

    /// Get the currently selected task
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id)
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.store.state().active_task()
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.tasks().len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection on a task after it moved in the sorted list
    fn follow_task(&mut self, id: TaskId) {
        let pos = self.visible_tasks().iter().position(|t| t.id == id);
        if let Some(pos) = pos {
            self.selected_index = pos;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Toggle completion of the selected task
    pub fn toggle_complete_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id;
        let completing = !task.completed;
        let title = task.title.clone();

        self.store.update_task(id, TaskUpdate::completed(completing));
        if completing {
            self.status_message = Some(format!("Completed: {}", title));
            if self.config.notifications {
                notifications::notify_task_completed(&title);
            }
        }
        self.follow_task(id);
    }

    /// Make the selected task the focus of the timer
    pub fn focus_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.set_active_task(Some(id));
        }
    }

    pub fn clear_focus(&mut self) {
        if self.store.active_task_id().is_some() {
            self.store.set_active_task(None);
        }
    }

    /// Ask for confirmation before deleting the selected task
    pub fn start_delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.pending_delete = Some(id);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.store.delete_task(id);
            self.clamp_selection();
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Start adding a new task
    pub fn start_add_task(&mut self) {
        self.task_form = Some(TaskFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn task_form_next_field(&mut self) {
        if let Some(form) = &mut self.task_form {
            form.editing_field = form.editing_field.next();
        }
    }

    /// Cycle the priority/category selector; text fields ignore it
    pub fn task_form_cycle(&mut self, forward: bool) {
        if let Some(form) = &mut self.task_form {
            match form.editing_field {
                FormField::Priority => {
                    form.priority = if forward {
                        form.priority.next()
                    } else {
                        form.priority.prev()
                    };
                }
                FormField::Category => {
                    form.category = if forward {
                        form.category.next()
                    } else {
                        form.category.prev()
                    };
                }
                FormField::Title | FormField::Description => {}
            }
        }
    }

    pub fn task_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.task_form {
            match form.editing_field {
                FormField::Title => form.title.push(c),
                FormField::Description => form.description.push(c),
                FormField::Priority | FormField::Category => {}
            }
            form.error = None;
        }
    }

    pub fn task_form_backspace(&mut self) {
        if let Some(form) = &mut self.task_form {
            match form.editing_field {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Description => {
                    form.description.pop();
                }
                FormField::Priority | FormField::Category => {}
            }
        }
    }

    /// Create the task from the form. A blank title keeps the form open.
    pub fn submit_task_form(&mut self) {
        let Some(form) = &mut self.task_form else {
            return;
        };

        if form.title.trim().is_empty() {
            form.error = Some("Title is required".to_string());
            return;
        }

        let new = NewTask {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            priority: form.priority,
            category: form.category,
            completed: false,
        };
        self.task_form = None;
        self.ui_mode = UiMode::Normal;

        let id = self.store.add_task(new);
        self.follow_task(id);
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Edit the title of the selected task
    pub fn start_edit_title(&mut self) {
        if let Some(task) = self.selected_task() {
            self.title_edit = Some(TitleEditState {
                task_id: task.id,
                buffer: task.title.clone(),
            });
            self.ui_mode = UiMode::EditingTitle;
        }
    }

    pub fn title_edit_add_char(&mut self, c: char) {
        if let Some(edit) = &mut self.title_edit {
            edit.buffer.push(c);
        }
    }

    pub fn title_edit_backspace(&mut self) {
        if let Some(edit) = &mut self.title_edit {
            edit.buffer.pop();
        }
    }

    /// Apply the edited title; an empty title leaves the task unchanged
    pub fn submit_title_edit(&mut self) {
        if let Some(edit) = self.title_edit.take() {
            let title = edit.buffer.trim();
            if !title.is_empty() {
                self.store.update_task(edit.task_id, TaskUpdate::title(title));
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_title_edit(&mut self) {
        self.title_edit = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Open the timer settings panel
    pub fn open_settings(&mut self) {
        self.settings_form = Some(SettingsFormState::from_settings(
            &self.store.timer_settings(),
        ));
        self.ui_mode = UiMode::EditingSettings;
    }

    pub fn settings_next_field(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.editing_field = (form.editing_field + 1) % form.values.len();
        }
    }

    pub fn settings_prev_field(&mut self) {
        if let Some(form) = &mut self.settings_form {
            let len = form.values.len();
            form.editing_field = (form.editing_field + len - 1) % len;
        }
    }

    pub fn settings_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.settings_form {
            form.values[form.editing_field].push(c);
        }
    }

    pub fn settings_backspace(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.values[form.editing_field].pop();
        }
    }

    /// Parse and apply the settings panel
    pub fn submit_settings(&mut self) {
        if let Some(form) = self.settings_form.take() {
            let update = form.to_update();
            if update != TimerSettingsUpdate::default() {
                self.store.update_timer_settings(update);
                self.timer.sync_settings(&self.store.timer_settings());
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_settings(&mut self) {
        self.settings_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_theme(&mut self) {
        self.store.toggle_theme();
    }

    /// Start or pause the timer
    pub fn toggle_timer(&mut self, now: Instant) {
        self.timer.toggle(now);
    }

    /// End the current timer phase immediately
    pub fn skip_phase(&mut self) {
        let change = self.timer.skip(&mut self.store);
        self.on_phase_change(change);
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset(&self.store.timer_settings());
    }

    /// Advance the timer (called every loop iteration)
    pub fn tick(&mut self, now: Instant) {
        if let Some(change) = self.timer.tick(now, &mut self.store) {
            self.on_phase_change(change);
            if self.config.notifications {
                notifications::notify_phase_finished(change.from, change.to);
            }
        }
    }

    fn on_phase_change(&mut self, change: PhaseChange) {
        let message = if change.session_recorded {
            match self.active_task() {
                Some(task) => format!(
                    "Session done for \"{}\" - time for a {}",
                    task.title,
                    change.to.name().to_lowercase()
                ),
                None => format!("Session done - time for a {}", change.to.name().to_lowercase()),
            }
        } else {
            "Break over - back to focus".to_string()
        };
        self.status_message = Some(message);
    }

    /// Write the current snapshot if anything changed since the last save
    pub fn save_if_needed(&mut self) {
        if !self.store.needs_save {
            return;
        }
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "failed to save state");
            self.last_save_error = Some(e.to_string());
        }
    }

    /// Save state to disk
    pub fn save(&mut self) -> Result<()> {
        // Cleared up front so a failing disk is retried on the next mutation, not every tick
        self.store.needs_save = false;

        if let Some(path) = &self.state_path {
            let snapshot = self.store.snapshot();
            save_state(path, &snapshot)?;
            tracing::debug!(revision = self.store.revision(), "state saved");
        }
        self.last_save_error = None;
        Ok(())
    }
}
