use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_task_form_mode(app, key),
        UiMode::EditingTitle => handle_title_edit_mode(app, key),
        UiMode::EditingSettings => handle_settings_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Any key dismisses the last status message
    app.status_message = None;

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Toggle completion
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_complete_selected(),

        // Focus timer on selected task
        KeyCode::Char('f') => app.focus_selected(),
        KeyCode::Char('F') => app.clear_focus(),

        // Task editing
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_title(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.start_delete_selected(),

        // Timer controls
        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_timer(Instant::now()),
        KeyCode::Char('n') | KeyCode::Char('N') => app.skip_phase(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),
        KeyCode::Char('o') | KeyCode::Char('O') => app.open_settings(),

        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_theme(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),

        _ => {}
    }

    Ok(false)
}

/// Handle keys in the add-task form
fn handle_task_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab => app.task_form_next_field(),
        KeyCode::Right => app.task_form_cycle(true),
        KeyCode::Left => app.task_form_cycle(false),
        KeyCode::Backspace => app.task_form_backspace(),
        KeyCode::Char(c) => app.task_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while editing a task title
fn handle_title_edit_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_title_edit(),
        KeyCode::Esc => app.cancel_title_edit(),
        KeyCode::Backspace => app.title_edit_backspace(),
        KeyCode::Char(c) => app.title_edit_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the timer settings panel
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_settings(),
        KeyCode::Esc => app.cancel_settings(),
        KeyCode::Tab | KeyCode::Down => app.settings_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.settings_prev_field(),
        KeyCode::Backspace => app.settings_backspace(),
        KeyCode::Char(c) => app.settings_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the delete confirmation modal
fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{NewTask, Theme, TimerPhase};
    use crate::store::Store;

    fn create_test_app() -> AppState {
        let mut store = Store::default();
        store.add_task(NewTask::titled("Task 1"));
        store.add_task(NewTask::titled("Task 2"));
        let mut config = AppConfig::default();
        config.notifications = false;
        AppState::new(store, config)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert!(app.task_form.is_some());

        // 'q' is text inside the form, not quit
        type_str(&mut app, "quick fix");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(app.task_form.is_none());
        assert_eq!(app.store.tasks().len(), 3);
        assert_eq!(app.selected_task().unwrap().title, "quick fix");
    }

    #[test]
    fn test_handle_complete_and_delete() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.statistics().tasks_completed, 1);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();

        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_timer_keys() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(app.timer.is_running());
        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(!app.timer.is_running());

        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.timer.phase(), TimerPhase::ShortBreak);
    }

    #[test]
    fn test_handle_settings_panel() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('o'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingSettings);

        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        type_str(&mut app, "45");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.store.timer_settings().work_minutes, 45);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_focus_and_theme() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.store.active_task_id(), app.selected_task_id());

        handle_key(&mut app, key(KeyCode::Char('F'))).unwrap();
        assert_eq!(app.store.active_task_id(), None);

        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.store.theme(), Theme::Dark);
    }
}
