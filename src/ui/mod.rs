pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod settings_form;
pub mod stats_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use details_pane::render_details_pane;
use input_form::{render_task_form, render_title_editor};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_confirm_delete_modal;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use settings_form::render_settings_form;
use stats_pane::render_stats_pane;
use styles::{error_style, hint_style};
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let theme = app.store.theme();

    render_keybindings(f, layout.keybindings_area, app.ui_mode, theme);

    render_stats_pane(f, app, layout.stats_area);
    render_timer_pane(f, app, layout.timer_area);
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);

    // Status bar: save errors take precedence over messages
    let status = if let Some(err) = &app.last_save_error {
        Span::styled(format!(" Save failed: {}", err), error_style())
    } else if let Some(msg) = &app.status_message {
        Span::styled(format!(" {}", msg), hint_style(theme))
    } else {
        Span::raw("")
    };
    f.render_widget(Paragraph::new(status), layout.status_area);

    match app.ui_mode {
        UiMode::AddingTask => render_task_form(f, app, size),
        UiMode::EditingTitle => render_title_editor(f, app, size),
        UiMode::EditingSettings => render_settings_form(f, app, size),
        UiMode::ConfirmDelete => render_confirm_delete_modal(f, app, size),
        UiMode::Normal => {}
    }
}
