use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the delete confirmation modal
pub fn render_confirm_delete_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmDelete {
        return;
    }
    let Some(task) = app.pending_delete.and_then(|id| app.store.state().find_task(id)) else {
        return;
    };

    let modal_area = create_modal_area(area, 9);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  Delete \"{}\"?", task.title)),
    ];
    if app.store.active_task_id() == Some(task.id) {
        lines.push(Line::raw("  The timer is focused on this task."));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [y]", modal_title_style()),
        Span::raw(" Delete  "),
        Span::styled("[n]", modal_title_style()),
        Span::raw(" Keep"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Delete Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
