use crate::app::AppState;
use crate::ui::styles::{active_style, border_style, default_style, priority_style, title_style};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.store.theme();
    let mut lines = Vec::new();

    if let Some(task) = app.selected_task() {
        lines.push(Line::from(Span::styled(task.title.clone(), title_style(theme))));
        lines.push(Line::raw(""));

        if task.description.is_empty() {
            lines.push(Line::raw("(no description)"));
        } else {
            lines.push(Line::raw(task.description.clone()));
        }
        lines.push(Line::raw(""));

        lines.push(Line::from(vec![
            Span::raw("Priority: "),
            Span::styled(task.priority.to_tag(), priority_style(task.priority)),
        ]));
        lines.push(Line::raw(format!("Category: {}", task.category.to_tag())));
        lines.push(Line::raw(format!("Sessions: {}", task.sessions_completed)));
        lines.push(Line::raw(format!("Created:  {}", format_timestamp(task.created_at))));
        if let Some(done_at) = task.completed_at {
            lines.push(Line::raw(format!("Done:     {}", format_timestamp(done_at))));
        }

        if app.store.active_task_id() == Some(task.id) {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("Timer is focused on this task", active_style())));
        }
    } else {
        lines.push(Line::raw("No task selected"));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme))
                .style(default_style(theme))
                .title(Span::styled(" Details ", title_style(theme))),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
