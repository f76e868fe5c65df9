use crate::app::AppState;
use crate::domain::format_focus_time;
use crate::ui::styles::{border_style, default_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the read-only statistics pane
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.store.theme();
    let stats = app.store.statistics();
    let emoji = app.config.use_emoji;

    let label = |icon: &'static str, text: &'static str| {
        if emoji {
            format!(" {} {:<20}", icon, text)
        } else {
            format!(" {:<22}", text)
        }
    };

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw(label("✅", "Tasks completed")),
            Span::styled(stats.tasks_completed.to_string(), title_style(theme)),
        ]),
        Line::from(vec![
            Span::raw(label("🍅", "Pomodoros completed")),
            Span::styled(stats.sessions_completed.to_string(), title_style(theme)),
        ]),
        Line::from(vec![
            Span::raw(label("⏱", "Total focus time")),
            Span::styled(format_focus_time(stats.total_focus_minutes), title_style(theme)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(theme))
            .style(default_style(theme))
            .title(Span::styled(" Statistics ", title_style(theme))),
    );

    f.render_widget(paragraph, area);
}
