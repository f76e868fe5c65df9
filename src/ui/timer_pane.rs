use crate::app::AppState;
use crate::domain::format_clock;
use crate::ui::styles::{
    border_style, default_style, gauge_style, hint_style, phase_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the Pomodoro timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.store.theme();
    let timer = &app.timer;
    let phase = timer.phase();

    let state = if timer.is_running() { "running" } else { "paused" };
    let title = format!(" {} {} ({}) ", phase.symbol(), phase.name(), state);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .style(default_style(theme))
        .title(Span::styled(title, title_style(theme)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Focused task
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Progress gauge
            Constraint::Min(0),    // Session count
        ])
        .split(inner);

    let focus_line = match app.active_task() {
        Some(task) => Line::from(vec![
            Span::raw(" Focus: "),
            Span::styled(task.title.clone(), title_style(theme)),
        ]),
        None => Line::from(Span::styled(
            " Select a task to start focusing (f)",
            hint_style(theme),
        )),
    };
    f.render_widget(Paragraph::new(focus_line), rows[0]);

    let clock = Line::from(vec![
        Span::raw(" "),
        Span::styled(format_clock(timer.remaining_secs()), phase_style(phase)),
    ]);
    f.render_widget(Paragraph::new(clock), rows[1]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(phase))
        .ratio(timer.progress_ratio())
        .label("");
    f.render_widget(gauge, rows[2]);

    let interval = app.store.timer_settings().long_break_interval;
    let sessions = Line::from(Span::styled(
        format!(
            " Sessions this run: {}  (long break every {})",
            timer.sessions_completed(),
            interval
        ),
        hint_style(theme),
    ));
    f.render_widget(Paragraph::new(sessions), rows[3]);
}
