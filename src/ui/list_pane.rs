use crate::app::AppState;
use crate::domain::{completion_glyph, priority_badge, Task, Theme};
use crate::ui::styles::{
    active_style, border_style, default_style, done_style, priority_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.store.theme();
    let active_id = app.store.active_task_id();
    let tasks = app.visible_tasks();
    let open = tasks.iter().filter(|t| !t.completed).count();

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Line::raw("  No tasks yet. Press 'a' to add one."))
            .style(default_style(theme))]
    } else {
        tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let is_active = active_id == Some(task.id);
                let line = create_task_line(task, is_active, app.config.use_emoji, theme);
                let style = if idx == app.selected_index {
                    selected_style(theme)
                } else {
                    default_style(theme)
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let title = format!(" Tasks ({} open / {} total) ", open, tasks.len());

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(theme))
            .style(default_style(theme))
            .title(Span::styled(title, title_style(theme))),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: ⬜ [HIGH] Write proposal  🍅 2  ◀ focus  (work)
fn create_task_line(task: &Task, is_active: bool, use_emoji: bool, theme: Theme) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(format!(" {} ", completion_glyph(task.completed, use_emoji))));

    spans.push(Span::styled(
        format!("{} ", priority_badge(task.priority)),
        priority_style(task.priority),
    ));

    if task.completed {
        spans.push(Span::styled(task.title.clone(), done_style(theme)));
    } else {
        spans.push(Span::raw(task.title.clone()));
    }

    let sessions = if use_emoji {
        format!("  🍅 {}", task.sessions_completed)
    } else {
        format!("  ({} sessions)", task.sessions_completed)
    };
    spans.push(Span::raw(sessions));

    spans.push(Span::raw(format!("  ({})", task.category.to_tag())));

    if is_active {
        spans.push(Span::styled("  ◀ focus".to_string(), active_style()));
    }

    Line::from(spans)
}
