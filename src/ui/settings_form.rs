use crate::app::{AppState, SETTINGS_LABELS};
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

/// Render the timer settings panel
pub fn render_settings_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.settings_form {
        let modal_area = create_modal_area(area, 16);
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];

        for (idx, (label, value)) in SETTINGS_LABELS.iter().zip(form.values.iter()).enumerate() {
            let editing = idx == form.editing_field;
            lines.push(Line::raw(format!("{}:", label)));
            lines.push(Line::from(vec![
                Span::raw(if editing { "> " } else { "  " }),
                Span::styled(value.clone(), modal_title_style()),
                if editing {
                    Span::styled("█", modal_title_style())
                } else {
                    Span::raw("")
                },
            ]));
            lines.push(Line::raw(""));
        }

        lines.push(Line::raw("Non-numeric values are ignored; values below 1 become 1."));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" ⚙ Timer Settings ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
