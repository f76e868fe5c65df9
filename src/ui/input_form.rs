use crate::app::{AppState, FormField};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label line for a form field, marking the one being edited
fn field_label(label: &str, editing: bool) -> Line<'static> {
    if editing {
        Line::raw(format!("{}: (editing)", label))
    } else {
        Line::raw(format!("{}:", label))
    }
}

/// Value line for a text field, with a cursor when editing
fn text_value(value: &str, editing: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style())
        } else {
            Span::raw("")
        },
    ])
}

/// Value line for a selector field
fn choice_value(value: &str, editing: bool) -> Line<'static> {
    if editing {
        Line::from(vec![
            Span::raw("< "),
            Span::styled(value.to_string(), modal_title_style()),
            Span::raw(" >"),
        ])
    } else {
        Line::from(vec![Span::raw("  "), Span::styled(value.to_string(), modal_title_style())])
    }
}

/// Render the add-task form
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.task_form {
        let modal_area = create_modal_area(area, 18);
        f.render_widget(Clear, modal_area);

        let editing = form.editing_field;
        let mut lines = Vec::new();

        lines.push(Line::raw(""));
        lines.push(field_label("Title", editing == FormField::Title));
        lines.push(text_value(&form.title, editing == FormField::Title));
        lines.push(Line::raw(""));

        lines.push(field_label("Description (optional)", editing == FormField::Description));
        lines.push(text_value(&form.description, editing == FormField::Description));
        lines.push(Line::raw(""));

        lines.push(field_label("Priority", editing == FormField::Priority));
        lines.push(choice_value(form.priority.to_tag(), editing == FormField::Priority));
        lines.push(Line::raw(""));

        lines.push(field_label("Category", editing == FormField::Category));
        lines.push(choice_value(form.category.to_tag(), editing == FormField::Category));
        lines.push(Line::raw(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(error.clone(), error_style())));
        }
        lines.push(Line::raw("Tab to switch fields  ·  Enter to add  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Add Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the title editor for an existing task
pub fn render_title_editor(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(edit) = &app.title_edit {
        let modal_area = create_modal_area(area, 7);
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw("Edit task title:"),
            text_value(&edit.buffer, true),
            Line::raw(""),
            Line::raw("Enter to save  ·  Esc to cancel"),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Edit Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
