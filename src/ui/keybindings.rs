use crate::domain::{Theme, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hints for the current mode
fn hints(mode: UiMode) -> &'static [&'static str] {
    match mode {
        UiMode::Normal => &[
            " ↑/↓ select   ",
            "Enter done   ",
            "f focus   ",
            "a add   ",
            "e edit   ",
            "x delete   ",
            "s start/pause   ",
            "n skip   ",
            "r reset   ",
            "o settings   ",
            "t theme   ",
            "q quit",
        ],
        UiMode::AddingTask => &[
            " Tab next field   ",
            "←/→ change   ",
            "Enter add   ",
            "Esc cancel",
        ],
        UiMode::EditingSettings => &[" Tab/↑/↓ field   ", "Enter save   ", "Esc cancel"],
        UiMode::EditingTitle => &[" Enter save   ", "Esc cancel"],
        UiMode::ConfirmDelete => &[" y delete   ", "n keep"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, mode: UiMode, theme: Theme) {
    let spans: Vec<Span> = hints(mode).iter().map(|h| Span::raw(*h)).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style(theme));
    f.render_widget(paragraph, area);
}
