use crate::domain::{Priority, Theme, TimerPhase};
use ratatui::style::{Color, Modifier, Style};

/// Base colors for a theme
struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::DarkGray,
        },
        Theme::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            muted: Color::Gray,
        },
    }
}

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default().fg(p.fg).bg(p.bg)
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default()
        .fg(p.bg)
        .bg(p.accent)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).accent)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).muted)
}

/// Keybinding hint style
pub fn hint_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).muted)
}

/// Completed task style
pub fn done_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).muted)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Marker for the task the timer is focused on
pub fn active_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Priority badge colors (red / yellow / green)
pub fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Countdown color per phase
pub fn phase_style(phase: TimerPhase) -> Style {
    let color = match phase {
        TimerPhase::Working => Color::Red,
        TimerPhase::ShortBreak => Color::Green,
        TimerPhase::LongBreak => Color::Blue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Timer gauge style
pub fn gauge_style(phase: TimerPhase) -> Style {
    Style::default()
        .fg(phase_style(phase).fg.unwrap_or(Color::Green))
        .bg(Color::DarkGray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
