use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub stats_area: Rect,
    pub timer_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Header: Statistics (40%) | Timer (60%)
/// - Main area: Task list (65%) | Details (35%)
/// - Bottom bar: status message (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(7), // Statistics + timer
            Constraint::Min(0),    // Task list + details
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);

    MainLayout {
        keybindings_area: rows[0],
        stats_area: header[0],
        timer_area: header[1],
        list_area: main[0],
        details_area: main[1],
        status_area: rows[3],
    }
}

/// Create centered modal area with the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
