pub mod enums;
pub mod settings;
pub mod stats;
pub mod task;
pub mod views;

pub use enums::{Category, Priority, Theme, TimerPhase, UiMode};
pub use settings::{
    parse_setting, TimerSettings, TimerSettingsUpdate, MAX_DURATION_MINUTES,
    MAX_LONG_BREAK_INTERVAL,
};
pub use stats::Statistics;
pub use task::{NewTask, Task, TaskId, TaskUpdate};
pub use views::{completion_glyph, format_clock, format_focus_time, priority_badge, sort_tasks};
