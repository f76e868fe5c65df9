use super::enums::Priority;
use super::task::Task;
use std::cmp::Ordering;

/// Ordering used by the task list: incomplete tasks first, then newest first
pub fn task_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Tasks in display order
pub fn sort_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| task_order(a, b));
    sorted
}

/// Format remaining seconds as MM:SS
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format total focus minutes as "Xh Ym"
pub fn format_focus_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Badge shown next to a task title
pub fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "[HIGH]",
        Priority::Medium => "[MED]",
        Priority::Low => "[LOW]",
    }
}

/// Checkbox glyph for a task row
pub fn completion_glyph(completed: bool, use_emoji: bool) -> &'static str {
    match (completed, use_emoji) {
        (true, true) => "✅",
        (false, true) => "⬜",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn task_at(title: &str, minutes: i64, completed: bool) -> Task {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut new = NewTask::titled(title);
        new.completed = completed;
        Task::from_new(new, base + Duration::minutes(minutes))
    }

    #[test]
    fn test_sort_incomplete_first_newest_first() {
        let tasks = vec![
            task_at("old open", 0, false),
            task_at("old done", 1, true),
            task_at("new open", 2, false),
            task_at("new done", 3, true),
        ];

        let titles: Vec<&str> = sort_tasks(&tasks).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["new open", "old open", "new done", "old done"]);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn test_format_focus_time() {
        assert_eq!(format_focus_time(0), "0h 0m");
        assert_eq!(format_focus_time(95), "1h 35m");
        assert_eq!(format_focus_time(120), "2h 0m");
    }

    #[test]
    fn test_completion_glyph() {
        assert_eq!(completion_glyph(true, false), "[x]");
        assert_eq!(completion_glyph(false, false), "[ ]");
    }
}
