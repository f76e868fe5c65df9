use crate::domain::{format_focus_time, sort_tasks};
use crate::persistence::atomic_write;
use crate::report::stats::{calculate_category_stats, calculate_task_list_stats};
use crate::store::StoreState;
use anyhow::Result;
use std::path::Path;

/// Render a markdown summary of the saved state
pub fn generate_summary(state: &StoreState) -> String {
    let stats = state.statistics;
    let list = calculate_task_list_stats(&state.tasks);
    let categories = calculate_category_stats(&state.tasks);

    let mut report = String::new();

    report.push_str("# Pomotask Summary\n\n");

    report.push_str("## Statistics\n\n");
    report.push_str(&format!("- **Tasks Completed:** {}\n", stats.tasks_completed));
    report.push_str(&format!("- **Pomodoros Completed:** {}\n", stats.sessions_completed));
    report.push_str(&format!(
        "- **Total Focus Time:** {}\n\n",
        format_focus_time(stats.total_focus_minutes)
    ));

    report.push_str("## Tasks\n\n");
    report.push_str(&format!(
        "- **Total:** {} (Open: {}, Done: {})\n",
        list.total, list.open, list.done
    ));
    report.push_str(&format!("- **High priority open:** {}\n", list.high_priority_open));
    report.push_str(&format!("- **Sessions on listed tasks:** {}\n", list.sessions_on_tasks));
    if let Some(active) = state.active_task() {
        report.push_str(&format!("- **Focused on:** {}\n", active.title));
    }
    report.push('\n');

    if !categories.is_empty() {
        report.push_str("## By Category\n\n");
        report.push_str("| Category | Tasks | Done | Sessions |\n");
        report.push_str("|----------|-------|------|----------|\n");
        for cat in &categories {
            report.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                cat.category.to_tag(),
                cat.task_count,
                cat.done_count,
                cat.sessions
            ));
        }
        report.push('\n');
    }

    let open: Vec<_> = sort_tasks(&state.tasks)
        .into_iter()
        .filter(|t| !t.completed)
        .collect();
    if !open.is_empty() {
        report.push_str("## Open Tasks\n\n");
        for task in open {
            report.push_str(&format!(
                "- [{}] {} ({}, {} sessions)\n",
                task.priority.to_tag(),
                task.title,
                task.category.to_tag(),
                task.sessions_completed
            ));
        }
    }

    report
}

/// Write the summary to a file
pub fn write_summary(state: &StoreState, output: &Path) -> Result<()> {
    atomic_write(output, &generate_summary(state))
}
