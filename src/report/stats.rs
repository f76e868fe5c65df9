use crate::domain::{Category, Priority, Task};

/// Per-category statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub task_count: usize,
    pub done_count: usize,
    pub sessions: u64,
}

/// Task counts over the current list (the running counters live in `Statistics`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListStats {
    pub total: usize,
    pub open: usize,
    pub done: usize,
    pub high_priority_open: usize,
    pub sessions_on_tasks: u64,
}

/// Calculate counts across the task list
pub fn calculate_task_list_stats(tasks: &[Task]) -> TaskListStats {
    let done = tasks.iter().filter(|t| t.completed).count();
    TaskListStats {
        total: tasks.len(),
        open: tasks.len() - done,
        done,
        high_priority_open: tasks
            .iter()
            .filter(|t| !t.completed && t.priority == Priority::High)
            .count(),
        sessions_on_tasks: tasks.iter().map(|t| u64::from(t.sessions_completed)).sum(),
    }
}

/// Calculate statistics for every category that has at least one task
pub fn calculate_category_stats(tasks: &[Task]) -> Vec<CategoryStats> {
    Category::all()
        .iter()
        .map(|&category| {
            let in_category: Vec<&Task> = tasks.iter().filter(|t| t.category == category).collect();
            CategoryStats {
                category,
                task_count: in_category.len(),
                done_count: in_category.iter().filter(|t| t.completed).count(),
                sessions: in_category.iter().map(|t| u64::from(t.sessions_completed)).sum(),
            }
        })
        .filter(|s| s.task_count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn task(category: Category, priority: Priority, completed: bool, sessions: u32) -> Task {
        let new = NewTask {
            title: "t".to_string(),
            category,
            priority,
            completed,
            ..NewTask::default()
        };
        let mut task = Task::from_new(new, Utc::now());
        task.sessions_completed = sessions;
        task
    }

    #[test]
    fn test_task_list_stats() {
        let tasks = vec![
            task(Category::Work, Priority::High, false, 3),
            task(Category::Work, Priority::High, true, 1),
            task(Category::Health, Priority::Low, false, 0),
        ];

        let stats = calculate_task_list_stats(&tasks);
        assert_eq!(
            stats,
            TaskListStats {
                total: 3,
                open: 2,
                done: 1,
                high_priority_open: 1,
                sessions_on_tasks: 4,
            }
        );
    }

    #[test]
    fn test_category_stats_skips_empty() {
        let tasks = vec![
            task(Category::Work, Priority::Medium, true, 2),
            task(Category::Shopping, Priority::Medium, false, 0),
        ];

        let stats = calculate_category_stats(&tasks);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, Category::Work);
        assert_eq!(stats[0].done_count, 1);
        assert_eq!(stats[0].sessions, 2);
        assert_eq!(stats[1].category, Category::Shopping);
    }
}
