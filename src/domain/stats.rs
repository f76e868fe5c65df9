use serde::{Deserialize, Serialize};

/// Running totals; only ever incremented as side effects of store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub tasks_completed: u64,
    #[serde(rename = "pomodorosCompleted")]
    pub sessions_completed: u64,
    #[serde(rename = "totalWorkMinutes")]
    pub total_focus_minutes: u64,
}

impl Statistics {
    pub(crate) fn record_task_completed(&mut self) {
        self.tasks_completed += 1;
    }

    pub(crate) fn record_session(&mut self, work_minutes: u32) {
        self.sessions_completed += 1;
        self.total_focus_minutes += u64::from(work_minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_session_adds_minutes() {
        let mut stats = Statistics::default();
        stats.record_session(25);
        stats.record_session(50);

        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(stats.total_focus_minutes, 75);
        assert_eq!(stats.tasks_completed, 0);
    }

    #[test]
    fn test_serialized_names() {
        let stats = Statistics {
            tasks_completed: 3,
            sessions_completed: 4,
            total_focus_minutes: 100,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["tasksCompleted"], 3);
        assert_eq!(json["pomodorosCompleted"], 4);
        assert_eq!(json["totalWorkMinutes"], 100);
    }
}
