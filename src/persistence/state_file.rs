use super::files::{atomic_write, backup_file};
use crate::store::StoreState;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version written into the persisted record
pub const STATE_VERSION: u32 = 1;

/// On-disk envelope around the store state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    pub state: StoreState,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read state file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state file {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the persisted state. A missing file yields `Ok(None)`.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<Option<StoreState>, LoadError> {
    let path = path.as_ref();

    // Read raw bytes so invalid UTF-8 surfaces as corrupt data, not an io error
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let persisted: PersistedState =
        serde_json::from_slice(&content).map_err(|source| LoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(persisted.state))
}

/// Load the persisted state, falling back to `fallback` when it is missing or
/// cannot be loaded. An unloadable file is backed up first so it is not overwritten.
pub fn load_or_default<P: AsRef<Path>>(path: P, fallback: StoreState) -> StoreState {
    let path = path.as_ref();

    match load_state(path) {
        Ok(Some(state)) => {
            tracing::info!(path = %path.display(), tasks = state.tasks.len(), "state loaded");
            state
        }
        Ok(None) => {
            tracing::info!(path = %path.display(), "no saved state, starting fresh");
            fallback
        }
        Err(e) => {
            // The next save replaces the file, so keep a copy of whatever is there
            tracing::error!(error = %e, "discarding unloadable state");
            match backup_file(path) {
                Ok(backup) => tracing::warn!(backup = %backup.display(), "state file backed up"),
                Err(e) => tracing::error!(error = %e, "failed to back up state file"),
            }
            fallback
        }
    }
}

/// Write the state record atomically
pub fn save_state<P: AsRef<Path>>(path: P, state: &StoreState) -> Result<()> {
    let persisted = PersistedState {
        state: state.clone(),
        version: STATE_VERSION,
    };
    let json = serde_json::to_string_pretty(&persisted)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, Theme, TimerSettings};
    use crate::store::Store;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_state() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");

        assert!(load_state(&path).unwrap().is_none());
        assert_eq!(load_or_default(&path, StoreState::default()), StoreState::default());
    }

    #[test]
    fn test_save_and_load_state() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut store = Store::default();
        let id = store.add_task(NewTask::titled("Persist me"));
        store.set_active_task(Some(id));
        store.increment_session(id);
        store.toggle_theme();

        save_state(&path, store.state()).unwrap();
        let loaded = load_state(&path).unwrap().unwrap();

        assert_eq!(&loaded, store.state());
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.active_task_id, Some(id));
    }

    #[test]
    fn test_corrupt_state_falls_back_and_backs_up() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        atomic_write(&path, "{ not json").unwrap();

        assert!(matches!(load_state(&path), Err(LoadError::Corrupt { .. })));

        let fallback = StoreState::with_settings(TimerSettings {
            work_minutes: 50,
            ..TimerSettings::default()
        });
        let state = load_or_default(&path, fallback.clone());
        assert_eq!(state, fallback);

        assert_eq!(backup_count(temp_dir.path()), 1);
    }

    fn backup_count(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .count()
    }

    #[test]
    fn test_invalid_utf8_is_corrupt_and_backed_up() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, b"{\"state\":{\"tasks\":[\xff\xfe]}}").unwrap();

        assert!(matches!(load_state(&path), Err(LoadError::Corrupt { .. })));

        let state = load_or_default(&path, StoreState::default());
        assert_eq!(state, StoreState::default());
        assert_eq!(backup_count(temp_dir.path()), 1);
    }

    #[test]
    fn test_cleared_settings_keep_tasks() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let blob = r#"{
            "state": {
                "tasks": [{
                    "id": "6f1c1f63-5b8c-4c1e-9a4e-0d6a3b2f7e11",
                    "title": "Write tests",
                    "createdAt": 1714554000000
                }],
                "timerSettings": {
                    "workDuration": null,
                    "shortBreakDuration": -5,
                    "longBreakDuration": 15,
                    "longBreakInterval": 4
                },
                "statistics": {
                    "tasksCompleted": 3,
                    "pomodorosCompleted": 7,
                    "totalWorkMinutes": 175
                }
            },
            "version": 0
        }"#;
        atomic_write(&path, blob).unwrap();

        let state = load_or_default(&path, StoreState::default());

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.statistics.sessions_completed, 7);
        assert_eq!(state.timer_settings.work_minutes, 25);
        assert_eq!(state.timer_settings.short_break_minutes, 1);
        assert_eq!(backup_count(temp_dir.path()), 0);
    }

    #[test]
    fn test_load_browser_blob_format() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let blob = r#"{
            "state": {
                "tasks": [{
                    "id": "6f1c1f63-5b8c-4c1e-9a4e-0d6a3b2f7e11",
                    "title": "Buy milk",
                    "description": "",
                    "completed": false,
                    "priority": "low",
                    "category": "shopping",
                    "createdAt": 1714554000000,
                    "pomodorosCompleted": 2
                }],
                "activeTaskId": null,
                "timerSettings": {
                    "workDuration": 30,
                    "shortBreakDuration": 5,
                    "longBreakDuration": 20,
                    "longBreakInterval": 3
                },
                "statistics": {
                    "tasksCompleted": 1,
                    "pomodorosCompleted": 2,
                    "totalWorkMinutes": 60
                },
                "theme": "dark"
            },
            "version": 0
        }"#;
        atomic_write(&path, blob).unwrap();

        let state = load_state(&path).unwrap().unwrap();

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].sessions_completed, 2);
        assert!(state.tasks[0].completed_at.is_none());
        assert_eq!(state.timer_settings.work_minutes, 30);
        assert_eq!(state.statistics.total_focus_minutes, 60);
        assert_eq!(state.theme, Theme::Dark);
    }
}
