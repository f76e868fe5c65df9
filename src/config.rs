use crate::domain::TimerSettings;
use crate::persistence::{config_file, read_file};
use crate::ticker::DEFAULT_TICK_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User configuration read from config.toml in the data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Main loop poll interval in milliseconds
    pub tick_ms: u64,
    /// tracing filter directive, overridden by RUST_LOG
    pub log_filter: String,
    /// Desktop notification when a timer phase ends
    pub notifications: bool,
    /// Emoji glyphs in the task list and statistics; false falls back to ASCII
    pub use_emoji: bool,
    /// Timer settings used when there is no saved state yet
    pub timer: TimerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            log_filter: "pomotask=info".to_string(),
            notifications: true,
            use_emoji: true,
            timer: TimerSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the data directory. Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(config_file()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let Some(raw) = read_file(path)? else {
            return Ok(Self::default());
        };
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config.timer = config.timer.clamped();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig::load_from(temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"tick_ms = 100
notifications = false

[timer]
workDuration = 50
shortBreakDuration = 10
longBreakDuration = 30
longBreakInterval = 0
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.tick_ms, 100);
        assert!(!config.notifications);
        assert!(config.use_emoji);
        assert_eq!(config.log_filter, "pomotask=info");
        assert_eq!(config.timer.work_minutes, 50);
        assert_eq!(config.timer.long_break_interval, 1);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "tick_ms = \"fast\"").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
