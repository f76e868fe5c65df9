use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_DURATION_MINUTES: u32 = 240;
pub const MAX_LONG_BREAK_INTERVAL: u32 = 12;

/// Timer configuration, in minutes (interval is a session count)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimerSettings {
    #[serde(rename = "workDuration", deserialize_with = "work_minutes_or_default")]
    pub work_minutes: u32,
    #[serde(
        rename = "shortBreakDuration",
        deserialize_with = "short_break_minutes_or_default"
    )]
    pub short_break_minutes: u32,
    #[serde(
        rename = "longBreakDuration",
        deserialize_with = "long_break_minutes_or_default"
    )]
    pub long_break_minutes: u32,
    #[serde(deserialize_with = "long_break_interval_or_default")]
    pub long_break_interval: u32,
}

/// Any value a settings field may hold in saved data. A cleared input in the
/// browser was saved as `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Read a settings field, clamping numbers into `1..=max` and falling back to
/// `default` for anything that is not a number.
fn lenient_setting<'de, D>(deserializer: D, default: u32, max: u32) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match StoredNumber::deserialize(deserializer)? {
        StoredNumber::Int(n) => Some(n.clamp(1, i64::from(max)) as u32),
        StoredNumber::Float(f) if f.is_finite() => {
            Some(f.round().clamp(1.0, f64::from(max)) as u32)
        }
        StoredNumber::Text(text) => parse_setting(&text, max),
        StoredNumber::Float(_) | StoredNumber::Other(_) => None,
    };
    Ok(value.unwrap_or(default))
}

fn work_minutes_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient_setting(d, TimerSettings::default().work_minutes, MAX_DURATION_MINUTES)
}

fn short_break_minutes_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient_setting(d, TimerSettings::default().short_break_minutes, MAX_DURATION_MINUTES)
}

fn long_break_minutes_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient_setting(d, TimerSettings::default().long_break_minutes, MAX_DURATION_MINUTES)
}

fn long_break_interval_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient_setting(d, TimerSettings::default().long_break_interval, MAX_LONG_BREAK_INTERVAL)
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_interval: 4,
        }
    }
}

impl TimerSettings {
    /// Merge a partial update, clamping every field into its valid range
    pub fn merge(&mut self, update: TimerSettingsUpdate) {
        if let Some(v) = update.work_minutes {
            self.work_minutes = v;
        }
        if let Some(v) = update.short_break_minutes {
            self.short_break_minutes = v;
        }
        if let Some(v) = update.long_break_minutes {
            self.long_break_minutes = v;
        }
        if let Some(v) = update.long_break_interval {
            self.long_break_interval = v;
        }
        *self = self.clamped();
    }

    /// Copy with every field forced into range (used on load too)
    pub fn clamped(&self) -> Self {
        Self {
            work_minutes: self.work_minutes.clamp(1, MAX_DURATION_MINUTES),
            short_break_minutes: self.short_break_minutes.clamp(1, MAX_DURATION_MINUTES),
            long_break_minutes: self.long_break_minutes.clamp(1, MAX_DURATION_MINUTES),
            long_break_interval: self.long_break_interval.clamp(1, MAX_LONG_BREAK_INTERVAL),
        }
    }
}

/// Partial settings update; `None` fields are left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSettingsUpdate {
    pub work_minutes: Option<u32>,
    pub short_break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
    pub long_break_interval: Option<u32>,
}

/// Parse a settings field typed by the user.
///
/// Non-numeric input yields `None` so the setting stays unchanged. Numeric
/// input is clamped to at least 1 and at most `max`.
pub fn parse_setting(input: &str, max: u32) -> Option<u32> {
    let value: i64 = input.trim().parse().ok()?;
    Some(value.clamp(1, max as i64) as u32)
}
