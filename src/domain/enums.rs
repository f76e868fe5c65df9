use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse priority from a label like "high"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Next value when cycling through the form selector
    pub fn next(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Shopping,
    Health,
    Other,
}

impl Category {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "shopping" => Some(Self::Shopping),
            "health" => Some(Self::Health),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// Get all categories as a list
    pub fn all() -> &'static [Category] {
        &[
            Category::Work,
            Category::Personal,
            Category::Shopping,
            Category::Health,
            Category::Other,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Phase of the focus timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Working,
    ShortBreak,
    LongBreak,
}

impl TimerPhase {
    /// Get the emoji symbol for this phase
    pub fn symbol(&self) -> &'static str {
        match self {
            TimerPhase::Working => "🍅",
            TimerPhase::ShortBreak => "☕",
            TimerPhase::LongBreak => "🌴",
        }
    }

    /// Get the display name for this phase
    pub fn name(&self) -> &'static str {
        match self {
            TimerPhase::Working => "Focus",
            TimerPhase::ShortBreak => "Short break",
            TimerPhase::LongBreak => "Long break",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTitle,
    EditingSettings,
    ConfirmDelete,
}
