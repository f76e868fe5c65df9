use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Poll interval bounds; above a second the countdown display would skip
const MIN_TICK_MS: u64 = 50;
const MAX_TICK_MS: u64 = 1000;

/// Get the main loop poll interval for a configured tick
pub fn tick_duration(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(DEFAULT_TICK_MS), Duration::from_millis(250));
    }

    #[test]
    fn test_tick_duration_clamped() {
        assert_eq!(tick_duration(0), Duration::from_millis(50));
        assert_eq!(tick_duration(5000), Duration::from_millis(1000));
    }
}
