use crate::domain::{TimerPhase, TimerSettings};
use crate::store::Store;
use std::time::{Duration, Instant};

/// The one tick source of a running timer.
///
/// Owned by the controller while running and dropped on pause, so there is
/// never more than one.
#[derive(Debug)]
struct Ticker {
    /// Instant up to which elapsed time has been accounted for
    anchor: Instant,
}

impl Ticker {
    fn start(now: Instant) -> Self {
        Self { anchor: now }
    }

    /// Consume whole seconds elapsed since the last call, keeping the remainder
    fn take_seconds(&mut self, now: Instant) -> u64 {
        let secs = now.saturating_duration_since(self.anchor).as_secs();
        self.anchor += Duration::from_secs(secs);
        secs
    }
}

/// Result of a phase ending, either by countdown or skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: TimerPhase,
    pub to: TimerPhase,
    /// True when a focus session was recorded in the store
    pub session_recorded: bool,
}

/// Length of a phase in seconds for the given settings
pub fn phase_seconds(phase: TimerPhase, settings: &TimerSettings) -> u64 {
    let minutes = match phase {
        TimerPhase::Working => settings.work_minutes,
        TimerPhase::ShortBreak => settings.short_break_minutes,
        TimerPhase::LongBreak => settings.long_break_minutes,
    };
    u64::from(minutes) * 60
}

/// Pomodoro countdown and work/break phase switching
#[derive(Debug)]
pub struct TimerController {
    phase: TimerPhase,
    remaining_secs: u64,
    phase_length_secs: u64,
    sessions_completed: u32,
    ticker: Option<Ticker>,
}

impl TimerController {
    pub fn new(settings: &TimerSettings) -> Self {
        let length = phase_seconds(TimerPhase::Working, settings);
        Self {
            phase: TimerPhase::Working,
            remaining_secs: length,
            phase_length_secs: length,
            sessions_completed: 0,
            ticker: None,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Focus sessions completed since the timer was created
    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Fraction of the current phase already elapsed (0.0 - 1.0)
    pub fn progress_ratio(&self) -> f64 {
        if self.phase_length_secs == 0 {
            return 0.0;
        }
        let elapsed = self.phase_length_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.phase_length_secs as f64).min(1.0)
    }

    /// Start the countdown. Starting an already running timer does nothing.
    pub fn start(&mut self, now: Instant) {
        if self.ticker.is_some() {
            return;
        }
        self.ticker = Some(Ticker::start(now));
        tracing::debug!(phase = ?self.phase, remaining = self.remaining_secs, "timer started");
    }

    /// Stop the countdown; no further ticks are counted until the next start
    pub fn pause(&mut self) {
        if self.ticker.take().is_some() {
            tracing::debug!(phase = ?self.phase, remaining = self.remaining_secs, "timer paused");
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Advance the countdown by the whole seconds elapsed since the last tick.
    ///
    /// Reaching zero ends the phase exactly once and pauses the timer.
    pub fn tick(&mut self, now: Instant, store: &mut Store) -> Option<PhaseChange> {
        let ticker = self.ticker.as_mut()?;
        let secs = ticker.take_seconds(now);
        if secs == 0 {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs == 0 {
            Some(self.complete_phase(store))
        } else {
            None
        }
    }

    /// End the current phase immediately
    pub fn skip(&mut self, store: &mut Store) -> PhaseChange {
        self.complete_phase(store)
    }

    /// Restore the full length of the current phase and pause
    pub fn reset(&mut self, settings: &TimerSettings) {
        self.ticker = None;
        self.phase_length_secs = phase_seconds(self.phase, settings);
        self.remaining_secs = self.phase_length_secs;
    }

    /// Follow new settings when the current phase has not started yet
    pub fn sync_settings(&mut self, settings: &TimerSettings) {
        if !self.is_running() && self.remaining_secs == self.phase_length_secs {
            self.reset(settings);
        }
    }

    fn complete_phase(&mut self, store: &mut Store) -> PhaseChange {
        let from = self.phase;
        let settings = store.timer_settings();

        let (to, session_recorded) = match from {
            TimerPhase::Working => {
                match store.active_task_id() {
                    Some(id) => store.increment_session(id),
                    None => store.record_session(),
                }
                self.sessions_completed += 1;

                let interval = settings.long_break_interval.max(1);
                if self.sessions_completed % interval == 0 {
                    (TimerPhase::LongBreak, true)
                } else {
                    (TimerPhase::ShortBreak, true)
                }
            }
            TimerPhase::ShortBreak | TimerPhase::LongBreak => (TimerPhase::Working, false),
        };

        self.phase = to;
        self.ticker = None;
        self.phase_length_secs = phase_seconds(to, &settings);
        self.remaining_secs = self.phase_length_secs;

        tracing::info!(
            ?from,
            ?to,
            sessions = self.sessions_completed,
            "timer phase finished"
        );

        PhaseChange {
            from,
            to,
            session_recorded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, TimerSettingsUpdate};

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn quick_store() -> Store {
        let mut store = Store::default();
        store.update_timer_settings(TimerSettingsUpdate {
            work_minutes: Some(1),
            short_break_minutes: Some(1),
            long_break_minutes: Some(2),
            long_break_interval: Some(4),
        });
        store
    }

    #[test]
    fn test_new_timer_is_paused_working() {
        let timer = TimerController::new(&TimerSettings::default());
        assert_eq!(timer.phase(), TimerPhase::Working);
        assert_eq!(timer.remaining_secs(), 25 * 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_paused_timer_does_not_tick() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();

        assert!(timer.tick(t0 + secs(30), &mut store).is_none());
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn test_one_decrement_per_second() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();
        timer.start(t0);

        timer.tick(t0 + Duration::from_millis(500), &mut store);
        assert_eq!(timer.remaining_secs(), 60);

        timer.tick(t0 + Duration::from_millis(1200), &mut store);
        assert_eq!(timer.remaining_secs(), 59);

        timer.tick(t0 + Duration::from_millis(1900), &mut store);
        assert_eq!(timer.remaining_secs(), 59);

        timer.tick(t0 + Duration::from_millis(2000), &mut store);
        assert_eq!(timer.remaining_secs(), 58);
    }

    #[test]
    fn test_full_work_countdown_triggers_one_break() {
        let mut store = quick_store();
        let task = store.add_task(NewTask::titled("Focus"));
        store.set_active_task(Some(task));

        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();
        timer.start(t0);

        let changes: Vec<PhaseChange> = (1..=60)
            .filter_map(|i| timer.tick(t0 + secs(i), &mut store))
            .collect();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].from, TimerPhase::Working);
        assert_eq!(changes[0].to, TimerPhase::ShortBreak);
        assert_eq!(store.statistics().sessions_completed, 1);
        assert_eq!(store.tasks()[0].sessions_completed, 1);
        assert_eq!(timer.phase(), TimerPhase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_overshoot_stops_at_zero_once() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();
        timer.start(t0);

        let change = timer.tick(t0 + secs(500), &mut store);
        assert!(change.is_some());
        assert!(timer.tick(t0 + secs(1000), &mut store).is_none());
        assert_eq!(store.statistics().sessions_completed, 1);
    }

    #[test]
    fn test_break_returns_to_working() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        timer.skip(&mut store);
        assert_eq!(timer.phase(), TimerPhase::ShortBreak);

        let t0 = Instant::now();
        timer.start(t0);
        let change = timer.tick(t0 + secs(60), &mut store).unwrap();

        assert_eq!(change.to, TimerPhase::Working);
        assert!(!change.session_recorded);
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(store.statistics().sessions_completed, 1);
    }

    #[test]
    fn test_next_phase_starts_from_full_length() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(60), &mut store).unwrap();

        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.progress_ratio(), 0.0);

        let t1 = t0 + secs(100);
        timer.start(t1);
        assert!(timer.tick(t1 + secs(59), &mut store).is_none());
        assert_eq!(timer.remaining_secs(), 1);
    }

    #[test]
    fn test_long_break_every_interval() {
        let mut store = Store::default();
        let mut timer = TimerController::new(&store.timer_settings());
        let mut break_lengths = Vec::new();

        for _ in 0..8 {
            let change = timer.skip(&mut store);
            assert!(change.from == TimerPhase::Working);
            break_lengths.push(timer.remaining_secs() / 60);
            timer.skip(&mut store);
        }

        assert_eq!(break_lengths, vec![5, 5, 5, 15, 5, 5, 5, 15]);
        assert_eq!(store.statistics().sessions_completed, 8);
        assert_eq!(store.statistics().total_focus_minutes, 200);
    }

    #[test]
    fn test_skip_without_active_task_records_aggregate() {
        let mut store = Store::default();
        store.add_task(NewTask::titled("Not focused"));
        let mut timer = TimerController::new(&store.timer_settings());

        let change = timer.skip(&mut store);

        assert!(change.session_recorded);
        assert_eq!(store.statistics().sessions_completed, 1);
        assert_eq!(store.tasks()[0].sessions_completed, 0);
    }

    #[test]
    fn test_start_twice_keeps_single_ticker() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();

        timer.start(t0);
        timer.start(t0 + secs(10));
        timer.tick(t0 + secs(10), &mut store);

        // Second start did not re-anchor the tick source
        assert_eq!(timer.remaining_secs(), 50);
    }

    #[test]
    fn test_pause_cancels_ticks() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();

        timer.start(t0);
        timer.tick(t0 + secs(5), &mut store);
        timer.toggle(t0 + secs(5));
        assert!(!timer.is_running());

        timer.tick(t0 + secs(30), &mut store);
        assert_eq!(timer.remaining_secs(), 55);

        timer.toggle(t0 + secs(40));
        timer.tick(t0 + secs(42), &mut store);
        assert_eq!(timer.remaining_secs(), 53);
    }

    #[test]
    fn test_reset_restores_phase_length() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(20), &mut store);

        timer.reset(&store.timer_settings());

        assert_eq!(timer.remaining_secs(), 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_sync_settings_only_before_phase_starts() {
        let mut store = Store::default();
        let mut timer = TimerController::new(&store.timer_settings());

        store.update_timer_settings(TimerSettingsUpdate {
            work_minutes: Some(50),
            ..Default::default()
        });
        timer.sync_settings(&store.timer_settings());
        assert_eq!(timer.remaining_secs(), 50 * 60);

        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(3), &mut store);
        timer.pause();

        store.update_timer_settings(TimerSettingsUpdate {
            work_minutes: Some(10),
            ..Default::default()
        });
        timer.sync_settings(&store.timer_settings());
        assert_eq!(timer.remaining_secs(), 50 * 60 - 3);
    }

    #[test]
    fn test_progress_ratio() {
        let mut store = quick_store();
        let mut timer = TimerController::new(&store.timer_settings());
        assert_eq!(timer.progress_ratio(), 0.0);

        let t0 = Instant::now();
        timer.start(t0);
        timer.tick(t0 + secs(30), &mut store);
        assert!((timer.progress_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
