use crate::storage::Storage;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const POMODORO_KEY: &str = "pomodoroData";
pub const WORK_SECS: u32 = 25 * 60;
pub const BREAK_SECS: u32 = 5 * 60;

/// Persisted per-day record of completed work sessions. The date is an
/// explicit calendar day so a stale record from yesterday reads as zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Countdown state machine alternating 25-minute work phases with 5-minute
/// breaks. Only the daily count is persisted; the countdown itself resets
/// on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct PomodoroTimer {
    pub is_break: bool,
    pub time_left: u32,
    pub total_time: u32,
    pub running: bool,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroTimer {
    pub fn new() -> Self {
        Self {
            is_break: false,
            time_left: WORK_SECS,
            total_time: WORK_SECS,
            running: false,
        }
    }

    /// Starts or pauses the countdown. While paused, ticks have no effect.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Rewinds the current phase to its full duration and pauses.
    pub fn reset(&mut self) {
        self.time_left = self.total_time;
        self.running = false;
    }

    /// Advances the countdown by one second. Reaching zero flips the phase;
    /// finishing a work phase bumps the persisted daily count by one.
    pub fn tick(&mut self, storage: &mut dyn Storage) {
        if !self.running {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return;
        }
        if self.is_break {
            self.is_break = false;
            self.total_time = WORK_SECS;
            self.time_left = WORK_SECS;
        } else {
            self.is_break = true;
            self.total_time = BREAK_SECS;
            self.time_left = BREAK_SECS;
            record_completed_session(storage);
        }
    }

    /// Remaining share of the current phase, in [0, 100].
    pub fn progress_percent(&self) -> f64 {
        if self.total_time == 0 {
            return 0.0;
        }
        self.time_left as f64 / self.total_time as f64 * 100.0
    }
}

pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Returns today's completed-session count. A record for a different day,
/// a missing key, or malformed JSON all read as zero; storage is only
/// rewritten on the next completed session.
pub fn load_daily_count(storage: &dyn Storage) -> u32 {
    let today = Local::now().date_naive();
    storage
        .load(POMODORO_KEY)
        .and_then(|raw| serde_json::from_str::<DailyCount>(&raw).ok())
        .filter(|record| record.date == today)
        .map(|record| record.count)
        .unwrap_or(0)
}

fn record_completed_session(storage: &mut dyn Storage) {
    let record = DailyCount {
        date: Local::now().date_naive(),
        count: load_daily_count(storage) + 1,
    };
    match serde_json::to_string(&record) {
        Ok(json) => storage.save(POMODORO_KEY, &json),
        Err(err) => eprintln!("Failed to save pomodoro count: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn starts_in_work_phase_paused() {
        let timer = PomodoroTimer::new();
        assert!(!timer.is_break);
        assert!(!timer.running);
        assert_eq!(timer.time_left, 1500);
        assert_eq!(timer.total_time, 1500);
    }

    #[test]
    fn format_time_zero_pads_both_fields() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(309), "05:09");
    }

    #[test]
    fn progress_percent_spans_full_range() {
        let mut timer = PomodoroTimer::new();
        assert_eq!(timer.progress_percent(), 100.0);

        timer.time_left = timer.total_time / 2;
        assert_eq!(timer.progress_percent(), 50.0);

        timer.time_left = 0;
        assert_eq!(timer.progress_percent(), 0.0);
    }

    #[test]
    fn tick_is_inert_while_paused() {
        let mut storage = MemoryStorage::new();
        let mut timer = PomodoroTimer::new();
        timer.tick(&mut storage);
        assert_eq!(timer.time_left, 1500);
    }

    #[test]
    fn tick_counts_down_while_running() {
        let mut storage = MemoryStorage::new();
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        timer.tick(&mut storage);
        timer.tick(&mut storage);
        assert_eq!(timer.time_left, 1498);
        assert!(!timer.is_break);
    }

    #[test]
    fn work_phase_ending_starts_break_and_increments_count() {
        let mut storage = MemoryStorage::new();
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        timer.time_left = 1;

        timer.tick(&mut storage);

        assert!(timer.is_break);
        assert_eq!(timer.time_left, BREAK_SECS);
        assert_eq!(timer.total_time, BREAK_SECS);
        assert_eq!(load_daily_count(&storage), 1);
    }

    #[test]
    fn break_phase_ending_returns_to_work_without_increment() {
        let mut storage = MemoryStorage::new();
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        timer.time_left = 1;
        timer.tick(&mut storage);
        assert_eq!(load_daily_count(&storage), 1);

        timer.time_left = 1;
        timer.tick(&mut storage);

        assert!(!timer.is_break);
        assert_eq!(timer.time_left, WORK_SECS);
        assert_eq!(timer.total_time, WORK_SECS);
        assert_eq!(load_daily_count(&storage), 1);
    }

    #[test]
    fn completed_sessions_accumulate_within_a_day() {
        let mut storage = MemoryStorage::new();
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        for _ in 0..3 {
            timer.time_left = 1;
            timer.tick(&mut storage); // work ends
            timer.time_left = 1;
            timer.tick(&mut storage); // break ends
        }
        assert_eq!(load_daily_count(&storage), 3);
    }

    #[test]
    fn reset_rewinds_current_phase_and_pauses() {
        let mut storage = MemoryStorage::new();
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        timer.tick(&mut storage);
        timer.reset();
        assert_eq!(timer.time_left, WORK_SECS);
        assert!(!timer.running);
    }

    #[test]
    fn load_daily_count_ignores_records_from_other_days() {
        let mut storage = MemoryStorage::new();
        let yesterday = Local::now().date_naive().pred_opt().unwrap();
        let record = DailyCount {
            date: yesterday,
            count: 7,
        };
        storage.save(POMODORO_KEY, &serde_json::to_string(&record).unwrap());

        assert_eq!(load_daily_count(&storage), 0);
        // The stale record stays until the next completed session.
        assert!(storage.load(POMODORO_KEY).is_some());
    }

    #[test]
    fn load_daily_count_returns_todays_stored_count() {
        let mut storage = MemoryStorage::new();
        let record = DailyCount {
            date: Local::now().date_naive(),
            count: 4,
        };
        storage.save(POMODORO_KEY, &serde_json::to_string(&record).unwrap());
        assert_eq!(load_daily_count(&storage), 4);
    }

    #[test]
    fn load_daily_count_defaults_on_malformed_json() {
        let mut storage = MemoryStorage::new();
        storage.save(POMODORO_KEY, "{broken");
        assert_eq!(load_daily_count(&storage), 0);
    }
}
