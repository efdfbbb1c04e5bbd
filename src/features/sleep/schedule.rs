//! Scheduling and cancellation logic
//!
//! Pure functions over the timer store: parsing the `HH:MM` argument,
//! resolving it to a fixed-zone deadline, and enforcing the authorization
//! and one-timer-per-user rules. `now` is always a parameter so the
//! date-roll behavior is testable without a clock.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::store::{SleepTimer, TimerStore};

/// All deadlines are interpreted in Japan time, matching the community the
/// bot serves. Not configurable.
pub const BOT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Current wall-clock time in the bot's fixed timezone
pub fn now_local() -> DateTime<Tz> {
    Utc::now().with_timezone(&BOT_TIMEZONE)
}

/// Why a schedule request was refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleError {
    /// Time argument is not a two-digit 24-hour `HH:MM` pair
    InvalidFormat,
    /// Requester lacks the admin role needed to act on another user
    Unauthorized,
    /// Target already has an active timer (returned untouched)
    AlreadyScheduled(SleepTimer),
}

/// Why a cancel request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelError {
    /// Requester lacks the admin role needed to act on another user
    Unauthorized,
    /// No active timer exists for the target
    NotFound,
}

/// Parse a strict two-digit `HH:MM` 24-hour time
fn parse_time(input: &str) -> Option<NaiveTime> {
    let (hour, minute) = input.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Resolve a time-of-day argument to the next matching instant
///
/// Combines today's date (in the fixed zone) with the parsed time; if the
/// result is not strictly after `now`, it rolls forward one day. The clock
/// time of the returned deadline always matches the input exactly.
pub fn resolve_deadline(time: &str, now: DateTime<Tz>) -> Result<DateTime<Tz>, ScheduleError> {
    let time_of_day = parse_time(time).ok_or(ScheduleError::InvalidFormat)?;

    // A local datetime is unrepresentable only inside a DST gap; Asia/Tokyo
    // has no transitions, so the `earliest()` fallbacks below never fire.
    let today = now.date_naive().and_time(time_of_day);
    let deadline = BOT_TIMEZONE
        .from_local_datetime(&today)
        .earliest()
        .ok_or(ScheduleError::InvalidFormat)?;

    if deadline > now {
        return Ok(deadline);
    }

    let tomorrow = today + Duration::days(1);
    BOT_TIMEZONE
        .from_local_datetime(&tomorrow)
        .earliest()
        .ok_or(ScheduleError::InvalidFormat)
}

fn authorized(requester_id: u64, is_admin: bool, target_id: u64) -> bool {
    is_admin || target_id == requester_id
}

/// Schedule a sleep timer for `target_id`
///
/// Checks run in order: authorization, time parsing, conflict with an
/// existing timer. On success the new timer is inserted and returned.
pub fn schedule(
    store: &TimerStore,
    requester_id: u64,
    is_admin: bool,
    target_id: u64,
    channel_id: u64,
    time: &str,
    now: DateTime<Tz>,
) -> Result<SleepTimer, ScheduleError> {
    if !authorized(requester_id, is_admin, target_id) {
        return Err(ScheduleError::Unauthorized);
    }

    let deadline = resolve_deadline(time, now)?;
    let timer = SleepTimer {
        user_id: target_id,
        channel_id,
        deadline,
    };

    match store.try_insert(timer) {
        Ok(()) => Ok(timer),
        Err(existing) => Err(ScheduleError::AlreadyScheduled(existing)),
    }
}

/// Cancel the active timer for `target_id`
pub fn cancel(
    store: &TimerStore,
    requester_id: u64,
    is_admin: bool,
    target_id: u64,
) -> Result<SleepTimer, CancelError> {
    if !authorized(requester_id, is_admin, target_id) {
        return Err(CancelError::Unauthorized);
    }

    store.remove(target_id).ok_or(CancelError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::Asia::Tokyo;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        Tokyo.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_future_time_schedules_today() {
        let now = at(2024, 5, 1, 10, 0, 0);
        let deadline = resolve_deadline("23:30", now).unwrap();

        assert_eq!(deadline, at(2024, 5, 1, 23, 30, 0));
        assert_eq!(deadline.hour(), 23);
        assert_eq!(deadline.minute(), 30);
    }

    #[test]
    fn test_past_time_rolls_to_tomorrow() {
        let now = at(2024, 5, 1, 10, 0, 0);
        let deadline = resolve_deadline("09:00", now).unwrap();

        assert_eq!(deadline, at(2024, 5, 2, 9, 0, 0));
    }

    #[test]
    fn test_exact_now_rolls_to_tomorrow() {
        // "Not after now" rolls, so an exact match goes to the next day.
        let now = at(2024, 5, 1, 10, 0, 0);
        let deadline = resolve_deadline("10:00", now).unwrap();

        assert_eq!(deadline, at(2024, 5, 2, 10, 0, 0));
    }

    #[test]
    fn test_roll_crosses_month_boundary() {
        let now = at(2024, 12, 31, 23, 59, 0);
        let deadline = resolve_deadline("09:00", now).unwrap();

        assert_eq!(deadline, at(2025, 1, 1, 9, 0, 0));
    }

    #[test]
    fn test_midnight_is_valid() {
        let now = at(2024, 5, 1, 10, 0, 0);
        let deadline = resolve_deadline("00:00", now).unwrap();

        assert_eq!(deadline, at(2024, 5, 2, 0, 0, 0));
    }

    #[test]
    fn test_invalid_formats_rejected() {
        let now = at(2024, 5, 1, 10, 0, 0);
        for input in ["9:00", "12:3", "24:00", "12:60", "1230", "ab:cd", "", "12:30:00"] {
            assert_eq!(
                resolve_deadline(input, now),
                Err(ScheduleError::InvalidFormat),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_schedule_self_without_admin_role() {
        let store = TimerStore::new();
        let now = at(2024, 5, 1, 10, 0, 0);

        let timer = schedule(&store, 1, false, 1, 900, "23:30", now).unwrap();
        assert_eq!(timer.user_id, 1);
        assert_eq!(timer.channel_id, 900);
        assert_eq!(store.get(1), Some(timer));
    }

    #[test]
    fn test_schedule_other_requires_admin_role() {
        let store = TimerStore::new();
        let now = at(2024, 5, 1, 10, 0, 0);

        assert_eq!(
            schedule(&store, 1, false, 2, 900, "23:30", now),
            Err(ScheduleError::Unauthorized)
        );
        assert!(store.is_empty());

        let timer = schedule(&store, 1, true, 2, 900, "23:30", now).unwrap();
        assert_eq!(timer.user_id, 2);
    }

    #[test]
    fn test_conflict_keeps_existing_deadline() {
        let store = TimerStore::new();
        let now = at(2024, 5, 1, 10, 0, 0);

        let original = schedule(&store, 1, false, 1, 900, "23:30", now).unwrap();
        let err = schedule(&store, 1, false, 1, 900, "22:00", now).unwrap_err();

        assert_eq!(err, ScheduleError::AlreadyScheduled(original));
        assert_eq!(store.get(1).unwrap().deadline, original.deadline);
    }

    #[test]
    fn test_unparseable_time_leaves_store_untouched() {
        let store = TimerStore::new();
        let now = at(2024, 5, 1, 10, 0, 0);

        assert_eq!(
            schedule(&store, 1, false, 1, 900, "bedtime", now),
            Err(ScheduleError::InvalidFormat)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancel_removes_entry() {
        let store = TimerStore::new();
        let now = at(2024, 5, 1, 10, 0, 0);
        let timer = schedule(&store, 1, false, 1, 900, "23:30", now).unwrap();

        assert_eq!(cancel(&store, 1, false, 1), Ok(timer));
        assert_eq!(store.get(1), None);
        // No history survives: a second cancel finds nothing.
        assert_eq!(cancel(&store, 1, false, 1), Err(CancelError::NotFound));
    }

    #[test]
    fn test_cancel_other_requires_admin_role() {
        let store = TimerStore::new();
        let now = at(2024, 5, 1, 10, 0, 0);
        schedule(&store, 2, false, 2, 900, "23:30", now).unwrap();

        assert_eq!(cancel(&store, 1, false, 2), Err(CancelError::Unauthorized));
        assert!(store.get(2).is_some());

        assert!(cancel(&store, 1, true, 2).is_ok());
        assert_eq!(store.get(2), None);
    }
}
