//! Shared sleep-timer store
//!
//! One map from user id to the user's active timer, shared between the
//! command handlers and the expiry sweeper. DashMap provides the mutual
//! exclusion, so a schedule/cancel in flight and a concurrent sweep tick
//! cannot interleave into a lost deletion or a half-written entry.

use chrono::DateTime;
use chrono_tz::Tz;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// A scheduled deadline at which a user's voice presence should be muted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepTimer {
    /// The user to mute when the deadline passes
    pub user_id: u64,
    /// The channel the timer was set from
    pub channel_id: u64,
    /// Fixed-zone instant the timer expires
    pub deadline: DateTime<Tz>,
}

/// Thread-safe store of active sleep timers, at most one per user
#[derive(Clone, Default)]
pub struct TimerStore {
    timers: Arc<DashMap<u64, SleepTimer>>,
}

impl TimerStore {
    pub fn new() -> Self {
        TimerStore {
            timers: Arc::new(DashMap::new()),
        }
    }

    /// Get the active timer for a user, if any
    pub fn get(&self, user_id: u64) -> Option<SleepTimer> {
        self.timers.get(&user_id).map(|entry| *entry.value())
    }

    /// Insert a timer unless the user already has one
    ///
    /// On conflict the existing timer is returned untouched; the caller must
    /// cancel it before scheduling a replacement.
    pub fn try_insert(&self, timer: SleepTimer) -> Result<(), SleepTimer> {
        match self.timers.entry(timer.user_id) {
            Entry::Occupied(existing) => Err(*existing.get()),
            Entry::Vacant(slot) => {
                slot.insert(timer);
                Ok(())
            }
        }
    }

    /// Remove and return a user's timer
    pub fn remove(&self, user_id: u64) -> Option<SleepTimer> {
        self.timers.remove(&user_id).map(|(_, timer)| timer)
    }

    /// Remove and return every timer whose deadline has passed
    ///
    /// Eligibility is decided against a snapshot of the current keys; each
    /// removal then re-checks the deadline under the entry's lock, so a
    /// timer cancelled or rescheduled between the snapshot and the removal
    /// is never swept out from under the new schedule.
    pub fn take_due(&self, now: DateTime<Tz>) -> Vec<SleepTimer> {
        let due: Vec<u64> = self
            .timers
            .iter()
            .filter(|entry| entry.deadline <= now)
            .map(|entry| *entry.key())
            .collect();

        due.into_iter()
            .filter_map(|user_id| {
                self.timers
                    .remove_if(&user_id, |_, timer| timer.deadline <= now)
                    .map(|(_, timer)| timer)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Tokyo;

    fn timer_at(user_id: u64, hour: u32, min: u32) -> SleepTimer {
        SleepTimer {
            user_id,
            channel_id: 900,
            deadline: Tokyo.with_ymd_and_hms(2024, 5, 1, hour, min, 0).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = TimerStore::new();
        assert!(store.is_empty());

        let timer = timer_at(1, 23, 30);
        assert!(store.try_insert(timer).is_ok());
        assert_eq!(store.get(1), Some(timer));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_second_insert_rejected_and_original_kept() {
        let store = TimerStore::new();
        let original = timer_at(1, 23, 30);
        store.try_insert(original).unwrap();

        let replacement = timer_at(1, 7, 0);
        let existing = store.try_insert(replacement).unwrap_err();

        assert_eq!(existing, original);
        assert_eq!(store.get(1), Some(original));
    }

    #[test]
    fn test_remove_only_affects_target() {
        let store = TimerStore::new();
        store.try_insert(timer_at(1, 22, 0)).unwrap();
        store.try_insert(timer_at(2, 23, 0)).unwrap();

        assert!(store.remove(1).is_some());
        assert_eq!(store.get(1), None);
        assert!(store.get(2).is_some());
        assert!(store.remove(1).is_none());
    }

    #[test]
    fn test_take_due_removes_expired_keeps_future() {
        let store = TimerStore::new();
        store.try_insert(timer_at(1, 21, 0)).unwrap();
        store.try_insert(timer_at(2, 22, 0)).unwrap();
        store.try_insert(timer_at(3, 23, 30)).unwrap();

        let now = Tokyo.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap();
        let mut due = store.take_due(now);
        due.sort_by_key(|t| t.user_id);

        // deadline <= now fires, deadline > now stays
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].user_id, 1);
        assert_eq!(due[1].user_id, 2);
        assert_eq!(store.get(1), None);
        assert_eq!(store.get(2), None);
        assert!(store.get(3).is_some());
    }

    #[test]
    fn test_take_due_on_empty_store() {
        let store = TimerStore::new();
        let now = Tokyo.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap();
        assert!(store.take_due(now).is_empty());
    }

    #[test]
    fn test_take_due_never_sweeps_a_rescheduled_future_timer() {
        // A cancel + reschedule racing a sweep tick must not lose the new
        // timer: removal re-checks the deadline, so take_due only ever
        // returns entries that were still due at removal time.
        use std::thread;

        let store = TimerStore::new();
        let now = Tokyo.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap();
        let due = timer_at(1, 21, 0);
        let future = timer_at(1, 23, 30);

        for _ in 0..1000 {
            store.try_insert(due).unwrap();

            let sweep = {
                let store = store.clone();
                thread::spawn(move || store.take_due(now))
            };

            // Cancel and immediately reschedule while the sweep runs.
            store.remove(1);
            let _ = store.try_insert(future);

            let swept = sweep.join().unwrap();
            assert!(
                swept.iter().all(|timer| timer.deadline <= now),
                "sweep removed a timer whose deadline is in the future: {swept:?}"
            );

            store.remove(1);
        }
    }
}
