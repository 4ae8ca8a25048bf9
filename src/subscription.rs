//! Subscription windows and the active-subscription check.
//!
//! This is the one cross-table rule the generators enforce rather than
//! sample: a like cancellation is only recorded when the acting user held an
//! active subscription at the chosen instant. A user may hold several,
//! possibly overlapping windows; activity is the union of all of them.

use chrono::{NaiveDate, NaiveDateTime};

/// One subscription window. `end` absent means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub user_id: i64,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// All subscription tuples emitted during a run, in emission order.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionLedger {
    entries: Vec<Subscription>,
}

impl SubscriptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sub: Subscription) {
        self.entries.push(sub);
    }

    pub fn entries(&self) -> &[Subscription] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `user_id` held at least one subscription whose window
    /// contains `instant`. Date granularity, both bounds inclusive.
    pub fn has_active_subscription(&self, user_id: i64, instant: NaiveDateTime) -> bool {
        let day = instant.date();
        self.entries
            .iter()
            .filter(|s| s.user_id == user_id)
            .any(|s| s.start <= day && s.end.map_or(true, |end| day <= end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn open_ended_window_never_expires() {
        let mut ledger = SubscriptionLedger::new();
        ledger.push(Subscription {
            user_id: 1,
            start: date(2023, 1, 1),
            end: None,
        });

        assert!(ledger.has_active_subscription(1, noon(2030, 1, 1)));
        assert!(!ledger.has_active_subscription(1, noon(2022, 12, 31)));
    }

    #[test]
    fn bounded_window_is_inclusive() {
        let mut ledger = SubscriptionLedger::new();
        ledger.push(Subscription {
            user_id: 1,
            start: date(2023, 1, 1),
            end: Some(date(2023, 6, 1)),
        });

        assert!(ledger.has_active_subscription(1, noon(2023, 3, 1)));
        assert!(ledger.has_active_subscription(1, noon(2023, 1, 1)));
        assert!(ledger.has_active_subscription(1, noon(2023, 6, 1)));
        assert!(!ledger.has_active_subscription(1, noon(2023, 7, 1)));
    }

    #[test]
    fn activity_is_union_of_overlapping_windows() {
        let mut ledger = SubscriptionLedger::new();
        ledger.push(Subscription {
            user_id: 1,
            start: date(2023, 1, 1),
            end: Some(date(2023, 3, 1)),
        });
        ledger.push(Subscription {
            user_id: 1,
            start: date(2023, 2, 15),
            end: Some(date(2023, 9, 1)),
        });

        assert!(ledger.has_active_subscription(1, noon(2023, 2, 20)));
        assert!(ledger.has_active_subscription(1, noon(2023, 8, 1)));
        assert!(!ledger.has_active_subscription(1, noon(2023, 10, 1)));
    }

    #[test]
    fn other_users_are_not_covered() {
        let mut ledger = SubscriptionLedger::new();
        ledger.push(Subscription {
            user_id: 1,
            start: date(2023, 1, 1),
            end: None,
        });

        assert!(!ledger.has_active_subscription(2, noon(2023, 6, 1)));
    }
}
