//! Per-tenant business hours.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Opening hours for a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// Opening time (inclusive).
    pub open: NaiveTime,
    /// Closing time (exclusive).
    pub close: NaiveTime,
}

impl DayHours {
    /// True if `time` falls within these hours.
    ///
    /// A close time at or before the open time means the window wraps past
    /// midnight (e.g. 18:00-02:00).
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.open < self.close {
            self.open <= time && time < self.close
        } else {
            time >= self.open || time < self.close
        }
    }
}

/// Weekly business hours, one optional open/close pair per weekday.
///
/// A `None` entry means the store is closed that day. Stored per tenant and
/// consumed read-only by this core. Serializes transparently as the Monday-
/// first array, which is also the stored column format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours {
    /// Monday-first array of per-day hours; `None` means closed.
    days: [Option<DayHours>; 7],
}

impl BusinessHours {
    /// Hours for every day of the week, Monday first.
    #[must_use]
    pub const fn new(days: [Option<DayHours>; 7]) -> Self {
        Self { days }
    }

    /// Hours for one weekday, or `None` if closed.
    #[must_use]
    pub fn for_day(&self, day: Weekday) -> Option<DayHours> {
        self.days
            .get(day.num_days_from_monday() as usize)
            .copied()
            .flatten()
    }

    /// True if the store is open at the given local weekday and time.
    #[must_use]
    pub fn is_open_at(&self, day: Weekday, time: NaiveTime) -> bool {
        self.for_day(day).is_some_and(|hours| hours.contains(time))
    }
}
