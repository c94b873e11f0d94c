//! Time windows and the overlap rule.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)` with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(end > start, "window end must be after start");
        TimeWindow { start, end }
    }

    /// Window of the `index`-th occurrence of a repeating request: the base
    /// start shifted forward by `index` whole days, duration unchanged.
    pub fn for_occurrence(base_start: DateTime<Utc>, duration_minutes: i64, index: u32) -> Self {
        let start = base_start + Duration::days(index as i64);
        TimeWindow {
            start,
            end: start + Duration::minutes(duration_minutes),
        }
    }

    /// Half-open intersection test. Windows that merely touch
    /// (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Query bounds for reading events in an inclusive date range.
///
/// The range starts at midnight of `from`. When both dates are equal the
/// end is extended to 23:59:59.999 of that day, so a same-day read still
/// covers the whole day instead of an empty instant.
pub fn day_span(from: NaiveDate, to: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = from.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end = if from == to {
        from.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
    } else {
        to.and_hms_opt(0, 0, 0).unwrap().and_utc()
    };
    (start, end)
}
