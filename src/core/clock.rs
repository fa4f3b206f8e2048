//! Local-time clock abstraction and calendar window helpers.
//!
//! All day boundaries are wall-clock based: midnight 00:00:00.000 through
//! 23:59:59.999 of the local date, recomputed on every call. Crossing
//! midnight during a session therefore changes what counts as "today" on
//! the next recompute.

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone,
};

/// Clock abstracts access to the current timestamp so services remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local timestamp.
    fn now(&self) -> DateTime<Local>;

    /// Returns the current local calendar date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the system local time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Local midnight through 23:59:59.999 of `date`.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
    (day_start(date), day_end(date))
}

/// Sunday-to-Saturday window containing `date`.
pub fn week_bounds(date: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
    let back = date.weekday().num_days_from_sunday() as i64;
    let sunday = date - Duration::days(back);
    let saturday = sunday + Duration::days(6);
    (day_start(sunday), day_end(saturday))
}

/// Calendar-month window containing `date`.
pub fn month_bounds(date: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
    let first = date.with_day(1).unwrap_or(date);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .unwrap_or(first);
    let last = next_first.pred_opt().unwrap_or(first);
    (day_start(first), day_end(last))
}

fn day_start(date: NaiveDate) -> DateTime<Local> {
    resolve_local(date.and_time(NaiveTime::MIN))
}

fn day_end(date: NaiveDate) -> DateTime<Local> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    resolve_local(date.and_time(end))
}

/// Resolves a naive local datetime against the system timezone, taking the
/// earlier instant when the wall clock is ambiguous and shifting forward
/// across a DST gap.
fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            Local
                .from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| Local.from_utc_datetime(&naive))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_the_whole_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start.date_naive(), date);
        assert_eq!(end.date_naive(), date);
        assert!(start < end);
    }

    #[test]
    fn week_bounds_run_sunday_to_saturday() {
        // 2025-03-14 is a Friday.
        let friday = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (start, end) = week_bounds(friday);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn month_bounds_handle_december_rollover() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let (start, end) = month_bounds(date);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn system_clock_reports_today() {
        let clock = SystemClock;
        assert_eq!(clock.today(), clock.now().date_naive());
    }
}
