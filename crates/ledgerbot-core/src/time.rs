//! Report period windows
//!
//! A window is computed from a caller-supplied "now" so results are
//! reproducible in tests; interactive and scheduled callers pass the
//! current instant in the configured time zone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::ReportPeriod;

/// The datetime range a report aggregates over, inclusive on both ends.
/// Bounds are civil datetimes in the configured zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportWindow {
    /// Check whether a timestamp falls inside the window.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts <= self.end
    }

    /// Human-readable date range, start to end.
    pub fn describe(&self) -> String {
        format!("{} to {}", self.start.date(), self.end.date())
    }
}

/// Compute the aggregation window for a period, relative to `now`.
pub fn period_window(period: ReportPeriod, now: DateTime<Tz>) -> ReportWindow {
    let today = now.date_naive();
    match period {
        ReportPeriod::Weekly => {
            let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            let start = day_start(monday);
            ReportWindow {
                start,
                end: start + Duration::days(7),
            }
        }
        ReportPeriod::Fortnightly => {
            if today.day() <= 15 {
                ReportWindow {
                    start: day_start(today.with_day(1).unwrap_or(today)),
                    end: day_end(today.with_day(15).unwrap_or(today)),
                }
            } else {
                ReportWindow {
                    start: day_start(today.with_day(16).unwrap_or(today)),
                    end: day_end(last_day_of_month(today)),
                }
            }
        }
        ReportPeriod::Monthly => ReportWindow {
            start: day_start(today.with_day(1).unwrap_or(today)),
            end: day_end(last_day_of_month(today)),
        },
    }
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, NaiveTime::MIN)
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    NaiveDateTime::new(date, end)
}

/// Last calendar day of the month `date` falls in.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt()).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Tz> {
        // Wednesday 2024-01-17 12:00 local
        chrono_tz::America::Sao_Paulo
            .with_ymd_and_hms(2024, 1, 17, 12, 0, 0)
            .unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_weekly_window() {
        let window = period_window(ReportPeriod::Weekly, fixed_now());
        assert_eq!(window.start, dt("2024-01-15 00:00:00"));
        assert_eq!(window.end, dt("2024-01-22 00:00:00"));
    }

    #[test]
    fn test_fortnightly_window_second_half() {
        let window = period_window(ReportPeriod::Fortnightly, fixed_now());
        assert_eq!(window.start, dt("2024-01-16 00:00:00"));
        assert_eq!(window.end, dt("2024-01-31 23:59:59"));
    }

    #[test]
    fn test_fortnightly_window_first_half() {
        let now = chrono_tz::America::Sao_Paulo
            .with_ymd_and_hms(2024, 1, 10, 8, 0, 0)
            .unwrap();
        let window = period_window(ReportPeriod::Fortnightly, now);
        assert_eq!(window.start, dt("2024-01-01 00:00:00"));
        assert_eq!(window.end, dt("2024-01-15 23:59:59"));
    }

    #[test]
    fn test_monthly_window() {
        let window = period_window(ReportPeriod::Monthly, fixed_now());
        assert_eq!(window.start, dt("2024-01-01 00:00:00"));
        assert_eq!(window.end, dt("2024-01-31 23:59:59"));
    }

    #[test]
    fn test_monthly_window_december() {
        let now = chrono_tz::UTC.with_ymd_and_hms(2023, 12, 5, 9, 0, 0).unwrap();
        let window = period_window(ReportPeriod::Monthly, now);
        assert_eq!(window.start, dt("2023-12-01 00:00:00"));
        assert_eq!(window.end, dt("2023-12-31 23:59:59"));
    }

    #[test]
    fn test_weekly_window_on_monday() {
        let now = chrono_tz::UTC.with_ymd_and_hms(2024, 1, 15, 0, 30, 0).unwrap();
        let window = period_window(ReportPeriod::Weekly, now);
        assert_eq!(window.start, dt("2024-01-15 00:00:00"));
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let window = period_window(ReportPeriod::Monthly, fixed_now());
        assert!(window.contains(&dt("2024-01-01 00:00:00")));
        assert!(window.contains(&dt("2024-01-31 23:59:59")));
        assert!(!window.contains(&dt("2024-02-01 00:00:00")));
        assert!(!window.contains(&dt("2023-12-31 23:59:59")));
    }

    #[test]
    fn test_last_day_of_month() {
        let feb = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(last_day_of_month(feb).day(), 29);
        let dec = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(last_day_of_month(dec).day(), 31);
    }
}
