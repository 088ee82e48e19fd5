use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Half-open interval `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DayRange {
    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

/// Truncates `at` to its local midnight and pairs it with the next day's
/// midnight, both in the time zone `at` carries.
pub fn day_range<Tz: TimeZone>(at: &DateTime<Tz>) -> DayRange {
    let zone = at.timezone();
    let date = at.date_naive();
    DayRange {
        start: midnight(&zone, date),
        end: midnight(&zone, date + Duration::days(1)),
    }
}

/// The calendar day before the day of `at`.
pub fn previous_day_range<Tz: TimeZone>(at: &DateTime<Tz>) -> DayRange {
    let zone = at.timezone();
    let date = at.date_naive();
    DayRange {
        start: midnight(&zone, date - Duration::days(1)),
        end: midnight(&zone, date),
    }
}

/// Range spanning `days_back` days before the day of `at` up to the end of
/// that day.
pub fn window_range<Tz: TimeZone>(at: &DateTime<Tz>, days_back: i64) -> DayRange {
    let zone = at.timezone();
    let date = at.date_naive();
    DayRange {
        start: midnight(&zone, date - Duration::days(days_back)),
        end: midnight(&zone, date + Duration::days(1)),
    }
}

/// First valid instant of `date` in `zone`.
pub fn midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> DateTime<FixedOffset> {
    let naive = date.and_time(NaiveTime::MIN);
    if let Some(start) = zone.from_local_datetime(&naive).earliest() {
        return start.fixed_offset();
    }

    // Midnight skipped by a DST transition: step forward to the first hour
    // that exists on the wall clock.
    (1..=3)
        .find_map(|hours| {
            zone.from_local_datetime(&(naive + Duration::hours(hours)))
                .earliest()
        })
        .map(|start| start.fixed_offset())
        .unwrap_or_else(|| zone.from_utc_datetime(&naive).fixed_offset())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn date_label(date: NaiveDate) -> String {
    date.format("%m/%d (%a)").to_string()
}
