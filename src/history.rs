use crate::day::{date_key, date_label, window_range};
use crate::errors::TrackerError;
use crate::models::{AppData, HistoryEntry, HistoryResponse, HistoryStats};
use crate::provision::ensure_record_for_date;
use chrono::{DateTime, Duration, Local, TimeZone};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const HISTORY_DAYS: usize = 7;

pub fn history(
    data: &mut AppData,
    habit_id: Uuid,
    window_size: usize,
) -> Result<HistoryResponse, TrackerError> {
    history_at(data, habit_id, window_size, &Local::now())
}

/// Completion flags for the `window_size` calendar days ending on the day
/// of `now`, newest first. Today's record is provisioned so the current day
/// is always backed by a row.
pub fn history_at<Tz: TimeZone>(
    data: &mut AppData,
    habit_id: Uuid,
    window_size: usize,
    now: &DateTime<Tz>,
) -> Result<HistoryResponse, TrackerError> {
    let streak = data
        .habit(habit_id)
        .map(|habit| habit.streak)
        .ok_or(TrackerError::HabitNotFound(habit_id))?;
    ensure_record_for_date(data, habit_id, now);

    let today = now.date_naive();
    let days_back = window_size.saturating_sub(1) as i64;
    let window = window_range(now, days_back);

    let completed_by_day: BTreeMap<String, bool> = data
        .records_in(habit_id, &window)
        .into_iter()
        .map(|record| (date_key(record.date.date_naive()), record.completed))
        .collect();

    let history: Vec<HistoryEntry> = (0..window_size)
        .map(|offset| {
            let date = today - Duration::days(offset as i64);
            let key = date_key(date);
            HistoryEntry {
                completed: completed_by_day.get(&key).copied().unwrap_or(false),
                label: date_label(date),
                date: key,
            }
        })
        .collect();

    let completed_days = history.iter().filter(|entry| entry.completed).count();

    Ok(HistoryResponse {
        history,
        stats: HistoryStats {
            completed_days,
            total_days: window_size,
            streak,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::complete_at;
    use crate::provision::ensure_user_and_habit;
    use chrono::{FixedOffset, Utc};

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, n, 12, 0, 0).unwrap()
    }

    fn setup() -> (AppData, Uuid) {
        let mut data = AppData::default();
        let (_, habit) = ensure_user_and_habit(&mut data);
        (data, habit.id)
    }

    #[test]
    fn empty_history_has_seven_incomplete_days_newest_first() {
        let (mut data, habit_id) = setup();
        let result = history_at(&mut data, habit_id, HISTORY_DAYS, &day(10)).unwrap();

        let dates: Vec<&str> = result.history.iter().map(|entry| entry.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2026-06-10",
                "2026-06-09",
                "2026-06-08",
                "2026-06-07",
                "2026-06-06",
                "2026-06-05",
                "2026-06-04",
            ]
        );
        assert!(result.history.iter().all(|entry| !entry.completed));
        assert_eq!(result.history[0].label, "06/10 (Wed)");
        assert_eq!(
            result.stats,
            HistoryStats {
                completed_days: 0,
                total_days: 7,
                streak: 0,
            }
        );
    }

    #[test]
    fn history_provisions_todays_record() {
        let (mut data, habit_id) = setup();
        history_at(&mut data, habit_id, HISTORY_DAYS, &day(10)).unwrap();
        history_at(&mut data, habit_id, HISTORY_DAYS, &day(10)).unwrap();
        assert_eq!(data.records.len(), 1);
        assert!(!data.records[0].completed);
    }

    #[test]
    fn completed_days_inside_window_are_counted() {
        let (mut data, habit_id) = setup();
        for n in [1, 5, 6, 8, 9] {
            complete_at(&mut data, habit_id, &day(n)).unwrap();
        }

        let result = history_at(&mut data, habit_id, HISTORY_DAYS, &day(10)).unwrap();
        let flags: Vec<bool> = result.history.iter().map(|entry| entry.completed).collect();

        // 06-01 is outside the window.
        assert_eq!(flags, vec![false, true, true, false, true, true, false]);
        assert_eq!(result.stats.completed_days, 4);
        assert_eq!(result.stats.streak, 2);
    }

    #[test]
    fn streak_is_read_from_habit_not_recomputed() {
        let (mut data, habit_id) = setup();
        complete_at(&mut data, habit_id, &day(3)).unwrap();
        complete_at(&mut data, habit_id, &day(4)).unwrap();

        let result = history_at(&mut data, habit_id, HISTORY_DAYS, &day(20)).unwrap();
        assert_eq!(result.stats.completed_days, 0);
        assert_eq!(result.stats.streak, 2);
    }

    #[test]
    fn keys_follow_the_local_calendar() {
        let (mut data, habit_id) = setup();
        let zone = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2026, 6, 10, 1, 0, 0).unwrap();
        complete_at(&mut data, habit_id, &now).unwrap();

        let result = history_at(&mut data, habit_id, HISTORY_DAYS, &now).unwrap();
        assert_eq!(result.history[0].date, "2026-06-10");
        assert!(result.history[0].completed);
    }

    #[test]
    fn zero_window_is_empty() {
        let (mut data, habit_id) = setup();
        let result = history_at(&mut data, habit_id, 0, &day(10)).unwrap();
        assert!(result.history.is_empty());
        assert_eq!(result.stats.total_days, 0);
    }

    #[test]
    fn unknown_habit_is_an_error() {
        let (mut data, _) = setup();
        let err = history_at(&mut data, Uuid::new_v4(), HISTORY_DAYS, &day(10)).unwrap_err();
        assert!(matches!(err, TrackerError::HabitNotFound(_)));
        assert!(data.records.is_empty());
    }
}
