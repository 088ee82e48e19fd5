use crate::day::previous_day_range;
use crate::errors::TrackerError;
use crate::models::{AppData, Habit, Record};
use crate::provision::ensure_record_for_date;
use chrono::{DateTime, Local, TimeZone};
use tracing::info;
use uuid::Uuid;

pub const EXP_PER_COMPLETION: u32 = 10;

#[derive(Debug, Clone)]
pub struct Completion {
    pub habit: Habit,
    pub record: Record,
    /// Today's record was already completed; nothing changed.
    pub already_completed: bool,
}

pub fn complete(data: &mut AppData, habit_id: Uuid) -> Result<Completion, TrackerError> {
    complete_at(data, habit_id, &Local::now())
}

/// Marks the day of `now` completed for `habit_id`, extending the streak
/// when the previous calendar day was completed and restarting it at 1
/// otherwise.
///
/// Both the record and the habit are validated before either is written,
/// so an error never leaves `data` half-updated.
pub fn complete_at<Tz: TimeZone>(
    data: &mut AppData,
    habit_id: Uuid,
    now: &DateTime<Tz>,
) -> Result<Completion, TrackerError> {
    let habit = data
        .habit(habit_id)
        .cloned()
        .ok_or(TrackerError::HabitNotFound(habit_id))?;
    let record = ensure_record_for_date(data, habit_id, now);

    if record.completed {
        return Ok(Completion {
            habit,
            record,
            already_completed: true,
        });
    }

    let previous_completed = data
        .latest_record_in(habit_id, &previous_day_range(now))
        .is_some_and(|record| record.completed);
    let next_streak = if previous_completed {
        habit.streak.saturating_add(1)
    } else {
        1
    };
    let next_exp = habit.exp.saturating_add(EXP_PER_COMPLETION);

    let updated_record = {
        let stored = data
            .record_mut(record.id)
            .ok_or(TrackerError::RecordNotFound(record.id))?;
        stored.completed = true;
        stored.clone()
    };
    let updated_habit = {
        let stored = data
            .habit_mut(habit_id)
            .ok_or(TrackerError::HabitNotFound(habit_id))?;
        stored.streak = next_streak;
        stored.exp = next_exp;
        stored.clone()
    };

    info!(
        habit_id = %habit_id,
        streak = next_streak,
        exp = next_exp,
        "habit completed"
    );

    Ok(Completion {
        habit: updated_habit,
        record: updated_record,
        already_completed: false,
    })
}
