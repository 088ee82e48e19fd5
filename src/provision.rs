//! Lazy creation of the singleton user, its habit, and per-day records.
//!
//! Every function here is idempotent: the first call inserts what is
//! missing, later calls return the existing rows unchanged.

use crate::day::day_range;
use crate::models::{AppData, Frequency, Habit, HabitKind, Record, User};
use chrono::{DateTime, TimeZone};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_USER_NAME: &str = "Workout user";
pub const HABIT_NAME: &str = "10-minute full-body workout";
pub const HABIT_DURATION_MINUTES: u32 = 10;
pub const HABIT_COLOR: &str = "blue";

pub fn ensure_user_and_habit(data: &mut AppData) -> (User, Habit) {
    let user = match data.users.first() {
        Some(user) => user.clone(),
        None => {
            let user = User {
                id: Uuid::new_v4(),
                name: DEFAULT_USER_NAME.to_string(),
            };
            info!(user_id = %user.id, "provisioned user");
            data.users.push(user.clone());
            user
        }
    };

    let habit = match data.habits.iter().find(|habit| habit.user_id == user.id) {
        Some(habit) => habit.clone(),
        None => {
            let habit = default_habit(user.id);
            info!(habit_id = %habit.id, "provisioned habit");
            data.habits.push(habit.clone());
            habit
        }
    };

    (user, habit)
}

fn default_habit(user_id: Uuid) -> Habit {
    Habit {
        id: Uuid::new_v4(),
        user_id,
        name: HABIT_NAME.to_string(),
        kind: HabitKind::Time,
        duration_minutes: HABIT_DURATION_MINUTES,
        frequency: Frequency::Daily,
        color: HABIT_COLOR.to_string(),
        streak: 0,
        exp: 0,
    }
}

/// Returns the record of `habit_id` for the calendar day of `date`,
/// creating an incomplete one dated at local midnight if none exists.
pub fn ensure_record_for_date<Tz: TimeZone>(
    data: &mut AppData,
    habit_id: Uuid,
    date: &DateTime<Tz>,
) -> Record {
    let range = day_range(date);
    if let Some(record) = data.records_in(habit_id, &range).first() {
        return (*record).clone();
    }

    let record = Record {
        id: Uuid::new_v4(),
        habit_id,
        date: range.start,
        completed: false,
    };
    data.records.push(record.clone());
    record
}
