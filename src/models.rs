use crate::day::DayRange;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: HabitKind,
    pub duration_minutes: u32,
    pub frequency: Frequency,
    pub color: String,
    pub streak: u32,
    pub exp: u32,
}

/// Completion state of one habit on one calendar day. `date` is the local
/// midnight the record was created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub date: DateTime<FixedOffset>,
    pub completed: bool,
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl AppData {
    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn habit_mut(&mut self, id: Uuid) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    pub fn record_mut(&mut self, id: Uuid) -> Option<&mut Record> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    /// Records of `habit_id` whose date falls in `range`, oldest first.
    pub fn records_in(&self, habit_id: Uuid, range: &DayRange) -> Vec<&Record> {
        let mut records: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| record.habit_id == habit_id && range.contains(&record.date))
            .collect();
        records.sort_by_key(|record| record.date);
        records
    }

    /// Most recent record of `habit_id` inside `range`.
    pub fn latest_record_in(&self, habit_id: Uuid, range: &DayRange) -> Option<&Record> {
        self.records_in(habit_id, range).pop()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitPayload {
    pub id: Uuid,
    pub name: String,
    pub streak: u32,
    pub exp: u32,
    pub color: String,
}

impl From<&Habit> for HabitPayload {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            streak: habit.streak,
            exp: habit.exp,
            color: habit.color.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordPayload {
    pub id: Uuid,
    pub completed: bool,
    pub date: DateTime<FixedOffset>,
}

impl From<&Record> for RecordPayload {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            completed: record.completed,
            date: record.date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub habit: HabitPayload,
    pub record: RecordPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub completed_days: usize,
    pub total_days: usize,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub stats: HistoryStats,
}
