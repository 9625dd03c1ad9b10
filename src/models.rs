use crate::calendar::{CalendarCell, YearMonth};
use crate::reminder::Permission;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Sad,
    Love,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Love => "love",
        }
    }
}

/// One journal record. Never mutated once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub photo: Option<String>,
    pub date: DateTime<Utc>,
}

impl Entry {
    /// Calendar day of this entry as seen from `tz`.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }
}

/// Draft posted by the page. `id` and `date` are assigned on save.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub entries: Vec<Entry>,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntrySavedResponse {
    pub entry: Entry,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days_in_month: u32,
    pub leading_blanks: u32,
    pub previous: YearMonth,
    pub next: YearMonth,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionUpdate {
    pub permission: Permission,
}
