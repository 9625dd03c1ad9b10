use crate::models::{Entry, Mood};
use chrono::{Datelike, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Thumbnails shown per calendar cell before collapsing into "+N".
pub const MAX_PREVIEW: usize = 4;

/// A calendar month, always holding a real first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MonthParts", try_from = "MonthParts")]
pub struct YearMonth {
    first: NaiveDate,
}

/// Wire shape of a `YearMonth`. `month` is 1-based.
#[derive(Serialize, Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl From<YearMonth> for MonthParts {
    fn from(value: YearMonth) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
        }
    }
}

impl TryFrom<MonthParts> for YearMonth {
    type Error = String;

    fn try_from(parts: MonthParts) -> std::result::Result<Self, Self::Error> {
        YearMonth::new(parts.year, parts.month)
            .ok_or_else(|| format!("{}-{} is not a calendar month", parts.year, parts.month))
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// Saturates at the earliest representable month.
    pub fn previous(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// Saturates at the latest representable month.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| (next - first).num_days() as u32)
            .unwrap_or(31)
    }

    /// Empty cells before day 1 in a Sunday-first week.
    pub fn leading_blanks(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn label(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
}

pub fn entries_on_day<'a, Tz: TimeZone>(
    entries: &'a [Entry],
    year: i32,
    month: u32,
    day: u32,
    tz: &Tz,
) -> Vec<&'a Entry> {
    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| entry.day_in(tz) == date)
        .collect()
}

/// One bucket per day of `month`, each holding every entry on that day in
/// input order.
pub fn bucket_month<Tz: TimeZone>(entries: &[Entry], month: YearMonth, tz: &Tz) -> Vec<DayBucket> {
    let first = month.first_day();
    let mut buckets: Vec<DayBucket> = first
        .iter_days()
        .take(month.days_in_month() as usize)
        .map(|date| DayBucket {
            date,
            entries: Vec::new(),
        })
        .collect();

    for entry in entries {
        let day = entry.day_in(tz);
        if YearMonth::containing(day) != month {
            continue;
        }
        if let Some(bucket) = buckets.get_mut(day.day0() as usize) {
            bucket.entries.push(entry.clone());
        }
    }

    buckets
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarThumb {
    pub id: String,
    pub title: String,
    pub mood: Mood,
    pub photo: Option<String>,
}

impl From<&Entry> for CalendarThumb {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            mood: entry.mood,
            photo: entry.photo.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day: u32,
    pub is_today: bool,
    pub entry_count: usize,
    pub preview: Vec<CalendarThumb>,
    pub overflow: usize,
}

impl CalendarCell {
    fn from_bucket(bucket: &DayBucket, today: NaiveDate) -> Self {
        let preview = bucket
            .entries
            .iter()
            .take(MAX_PREVIEW)
            .map(CalendarThumb::from)
            .collect();
        Self {
            day: bucket.date.day(),
            is_today: bucket.date == today,
            entry_count: bucket.entries.len(),
            preview,
            overflow: bucket.entries.len().saturating_sub(MAX_PREVIEW),
        }
    }
}

/// Grid-ready month: metadata plus one cell per day.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub month: YearMonth,
    pub buckets: Vec<DayBucket>,
    pub cells: Vec<CalendarCell>,
}

impl MonthView {
    pub fn build<Tz: TimeZone>(entries: &[Entry], month: YearMonth, today: NaiveDate, tz: &Tz) -> Self {
        let buckets = bucket_month(entries, month, tz);
        let cells = buckets
            .iter()
            .map(|bucket| CalendarCell::from_bucket(bucket, today))
            .collect();
        Self {
            month,
            buckets,
            cells,
        }
    }
}
