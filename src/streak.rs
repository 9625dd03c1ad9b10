use crate::models::Entry;
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::BTreeSet;

pub fn compute_streak(entries: &[Entry]) -> u32 {
    compute_streak_at(entries, Local::now().date_naive(), &Local)
}

/// Consecutive calendar days with at least one entry, ending today or
/// yesterday. Any older most-recent day means the streak has lapsed.
pub fn compute_streak_at<Tz: TimeZone>(entries: &[Entry], today: NaiveDate, tz: &Tz) -> u32 {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|entry| entry.day_in(tz)).collect();

    let mut descending = days.iter().rev().copied();
    let Some(latest) = descending.next() else {
        return 0;
    };

    let yesterday = today.pred_opt();
    if latest != today && Some(latest) != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut expected = latest;
    for day in descending {
        let Some(previous) = expected.pred_opt() else {
            break;
        };
        if day != previous {
            break;
        }
        streak += 1;
        expected = previous;
    }

    streak
}
