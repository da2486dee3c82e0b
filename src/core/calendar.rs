use chrono::{Datelike, NaiveDate};

use super::error::GoalError;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for a day.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

pub fn parse_day_key(s: &str) -> Result<NaiveDate, GoalError> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields; day keys are strictly zero-padded.
    if trimmed.len() != 10 {
        return Err(GoalError::InvalidDayKey(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
        .map_err(|_| GoalError::InvalidDayKey(s.to_string()))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Every day of `reference`'s month, from the 1st to the last, in order.
pub fn days_of_month(reference: NaiveDate) -> Vec<NaiveDate> {
    let (year, month) = (reference.year(), reference.month());
    (1..=days_in_month(year, month))
        .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .collect()
}

/// [`days_of_month`] rendered as day keys.
pub fn day_keys_of_month(reference: NaiveDate) -> Vec<String> {
    days_of_month(reference).into_iter().map(day_key).collect()
}
