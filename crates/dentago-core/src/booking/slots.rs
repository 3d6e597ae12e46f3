//! Calendar grid and time slots for the first two booking steps.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Uzbek month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Yanvar", "Fevral", "Mart", "Aprel", "May", "Iyun", "Iyul", "Avgust", "Sentyabr", "Oktyabr",
    "Noyabr", "Dekabr",
];

/// Weekday header labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Du", "Se", "Ch", "Pa", "Ju", "Sh", "Ya"];

/// The 48 half-hour slots `00:00 … 23:30`.
pub fn half_hour_slots() -> Vec<String> {
    (0..48)
        .map(|i| format!("{:02}:{:02}", i / 2, (i % 2) * 30))
        .collect()
}

/// Parse a typed `HH:MM` (24-hour) time. Seconds are always zero.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()
}

/// Display label carried from the date step to later steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLabel {
    pub day: u32,
    pub month: String,
    pub year: i32,
}

impl DateLabel {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: MONTH_NAMES[date.month0() as usize].to_string(),
            year: date.year(),
        }
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month, self.year)
    }
}

/// One selectable cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Days before today cannot be picked
    pub disabled: bool,
    pub is_today: bool,
}

/// Month grid, Monday first. Leading cells before the 1st are `None`.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Vec<Option<CalendarDay>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_monday() as usize;

    let mut cells: Vec<Option<CalendarDay>> = vec![None; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| {
                Some(CalendarDay {
                    date,
                    disabled: date < today,
                    is_today: date == today,
                })
            }),
    );
    cells
}

/// Month header, e.g. `Mart 2026`.
pub fn month_title(year: i32, month: u32) -> String {
    let name = month
        .checked_sub(1)
        .and_then(|m| MONTH_NAMES.get(m as usize))
        .copied()
        .unwrap_or_default();
    format!("{} {}", name, year)
}

/// Move the calendar by `delta` months. Returns `(year, month)`.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))?
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))?
    };
    Some((shifted.year(), shifted.month()))
}
