use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Fixed-date national holidays keyed by (month, day).
///
/// Moveable holidays (Coming of Age Day, Respect for the Aged Day, the
/// equinoxes, ...) and substitute holidays are not in this table.
const JP_HOLIDAYS: [((u32, u32), &str); 9] = [
    ((1, 1), "元日"),
    ((2, 11), "建国記念の日"),
    ((2, 23), "天皇誕生日"),
    ((4, 29), "昭和の日"),
    ((5, 3), "憲法記念日"),
    ((5, 4), "みどりの日"),
    ((5, 5), "こどもの日"),
    ((11, 3), "文化の日"),
    ((11, 23), "勤労感謝の日"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Holiday(&'static str),
    Sunday,
    Saturday,
    Weekday,
}

impl DayKind {
    pub fn label(&self) -> &'static str {
        match self {
            DayKind::Holiday(name) => *name,
            DayKind::Sunday => "日曜日",
            DayKind::Saturday => "土曜日",
            DayKind::Weekday => "平日",
        }
    }

    /// Holidays and Sundays are shown as days off.
    pub fn is_day_off(&self) -> bool {
        matches!(self, DayKind::Holiday(_) | DayKind::Sunday)
    }
}

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    JP_HOLIDAYS
        .iter()
        .find(|((m, d), _)| *m == date.month() && *d == date.day())
        .map(|(_, name)| *name)
}

pub fn classify_date(date: NaiveDate) -> DayKind {
    if let Some(name) = holiday_name(date) {
        return DayKind::Holiday(name);
    }
    match date.weekday() {
        Weekday::Sun => DayKind::Sunday,
        Weekday::Sat => DayKind::Saturday,
        _ => DayKind::Weekday,
    }
}

/// Free-text notes keyed by calendar date.
///
/// Serialized as a JSON object with `YYYY-MM-DD` keys in ascending order.
/// A blank note is never stored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedules {
    notes: BTreeMap<NaiveDate, String>,
}

impl Schedules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_note(&self, date: NaiveDate) -> &str {
        self.notes.get(&date).map(String::as_str).unwrap_or("")
    }

    pub fn has_note(&self, date: NaiveDate) -> bool {
        self.notes.contains_key(&date)
    }

    /// Upserts `text`, or removes the entry when `text` is blank.
    pub fn set_note(&mut self, date: NaiveDate, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.notes.remove(&date);
        } else {
            self.notes.insert(date, text);
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
