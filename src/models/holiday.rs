//! Public holiday models.
//!
//! Holiday detection lives outside the engine. This module only holds the
//! caller-supplied holiday list and answers membership questions against it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single public holiday.
///
/// # Example
///
/// ```
/// use labor_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     name: "Australia Day".to_string(),
///     region: "national".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "Australia Day").
    pub name: String,
    /// The region where this holiday applies (e.g., "national", "nsw").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

/// The set of public holidays known to a calculation.
///
/// Serializes as a plain list of [`PublicHoliday`] entries. When two entries
/// share a date the later one wins.
///
/// # Example
///
/// ```
/// use labor_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let christmas = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
/// let calendar = HolidayCalendar::from_dates([christmas]);
///
/// assert!(calendar.is_public_holiday(christmas));
/// assert!(!calendar.is_public_holiday(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PublicHoliday>", into = "Vec<PublicHoliday>")]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, PublicHoliday>,
}

impl HolidayCalendar {
    /// Creates an empty holiday calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a calendar from bare dates, naming each entry generically.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        dates
            .into_iter()
            .map(|date| PublicHoliday {
                date,
                name: "Public Holiday".to_string(),
                region: default_region(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Returns true if the date is a public holiday.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Returns the holiday on a date, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&PublicHoliday> {
        self.holidays.get(&date)
    }

    /// Adds a holiday, replacing any existing entry on the same date.
    pub fn insert(&mut self, holiday: PublicHoliday) {
        self.holidays.insert(holiday.date, holiday);
    }

    /// Returns a copy of this calendar with additional dates marked as holidays.
    pub fn with_extra_dates(&self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut merged = self.clone();
        for holiday in HolidayCalendar::from_dates(dates).holidays.into_values() {
            merged.holidays.entry(holiday.date).or_insert(holiday);
        }
        merged
    }

    /// All holiday dates in ascending order.
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.holidays.keys().copied().collect()
    }

    /// The number of holidays in the calendar.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the calendar holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl From<Vec<PublicHoliday>> for HolidayCalendar {
    fn from(list: Vec<PublicHoliday>) -> Self {
        let mut calendar = HolidayCalendar::new();
        for holiday in list {
            calendar.insert(holiday);
        }
        calendar
    }
}

impl From<HolidayCalendar> for Vec<PublicHoliday> {
    fn from(calendar: HolidayCalendar) -> Self {
        calendar.holidays.into_values().collect()
    }
}
