//! Day classification for penalty rate selection.
//!
//! This module maps a calendar date to the [`DayType`] that selects its pay
//! rule. Weekday, Saturday and Sunday come from the date itself; public
//! holidays come from a caller-supplied [`HolidayCalendar`] and take
//! precedence over the day of the week.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::HolidayCalendar;

/// Represents the type of day for penalty rate calculation.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A public holiday, on whatever day of the week it falls.
    PublicHoliday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::PublicHoliday => write!(f, "Public Holiday"),
        }
    }
}

/// Determines the day type for a date from its day of the week alone.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2026-02-07 is a Saturday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()), DayType::Saturday);
/// // 2026-02-08 is a Sunday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 2, 8).unwrap()), DayType::Sunday);
/// // 2026-02-09 is a Monday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Classifies a working date.
///
/// A date in the holiday calendar is [`DayType::PublicHoliday`] even when it
/// falls on a weekend; otherwise the day of the week decides. Total over all
/// dates.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::{classify_day, DayType};
/// use labor_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// // Anzac Day 2026 falls on a Saturday
/// let anzac = NaiveDate::from_ymd_opt(2026, 4, 25).unwrap();
/// let holidays = HolidayCalendar::from_dates([anzac]);
///
/// assert_eq!(classify_day(anzac, &holidays), DayType::PublicHoliday);
/// assert_eq!(classify_day(anzac, &HolidayCalendar::new()), DayType::Saturday);
/// ```
pub fn classify_day(date: NaiveDate, holidays: &HolidayCalendar) -> DayType {
    if holidays.is_public_holiday(date) {
        DayType::PublicHoliday
    } else {
        get_day_type(date)
    }
}
