use serde::{Deserialize, Serialize};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_YEAR,
};
use crate::types::DayOfWeek;
use crate::{CalendarError, prelude::*};

/// A proleptic Gregorian calendar date within `MIN_YEAR..=MAX_YEAR`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
#[serde(try_from = "RawGregorianDate")]
pub struct GregorianDate {
    year: u16,
    month: u8,
    day: u8,
}

#[derive(Deserialize)]
struct RawGregorianDate {
    year: u16,
    month: u8,
    day: u8,
}

impl TryFrom<RawGregorianDate> for GregorianDate {
    type Error = CalendarError;

    fn try_from(raw: RawGregorianDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl GregorianDate {
    /// # Errors
    /// Returns `CalendarError::InvalidGregorianDate` if the year is outside
    /// `MIN_YEAR..=MAX_YEAR`, the month outside 1-12, or the day outside the
    /// month.
    pub const fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let valid = year >= MIN_YEAR
            && year <= MAX_YEAR
            && month >= 1
            && month <= MAX_MONTH
            && day >= 1
            && day <= days_in_month(year, month);
        if !valid {
            return Err(CalendarError::InvalidGregorianDate {
                year: year as i64,
                month,
                day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Date of a Julian Day Number.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidGregorianDate` if the day falls outside
    /// the supported year range.
    pub fn from_julian_day(jdn: i64) -> Result<Self, CalendarError> {
        let a = jdn + 32_044;
        let b = (4 * a + 3) / 146_097;
        let c = a - (146_097 * b) / 4;
        let d = (4 * c + 3) / 1461;
        let e = c - (1461 * d) / 4;
        let m = (5 * e + 2) / 153;

        let day = e - (153 * m + 2) / 5 + 1;
        let month = m + 3 - 12 * (m / 10);
        let year = 100 * b + d - 4800 + m / 10;

        let out_of_range = CalendarError::InvalidGregorianDate {
            year,
            month: month as u8,
            day: day as u8,
        };
        let year = u16::try_from(year).map_err(|_| out_of_range.clone())?;
        Self::new(year, month as u8, day as u8).map_err(|_| out_of_range)
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Julian Day Number at civil noon of this date.
    pub const fn julian_day(&self) -> i64 {
        julian_day(self.year as i64, self.month, self.day)
    }

    pub const fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from_julian_day(self.julian_day())
    }

    /// Shifts by `days` in either direction.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidGregorianDate` when the result leaves the
    /// supported range.
    pub fn add_days(&self, days: i64) -> Result<Self, CalendarError> {
        Self::from_julian_day(self.julian_day() + days)
    }
}

/// A civil date and time of day. No time zone is implied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{date} {hour:02}:{minute:02}:{second:02}")]
#[serde(try_from = "RawGregorianDateTime")]
pub struct GregorianDateTime {
    date: GregorianDate,
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Deserialize)]
struct RawGregorianDateTime {
    date: GregorianDate,
    hour: u8,
    minute: u8,
    second: u8,
}

impl TryFrom<RawGregorianDateTime> for GregorianDateTime {
    type Error = CalendarError;

    fn try_from(raw: RawGregorianDateTime) -> Result<Self, Self::Error> {
        Self::from_date(raw.date, raw.hour, raw.minute, raw.second)
    }
}

impl GregorianDateTime {
    /// # Errors
    /// Returns `CalendarError::InvalidGregorianDate` for an invalid date and
    /// `CalendarError::InvalidTime` for an hour past 23 or a minute or second
    /// past 59.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        Self::from_date(GregorianDate::new(year, month, day)?, hour, minute, second)
    }

    /// # Errors
    /// Returns `CalendarError::InvalidTime` for an out-of-range time of day.
    pub const fn from_date(
        date: GregorianDate,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            date,
            hour,
            minute,
            second,
        })
    }

    #[inline]
    pub const fn date(&self) -> GregorianDate {
        self.date
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl From<GregorianDate> for GregorianDateTime {
    /// Midnight at the start of `date`.
    fn from(date: GregorianDate) -> Self {
        Self {
            date,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

/// Julian Day Number of any proleptic Gregorian date after 4800 BC.
pub(crate) const fn julian_day(year: i64, month: u8, day: u8) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year + 4800 - a;
    let m = month as i64 + 12 * a - 3;
    day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32_045
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in a Gregorian month; 0 for a month outside 1-12.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    if month == 0 || month > MAX_MONTH {
        0
    } else if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
