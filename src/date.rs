use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::CalendarError;
use crate::consts::{DAYS_PER_PHASE, EPOCH_BE_YEAR, EPOCH_KHMER_DAY, MAX_BE_YEAR, MIN_BE_YEAR};
use crate::leap::LeapType;
use crate::types::{KhmerDay, KhmerMonth, days_in_month, days_in_year};

const FIRST_WANING_DAY: u8 = DAYS_PER_PHASE + 1;

/// A day of the Khmer lunar calendar.
///
/// `be_year` is the Buddhist Era year actually in force on this day. It turns
/// over between waxing 15 and waning 1 of ពិសាខ, so it is not simply the
/// Gregorian year plus 544.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawKhmerDate")]
pub struct KhmerDate {
    day: KhmerDay,
    month: KhmerMonth,
    be_year: i64,
}

#[derive(Deserialize)]
struct RawKhmerDate {
    day: u8,
    month: u8,
    be_year: i64,
}

impl TryFrom<RawKhmerDate> for KhmerDate {
    type Error = CalendarError;

    fn try_from(raw: RawKhmerDate) -> Result<Self, Self::Error> {
        Self::new(
            KhmerDay::from_number(raw.day)?,
            KhmerMonth::from_index(raw.month)?,
            raw.be_year,
        )
    }
}

impl KhmerDate {
    /// Waxing 1 of បុស្ស, BE 2443: the Khmer date of 1 January 1900.
    pub const EPOCH: Self = Self::new_unchecked(EPOCH_KHMER_DAY, KhmerMonth::Bos, EPOCH_BE_YEAR);

    /// Creates a date, checking it exists in `be_year`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidKhmerDate` if `be_year` is outside
    /// `MIN_BE_YEAR..=MAX_BE_YEAR`, if the month does not occur in that year
    /// (an intercalary month outside a leap-month year, or អាសាឍ inside one),
    /// or if the month is shorter than `day`.
    pub fn new(day: KhmerDay, month: KhmerMonth, be_year: i64) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidKhmerDate {
            day,
            month,
            be_year,
        };
        if !(MIN_BE_YEAR..=MAX_BE_YEAR).contains(&be_year) {
            return Err(invalid);
        }

        let leap = LeapType::try_of(be_year)?;
        // the two intercalary months stand in for អាសាឍ
        let replaced = month == KhmerMonth::Asath && leap == LeapType::LeapMonth;
        if replaced || day.number() > month.length(leap) {
            return Err(invalid);
        }
        Ok(Self {
            day,
            month,
            be_year,
        })
    }

    /// For values produced by the arithmetic below, which keeps `day` in
    /// `1..=month length`.
    pub(crate) const fn new_unchecked(day: u8, month: KhmerMonth, be_year: i64) -> Self {
        Self {
            day: KhmerDay::new_unchecked(day),
            month,
            be_year,
        }
    }

    #[inline]
    pub const fn day(&self) -> KhmerDay {
        self.day
    }

    #[inline]
    pub const fn month(&self) -> KhmerMonth {
        self.month
    }

    #[inline]
    pub const fn be_year(&self) -> i64 {
        self.be_year
    }

    /// Moves `days` forward, or backward when negative.
    pub fn add_days(self, days: i64) -> Self {
        if days < 0 {
            return self.subtract_days(days.unsigned_abs());
        }

        let mut remaining = days.unsigned_abs();
        let mut day = self.day.number();
        let mut month = self.month;
        let mut be = self.be_year;

        while remaining > 0 {
            if month == KhmerMonth::Pisakh {
                // crossing into the waning half starts the next BE year
                if day < FIRST_WANING_DAY && remaining >= u64::from(FIRST_WANING_DAY - day) {
                    remaining -= u64::from(FIRST_WANING_DAY - day);
                    day = FIRST_WANING_DAY;
                    be += 1;
                    continue;
                }
                if day == FIRST_WANING_DAY {
                    let year_len = u64::from(days_in_year(be));
                    if remaining >= year_len {
                        remaining -= year_len;
                        be += 1;
                        continue;
                    }
                }
            }

            let left = u64::from(days_in_month(month, be) - day);
            if remaining <= left {
                day += remaining as u8;
                remaining = 0;
            } else {
                remaining -= left + 1;
                month = month.next(be);
                day = 1;
            }
        }

        Self::new_unchecked(day, month, be)
    }

    /// Moves `days` backward.
    pub fn subtract_days(self, days: u64) -> Self {
        let mut remaining = days;
        let mut day = self.day.number();
        let mut month = self.month;
        let mut be = self.be_year;

        while remaining > 0 {
            if month == KhmerMonth::Pisakh {
                if day > FIRST_WANING_DAY && remaining >= u64::from(day - FIRST_WANING_DAY) {
                    remaining -= u64::from(day - FIRST_WANING_DAY);
                    day = FIRST_WANING_DAY;
                    continue;
                }
                if day == FIRST_WANING_DAY {
                    let year_len = u64::from(days_in_year(be - 1));
                    if remaining >= year_len {
                        remaining -= year_len;
                        be -= 1;
                        continue;
                    }
                }
            }

            let leaving_new_year = month == KhmerMonth::Pisakh && day >= FIRST_WANING_DAY;
            if remaining < u64::from(day) {
                let target = day - remaining as u8;
                if leaving_new_year && target < FIRST_WANING_DAY {
                    be -= 1;
                }
                day = target;
                remaining = 0;
            } else {
                remaining -= u64::from(day);
                if leaving_new_year {
                    be -= 1;
                }
                month = month.previous(be);
                day = days_in_month(month, be);
            }
        }

        Self::new_unchecked(day, month, be)
    }

    /// Coarse chronological ordinal within the calendar, comparable across
    /// years.
    ///
    /// Months are ranked from the start of the BE year (ពិសាខ waning) to its end
    /// (ពិសាខ waxing), with the intercalary months between ជេស្ឋ and អាសាឍ.
    pub(crate) fn ordinal(&self) -> i64 {
        let rank: i64 = match self.month {
            KhmerMonth::Pisakh if self.day.number() < FIRST_WANING_DAY => 14,
            KhmerMonth::Pisakh => 0,
            KhmerMonth::Jesth => 1,
            KhmerMonth::PathamAsath => 2,
            KhmerMonth::TutiyAsath => 3,
            KhmerMonth::Asath => 4,
            KhmerMonth::Srap => 5,
            KhmerMonth::Photrobot => 6,
            KhmerMonth::Assoch => 7,
            KhmerMonth::Kadek => 8,
            KhmerMonth::Mikasar => 9,
            KhmerMonth::Bos => 10,
            KhmerMonth::Meak => 11,
            KhmerMonth::Phalgun => 12,
            KhmerMonth::Chet => 13,
        };
        self.be_year * 10_000 + rank * 100 + i64::from(self.day.number())
    }

    /// Minute-resolution position of `hour:minute` on this day, for dates in
    /// ចេត្រ or ពិសាខ.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonthForComparison` for any other month.
    pub fn comparison_number(&self, hour: u8, minute: u8) -> Result<i64, CalendarError> {
        if !matches!(self.month, KhmerMonth::Chet | KhmerMonth::Pisakh) {
            return Err(CalendarError::InvalidMonthForComparison { month: self.month });
        }
        let day_index = i64::from(self.month.index()) * 30 + i64::from(self.day.number());
        Ok(day_index * 1440 + i64::from(hour) * 60 + i64::from(minute))
    }
}

impl Add<i64> for KhmerDate {
    type Output = Self;

    fn add(self, days: i64) -> Self {
        self.add_days(days)
    }
}

impl Sub<u64> for KhmerDate {
    type Output = Self;

    fn sub(self, days: u64) -> Self {
        self.subtract_days(days)
    }
}

impl fmt::Display for KhmerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ខែ {} ព.ស. {}", self.day, self.month, self.be_year)
    }
}
