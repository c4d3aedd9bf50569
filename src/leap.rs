//! Intercalation rules.
//!
//! Two families of the traditional aharkun / avoman / bodithey sequences live
//! here. The Buddhist Era family drives month and year lengths; the Chula
//! Sakaraj family (the `_js` functions) is only consulted by the New Year
//! calculation. Their constants differ, so they are written out separately.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    AVOMAN_MODULUS, BE_AVOMAN_ADDEND, BE_HARKUN_ADDEND, BE_HARKUN_OFFSET, BODITHEY_MODULUS,
    DAYS_IN_LEAP_DAY_YEAR, DAYS_IN_LEAP_MONTH_YEAR, DAYS_IN_PLAIN_YEAR, JS_AVOMAN_ADDEND,
    JS_HARKUN_ADDEND, JS_HARKUN_OFFSET, KROMTHUPUL_MODULUS, MAX_LEAP_LOOKBACK, SOLAR_DAYS_PER_800,
    SOLAR_LEAP_THRESHOLD,
};
use crate::{CalendarError, prelude::*};

// --- Buddhist Era family ---

/// Elapsed days since the start of the era for BE year `be`.
pub const fn aharkun(be: i64) -> i64 {
    (be * SOLAR_DAYS_PER_800 + BE_HARKUN_ADDEND) / KROMTHUPUL_MODULUS + BE_HARKUN_OFFSET
}

/// Remaining sun-days of the 800-day cycle.
pub const fn kromthupul(be: i64) -> i64 {
    KROMTHUPUL_MODULUS - (be * SOLAR_DAYS_PER_800 + BE_HARKUN_ADDEND) % KROMTHUPUL_MODULUS
}

/// Avoman (lunar excess) of BE year `be`, 0..692.
pub const fn avoman(be: i64) -> i64 {
    (aharkun(be) * 11 + BE_AVOMAN_ADDEND) % AVOMAN_MODULUS
}

/// Lunar day on which the solar year starts (0..=29).
pub const fn bodithey(be: i64) -> i64 {
    let ahk = aharkun(be);
    ((ahk * 11 + BE_AVOMAN_ADDEND) / AVOMAN_MODULUS + ahk + 29) % BODITHEY_MODULUS
}

/// Whether BE year `be` is a 366-day solar year.
pub const fn is_solar_leap(be: i64) -> bool {
    kromthupul(be) <= SOLAR_LEAP_THRESHOLD
}

/// Whether BE year `be` qualifies for an extra day (ចន្ទ្រាធិមាស).
pub const fn is_leap_day(be: i64) -> bool {
    let av = avoman(be);
    if av == 0 && avoman(be - 1) == 137 {
        true
    } else if is_solar_leap(be) {
        av < 127
    } else if av == 137 && avoman(be + 1) == 0 {
        false
    } else {
        av < 138
    }
}

/// Whether BE year `be` qualifies for an extra month (អធិកមាស).
pub const fn is_leap_month(be: i64) -> bool {
    let b = bodithey(be);
    let next = bodithey(be + 1);
    if b == 25 && next == 5 {
        return false;
    }
    (b == 24 && next == 6) || b >= 25 || b < 6
}

// --- Chula Sakaraj family ---

/// Elapsed days since the start of the era for JS year `js`.
pub const fn aharkun_js(js: i64) -> i64 {
    (js * SOLAR_DAYS_PER_800 + JS_HARKUN_ADDEND) / KROMTHUPUL_MODULUS + JS_HARKUN_OFFSET
}

/// Remaining sun-days of the 800-day cycle for JS year `js`.
pub const fn kromthupul_js(js: i64) -> i64 {
    KROMTHUPUL_MODULUS - (js * SOLAR_DAYS_PER_800 + JS_HARKUN_ADDEND) % KROMTHUPUL_MODULUS
}

/// Avoman of JS year `js`, 0..692.
pub const fn avoman_js(js: i64) -> i64 {
    (aharkun_js(js) * 11 + JS_AVOMAN_ADDEND) % AVOMAN_MODULUS
}

/// Lunar day on which JS year `js` starts (0..=29).
pub const fn bodithey_js(js: i64) -> i64 {
    let ahk = aharkun_js(js);
    (ahk + (11 * ahk + JS_AVOMAN_ADDEND) / AVOMAN_MODULUS) % BODITHEY_MODULUS
}

/// Whether JS year `js` counted 366 elapsed days.
pub const fn has_366_days_js(js: i64) -> bool {
    kromthupul_js(js) <= SOLAR_LEAP_THRESHOLD
}

/// Leap-month test on the JS-anchored bodithey.
pub const fn is_adhikameas_js(js: i64) -> bool {
    let b = bodithey_js(js);
    let next = bodithey_js(js + 1);
    if b == 24 && next == 6 {
        return true;
    }
    if b == 25 && next == 5 {
        return false;
    }
    b > 24 || b < 6
}

/// Leap-day test on the JS-anchored avoman.
pub const fn is_chantrathimeas_js(js: i64) -> bool {
    let av = avoman_js(js);
    if av == 0 && avoman_js(js - 1) == 137 {
        true
    } else if has_366_days_js(js) {
        av < 127
    } else if av == 137 && avoman_js(js + 1) == 0 {
        false
    } else {
        av < 138
    }
}

/// Intercalation applied to a Buddhist Era year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum LeapType {
    #[display(fmt = "no leap")]
    NoLeap,
    /// ជេស្ឋ gets a 30th day.
    #[display(fmt = "leap day")]
    LeapDay,
    /// បឋមាសាឍ and ទុតិយាសាឍ replace អាសាឍ.
    #[display(fmt = "leap month")]
    LeapMonth,
}

impl LeapType {
    /// Classifies BE year `be`.
    ///
    /// A year that is neither leap-month nor leap-day on its own still takes
    /// the leap day when it directly follows a run of leap-month years and a
    /// year in that run also qualified for a leap day.
    ///
    /// # Errors
    /// Returns `CalendarError::LeapLookbackExceeded` if the run of preceding
    /// leap-month years is longer than `MAX_LEAP_LOOKBACK`.
    pub fn try_of(be: i64) -> Result<Self, CalendarError> {
        if is_leap_month(be) {
            return Ok(Self::LeapMonth);
        }
        if is_leap_day(be) {
            return Ok(Self::LeapDay);
        }
        if !is_leap_month(be - 1) {
            return Ok(Self::NoLeap);
        }

        let mut year = be - 1;
        for _ in 0..MAX_LEAP_LOOKBACK {
            if is_leap_day(year) {
                return Ok(Self::LeapDay);
            }
            year -= 1;
            if !is_leap_month(year) {
                return Ok(Self::NoLeap);
            }
        }
        Err(CalendarError::LeapLookbackExceeded { be_year: be })
    }

    /// Like [`LeapType::try_of`], falling back to `NoLeap` when the lookback
    /// is exhausted.
    pub fn of(be: i64) -> Self {
        Self::try_of(be).unwrap_or_else(|err| {
            warn!(be_year = be, %err, "leap lookback exhausted, treating year as plain");
            Self::NoLeap
        })
    }

    /// Number of days in a year of this type.
    pub const fn days_in_year(self) -> u16 {
        match self {
            Self::NoLeap => DAYS_IN_PLAIN_YEAR,
            Self::LeapDay => DAYS_IN_LEAP_DAY_YEAR,
            Self::LeapMonth => DAYS_IN_LEAP_MONTH_YEAR,
        }
    }
}
