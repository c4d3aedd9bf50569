//! Khmer lunisolar calendar.
//!
//! Converts Gregorian dates to the traditional Khmer calendar and back:
//! lunar day and month, Buddhist Era and Chula Sakaraj year numbers, the
//! twelve-animal and ten-era cycles, and the astronomically derived moment of
//! the Khmer New Year (Songkran).
//!
//! ```
//! use khmer_calendar::{KhmerCalendar, KhmerMonth, MoonPhase};
//!
//! let cal = KhmerCalendar::from_gregorian(1900, 1, 1, 0, 0, 0)?;
//! assert_eq!(cal.date().month(), KhmerMonth::Bos);
//! assert_eq!(cal.date().day().phase(), MoonPhase::Waxing);
//! assert_eq!(cal.be_year(), 2443);
//! assert_eq!(cal.js_year(), 1261);
//! assert_eq!(cal.animal().name(), "កុរ");
//! # Ok::<(), khmer_calendar::CalendarError>(())
//! ```

mod calendar;
mod consts;
mod date;
mod fmt;
mod gregorian;
mod leap;
mod new_year;
mod prelude;
mod types;

pub mod era;

pub use calendar::{KhmerCalendar, KhmerRecord};
pub use consts::*;
pub use date::KhmerDate;
pub use fmt::to_khmer_numeral;
pub use gregorian::{GregorianDate, GregorianDateTime};
pub use leap::{
    LeapType, aharkun, aharkun_js, avoman, avoman_js, bodithey, bodithey_js, has_366_days_js,
    is_adhikameas_js, is_chantrathimeas_js, is_leap_day, is_leap_month, is_solar_leap, kromthupul,
    kromthupul_js,
};
pub use new_year::{NewYearDayInfo, NewYearTime, SolarPosition, new_year_moment};
pub use types::{
    AnimalYear, DayOfWeek, EraYear, KhmerDay, KhmerMonth, MoonPhase, days_in_month, days_in_year,
    months_of_year,
};

/// Errors produced by calendar construction and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Minute-resolution comparison was asked for a month other than ចេត្រ or ពិសាខ.
    #[error("minute comparison is only defined for ចេត្រ and ពិសាខ, got {month}")]
    InvalidMonthForComparison { month: KhmerMonth },

    /// The month-by-month search for a Gregorian date hit its step cap.
    #[error("no Gregorian date found for {date} within {steps} months")]
    NonConvergentSearch {
        /// Date being searched for
        date: KhmerDate,
        /// Months walked before giving up
        steps: u32,
    },

    /// Day or month does not exist in the given Buddhist Era year.
    #[error("day {day} of {month} does not exist in BE {be_year}")]
    InvalidKhmerDate {
        day: KhmerDay,
        month: KhmerMonth,
        be_year: i64,
    },

    /// Lunar day outside 1-15 within a phase, or 1-30 as a month day.
    #[error("invalid lunar day: {day}")]
    InvalidKhmerDay { day: u8 },

    #[error("invalid Khmer month index: {0} (must be 0-13)")]
    InvalidMonthIndex(u8),

    #[error("invalid animal year index: {0} (must be 0-11)")]
    InvalidAnimalIndex(u8),

    /// Calendar date does not exist, or lies outside `MIN_YEAR..=MAX_YEAR`.
    #[error("invalid Gregorian date {year:04}-{month:02}-{day:02}")]
    InvalidGregorianDate { year: i64, month: u8, day: u8 },

    #[error("invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// Too many consecutive leap-month years before `be_year`.
    #[error("leap-day lookback exceeded for BE {be_year}")]
    LeapLookbackExceeded { be_year: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_epoch_scenario() {
        let cal = KhmerCalendar::from_gregorian(1900, 1, 1, 0, 0, 0).unwrap();
        let date = cal.date();
        assert_eq!(date.day(), KhmerDay::new(1, MoonPhase::Waxing).unwrap());
        assert_eq!(date.month(), KhmerMonth::Bos);
        assert_eq!(date.be_year(), 2443);
        assert_eq!(cal.animal(), AnimalYear::new(11).unwrap());
        assert_eq!(cal.js_year(), 1261);
    }

    #[test]
    fn test_round_trip_sample() {
        let cases = [
            (1000, 1, 1),
            (1800, 1, 1),
            (1899, 12, 31),
            (1900, 4, 12),
            (2000, 2, 29),
            (2024, 4, 13),
            (2024, 4, 16),
            (2025, 5, 11),
            (2025, 5, 12),
            (2300, 6, 30),
            (9999, 11, 30),
        ];
        for (y, m, d) in cases {
            let cal = KhmerCalendar::from_gregorian(y, m, d, 0, 0, 0).unwrap();
            let back = cal.date().to_gregorian().unwrap();
            assert_eq!(back, GregorianDate::new(y, m, d).unwrap(), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CalendarError>();
    }

    #[test]
    fn test_error_display() {
        let err = CalendarError::InvalidMonthForComparison {
            month: KhmerMonth::Srap,
        };
        assert_eq!(
            err.to_string(),
            "minute comparison is only defined for ចេត្រ and ពិសាខ, got ស្រាពណ៍"
        );

        let err = CalendarError::InvalidGregorianDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(err.to_string(), "invalid Gregorian date 2023-02-29");

        let err = CalendarError::InvalidTime {
            hour: 24,
            minute: 0,
            second: 0,
        };
        assert_eq!(err.to_string(), "invalid time 24:00:00");

        let err = CalendarError::NonConvergentSearch {
            date: KhmerDate::EPOCH,
            steps: MAX_MONTH_STEPS,
        };
        assert_eq!(
            err.to_string(),
            "no Gregorian date found for 1 កើត ខែ បុស្ស ព.ស. 2443 within 26 months"
        );

        let err = CalendarError::LeapLookbackExceeded { be_year: 2567 };
        assert_eq!(err.to_string(), "leap-day lookback exceeded for BE 2567");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_gregorian_round_trip(offset in 0i64..3_287_151) {
            // days from 1000-01-01 up to 9999-11-30
            let jdn = GregorianDate::new(1000, 1, 1).unwrap().julian_day() + offset;
            let date = GregorianDate::from_julian_day(jdn).unwrap();
            let cal = KhmerCalendar::from_gregorian(date.year(), date.month(), date.day(), 12, 0, 0).unwrap();
            let back = KhmerCalendar::from_khmer_date(cal.date(), None).unwrap();
            prop_assert_eq!(back.gregorian().date(), date);
            prop_assert_eq!(back.date(), cal.date());
        }
    }
}
