//! Conversion between Gregorian dates and the Khmer calendar.

use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

use crate::consts::{
    DAYS_PER_PHASE, EPOCH_ANIMAL, EPOCH_DAY, EPOCH_JS_YEAR, EPOCH_MONTH, EPOCH_YEAR,
    MAX_MONTH_STEPS, MAX_YEAR, MIN_YEAR,
};
use crate::era::be_to_ad;
use crate::gregorian::{GregorianDate, GregorianDateTime, julian_day};
use crate::new_year::NewYearDayInfo;
use crate::types::{AnimalYear, DayOfWeek, EraYear, KhmerMonth, MoonPhase, days_in_month};
use crate::{CalendarError, KhmerDate, fmt as khmer_fmt};

const EPOCH_JULIAN_DAY: i64 = julian_day(EPOCH_YEAR as i64, EPOCH_MONTH, EPOCH_DAY);

/// Khmer date of the day with Julian Day Number `jdn`.
fn khmer_date_at(jdn: i64) -> KhmerDate {
    KhmerDate::EPOCH + (jdn - EPOCH_JULIAN_DAY)
}

impl KhmerDate {
    /// Gregorian date of this Khmer date.
    ///
    /// Starts from the Khmer date of 1 January of the Gregorian year in which
    /// this BE year began and walks forward one month at a time.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidGregorianDate` if the date lies outside
    /// the supported Gregorian range, and
    /// `CalendarError::NonConvergentSearch` if the month walk gives up. Dates
    /// that passed [`KhmerDate::new`] or came out of date arithmetic always
    /// resolve within the cap, so the latter is not expected in practice.
    pub fn to_gregorian(&self) -> Result<GregorianDate, CalendarError> {
        let ad = be_to_ad(self.be_year());
        // dates early in BE MIN_YEAR + 544 are anchored in the year before
        if ad < i64::from(MIN_YEAR) - 1 || ad > i64::from(MAX_YEAR) {
            return Err(CalendarError::InvalidGregorianDate {
                year: ad,
                month: 1,
                day: 1,
            });
        }

        let anchor = julian_day(ad, 1, 1);
        let mut cursor = khmer_date_at(anchor);

        // park on waning 1 so every step lands on waning 1 of the next month
        let mut offset = i64::from(DAYS_PER_PHASE + 1) - i64::from(cursor.day().number());
        cursor = cursor + offset;

        let waxing_pisakh =
            self.month() == KhmerMonth::Pisakh && self.day().phase() == MoonPhase::Waxing;
        for step in 0..MAX_MONTH_STEPS {
            if cursor.month() == self.month() {
                // waxing ពិសាខ ends a BE year, the cursor already sits in the next
                let cursor_year = if waxing_pisakh {
                    cursor.be_year() - 1
                } else {
                    cursor.be_year()
                };
                if cursor_year == self.be_year() {
                    offset += i64::from(self.day().number()) - i64::from(DAYS_PER_PHASE + 1);
                    let date = GregorianDate::from_julian_day(anchor + offset)?;
                    debug!(khmer = %self, gregorian = %date, steps = step, "converted to Gregorian");
                    return Ok(date);
                }
            }

            let length = i64::from(days_in_month(cursor.month(), cursor.be_year()));
            trace!(step, month = %cursor.month(), be_year = cursor.be_year(), "month walk");
            offset += length;
            cursor = cursor + length;
        }

        Err(CalendarError::NonConvergentSearch {
            date: *self,
            steps: MAX_MONTH_STEPS,
        })
    }
}

/// A Gregorian moment together with its full Khmer calendar reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KhmerCalendar {
    gregorian: GregorianDateTime,
    date: KhmerDate,
    animal: AnimalYear,
    js_year: i64,
    new_year: NewYearDayInfo,
}

impl KhmerCalendar {
    /// Reads the Khmer calendar at a Gregorian civil date and time.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidGregorianDate` or
    /// `CalendarError::InvalidTime` for out-of-range input.
    pub fn from_gregorian(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        Self::from_datetime(GregorianDateTime::new(
            year, month, day, hour, minute, second,
        )?)
    }

    /// # Errors
    /// Fails only if the year's New Year cannot be computed.
    pub fn from_datetime(gregorian: GregorianDateTime) -> Result<Self, CalendarError> {
        let civil = gregorian.date();
        let date = khmer_date_at(civil.julian_day());
        let years_since_epoch = i64::from(civil.year()) - i64::from(EPOCH_YEAR);
        let new_year = NewYearDayInfo::from_ad_year(i64::from(civil.year()))?;

        // The animal changes at the New Year moment, the JS year at Leng Sak.
        let (past_new_year, past_leng_sak) =
            if matches!(date.month(), KhmerMonth::Chet | KhmerMonth::Pisakh) {
                let now = date.comparison_number(gregorian.hour(), gregorian.minute())?;
                let new_year_at = new_year
                    .new_year_date
                    .comparison_number(new_year.time.hour, new_year.time.minute)?;
                let leng_sak_at = new_year.leng_sak_date.comparison_number(0, 0)?;
                (now >= new_year_at, now >= leng_sak_at)
            } else {
                let now = date.ordinal();
                (
                    now >= new_year.new_year_date.ordinal(),
                    now >= new_year.leng_sak_date.ordinal(),
                )
            };

        let animal = AnimalYear::new(EPOCH_ANIMAL)? + (years_since_epoch + i64::from(past_new_year));
        let js_year = EPOCH_JS_YEAR + years_since_epoch + i64::from(past_leng_sak);

        debug!(%gregorian, khmer = %date, js_year, animal = animal.index(), "converted from Gregorian");

        Ok(Self {
            gregorian,
            date,
            animal,
            js_year,
            new_year,
        })
    }

    /// Reads the calendar for a Khmer date, optionally at `(hour, minute)`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTime` for an out-of-range time, or the
    /// error from [`KhmerDate::to_gregorian`].
    pub fn from_khmer_date(
        date: KhmerDate,
        time: Option<(u8, u8)>,
    ) -> Result<Self, CalendarError> {
        let (hour, minute) = time.unwrap_or((0, 0));
        let civil = date.to_gregorian()?;
        Self::from_datetime(GregorianDateTime::from_date(civil, hour, minute, 0)?)
    }

    #[inline]
    pub const fn gregorian(&self) -> GregorianDateTime {
        self.gregorian
    }

    #[inline]
    pub const fn date(&self) -> KhmerDate {
        self.date
    }

    #[inline]
    pub const fn animal(&self) -> AnimalYear {
        self.animal
    }

    /// Chula Sakaraj year, which turns over at Leng Sak.
    #[inline]
    pub const fn js_year(&self) -> i64 {
        self.js_year
    }

    #[inline]
    pub const fn be_year(&self) -> i64 {
        self.date.be_year()
    }

    pub const fn era(&self) -> EraYear {
        EraYear::from_js_year(self.js_year)
    }

    /// New Year of the Gregorian year this moment falls in.
    #[inline]
    pub const fn new_year(&self) -> &NewYearDayInfo {
        &self.new_year
    }

    pub const fn day_of_week(&self) -> DayOfWeek {
        self.gregorian.date().day_of_week()
    }

    /// Default Khmer rendering with Khmer numerals, e.g.
    /// `ថ្ងៃចន្ទ ១កើត ខែបុស្ស ឆ្នាំកុរ ឯកស័ក ពុទ្ធសករាជ ២៤៤៣`.
    pub fn format_khmer(&self) -> String {
        khmer_fmt::format_default(self)
    }

    /// Renders `pattern`, replacing format tokens. See [`crate::to_khmer_numeral`]
    /// for the digit conversion applied to token values.
    ///
    /// | token | value |
    /// |-------|-------|
    /// | `W` / `w` | weekday / short weekday |
    /// | `d` / `D` | day of phase / zero-padded |
    /// | `N` / `n` | moon phase / short phase |
    /// | `o` | lunar day symbol |
    /// | `m` / `ms` | lunar month / abbreviation |
    /// | `M` / `Ms` | Gregorian month / abbreviation |
    /// | `a` | animal year |
    /// | `e` | era |
    /// | `b` / `c` / `j` | BE / AD / JS year |
    ///
    /// Text inside `[...]` is copied verbatim.
    pub fn format_with(&self, pattern: &str) -> String {
        khmer_fmt::format_pattern(self, pattern)
    }

    /// Flattens the reading into a serializable record.
    pub fn to_record(&self) -> KhmerRecord {
        let civil = self.gregorian.date();
        let day = self.date.day();
        KhmerRecord {
            year: civil.year(),
            month: civil.month(),
            day: civil.day(),
            hour: self.gregorian.hour(),
            minute: self.gregorian.minute(),
            second: self.gregorian.second(),
            day_of_week: self.day_of_week(),
            khmer_day: day.number(),
            day_of_phase: day.day_of_phase(),
            moon_phase: day.phase(),
            khmer_month: self.date.month().name(),
            month_index: self.date.month().index(),
            be_year: self.be_year(),
            js_year: self.js_year,
            animal: self.animal.name(),
            animal_index: self.animal.index(),
            era: self.era().name(),
            new_year: self.new_year,
        }
    }
}

impl fmt::Display for KhmerCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ខែ {} ឆ្នាំ {} {} ព.ស. {}",
            self.date.day(),
            self.date.month(),
            self.animal,
            self.era(),
            self.be_year()
        )
    }
}

/// Flat field set of a [`KhmerCalendar`] for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KhmerRecord {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub day_of_week: DayOfWeek,
    /// Lunar day 1-30
    pub khmer_day: u8,
    pub day_of_phase: u8,
    pub moon_phase: MoonPhase,
    pub khmer_month: &'static str,
    pub month_index: u8,
    pub be_year: i64,
    pub js_year: i64,
    pub animal: &'static str,
    pub animal_index: u8,
    pub era: &'static str,
    pub new_year: NewYearDayInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KhmerDay;

    fn date(day: u8, month: KhmerMonth, be: i64) -> KhmerDate {
        KhmerDate::new(KhmerDay::from_number(day).unwrap(), month, be).unwrap()
    }

    #[test]
    fn test_from_gregorian_known_dates() {
        struct TestCase {
            input: (u16, u8, u8, u8, u8),
            khmer: (u8, KhmerMonth, i64),
            animal: u8,
            js_year: i64,
            description: &'static str,
        }

        let cases = [
            TestCase { input: (1900, 1, 1, 0, 0), khmer: (1, KhmerMonth::Bos, 2443), animal: 11, js_year: 1261, description: "epoch" },
            TestCase { input: (1899, 12, 31, 0, 0), khmer: (29, KhmerMonth::Mikasar, 2443), animal: 11, js_year: 1261, description: "day before epoch" },
            TestCase { input: (1800, 1, 1, 0, 0), khmer: (6, KhmerMonth::Bos, 2343), animal: 7, js_year: 1161, description: "a century earlier" },
            TestCase { input: (2000, 1, 1, 0, 0), khmer: (25, KhmerMonth::Mikasar, 2543), animal: 3, js_year: 1361, description: "millennium" },
            TestCase { input: (2023, 4, 14, 0, 0), khmer: (24, KhmerMonth::Chet, 2566), animal: 2, js_year: 1384, description: "New Year's Day before 16:00" },
            TestCase { input: (2024, 4, 13, 22, 0), khmer: (5, KhmerMonth::Chet, 2567), animal: 3, js_year: 1385, description: "before the New Year moment" },
            TestCase { input: (2024, 4, 13, 23, 0), khmer: (5, KhmerMonth::Chet, 2567), animal: 4, js_year: 1385, description: "after the New Year moment" },
            TestCase { input: (2024, 4, 15, 23, 59), khmer: (7, KhmerMonth::Chet, 2567), animal: 4, js_year: 1385, description: "last transitional day" },
            TestCase { input: (2024, 4, 16, 0, 0), khmer: (8, KhmerMonth::Chet, 2567), animal: 4, js_year: 1386, description: "Leng Sak" },
            TestCase { input: (2024, 12, 31, 0, 0), khmer: (2, KhmerMonth::Bos, 2568), animal: 4, js_year: 1386, description: "end of 2024" },
            TestCase { input: (2025, 1, 1, 0, 0), khmer: (3, KhmerMonth::Bos, 2568), animal: 4, js_year: 1386, description: "start of 2025" },
            TestCase { input: (2025, 5, 11, 0, 0), khmer: (15, KhmerMonth::Pisakh, 2568), animal: 5, js_year: 1387, description: "last day of BE 2568" },
            TestCase { input: (2025, 5, 12, 0, 0), khmer: (16, KhmerMonth::Pisakh, 2569), animal: 5, js_year: 1387, description: "first day of BE 2569" },
        ];

        for case in cases {
            let (y, m, d, h, mi) = case.input;
            let cal = KhmerCalendar::from_gregorian(y, m, d, h, mi, 0).unwrap();
            let (day, month, be) = case.khmer;
            assert_eq!(cal.date(), date(day, month, be), "date: {}", case.description);
            assert_eq!(cal.animal().index(), case.animal, "animal: {}", case.description);
            assert_eq!(cal.js_year(), case.js_year, "js year: {}", case.description);
        }
    }

    #[test]
    fn test_era_follows_js_year() {
        let cal = KhmerCalendar::from_gregorian(2024, 4, 15, 0, 0, 0).unwrap();
        assert_eq!(cal.era().index(), 5);
        let cal = KhmerCalendar::from_gregorian(2024, 4, 16, 0, 0, 0).unwrap();
        assert_eq!(cal.era().index(), 6);
        assert_eq!(cal.day_of_week(), DayOfWeek::Tuesday);
    }

    #[test]
    fn test_from_gregorian_rejects_invalid_input() {
        assert!(matches!(
            KhmerCalendar::from_gregorian(2023, 2, 29, 0, 0, 0),
            Err(CalendarError::InvalidGregorianDate { .. })
        ));
        assert!(matches!(
            KhmerCalendar::from_gregorian(2023, 2, 28, 24, 0, 0),
            Err(CalendarError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_to_gregorian() {
        let cases = [
            (date(1, KhmerMonth::Bos, 2443), (1900, 1, 1)),
            (date(13, KhmerMonth::Chet, 2443), (1900, 4, 12)),
            (date(15, KhmerMonth::Pisakh, 2568), (2025, 5, 11)),
            (date(16, KhmerMonth::Pisakh, 2569), (2025, 5, 12)),
            (date(8, KhmerMonth::Chet, 2567), (2024, 4, 16)),
            (date(1, KhmerMonth::PathamAsath, 2567), (2023, 6, 18)),
        ];
        for (khmer, (y, m, d)) in cases {
            assert_eq!(
                khmer.to_gregorian().unwrap(),
                GregorianDate::new(y, m, d).unwrap(),
                "{khmer}"
            );
        }
    }

    #[test]
    fn test_to_gregorian_out_of_range() {
        // past MAX_BE_YEAR, so only reachable through arithmetic
        let far = KhmerDate::new_unchecked(1, KhmerMonth::Bos, 20_000);
        assert!(matches!(
            far.to_gregorian(),
            Err(CalendarError::InvalidGregorianDate { year: 19_456, .. })
        ));
    }

    #[test]
    fn test_round_trip_across_leap_years() {
        // every day of two Gregorian years covering leap-day and leap-month BE years
        let start = GregorianDate::new(2023, 1, 1).unwrap();
        for offset in 0..731 {
            let civil = start.add_days(offset).unwrap();
            let cal = KhmerCalendar::from_datetime(civil.into()).unwrap();
            assert_eq!(cal.date().to_gregorian().unwrap(), civil, "{civil}");
        }
    }

    #[test]
    fn test_from_khmer_date_with_time() {
        let cal = KhmerCalendar::from_khmer_date(date(5, KhmerMonth::Chet, 2567), Some((23, 0))).unwrap();
        assert_eq!(cal.gregorian(), GregorianDateTime::new(2024, 4, 13, 23, 0, 0).unwrap());
        assert_eq!(cal.animal().index(), 4);

        let cal = KhmerCalendar::from_khmer_date(date(5, KhmerMonth::Chet, 2567), None).unwrap();
        assert_eq!(cal.animal().index(), 3);

        assert!(matches!(
            KhmerCalendar::from_khmer_date(date(5, KhmerMonth::Chet, 2567), Some((12, 60))),
            Err(CalendarError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_display() {
        let cal = KhmerCalendar::from_gregorian(1900, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(cal.to_string(), "1 កើត ខែ បុស្ស ឆ្នាំ កុរ ឯកស័ក ព.ស. 2443");
    }

    #[test]
    fn test_record() {
        let cal = KhmerCalendar::from_gregorian(2024, 4, 16, 8, 30, 15).unwrap();
        let record = cal.to_record();
        assert_eq!(record.year, 2024);
        assert_eq!(record.second, 15);
        assert_eq!(record.khmer_day, 8);
        assert_eq!(record.moon_phase, MoonPhase::Waxing);
        assert_eq!(record.khmer_month, "ចេត្រ");
        assert_eq!(record.be_year, 2567);
        assert_eq!(record.js_year, 1386);
        assert_eq!(record.animal, "រោង");
        assert_eq!(record.era, "ឆស័ក");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["day_of_week"], "Tuesday");
        assert_eq!(json["new_year"]["von_both"], 2);
        assert_eq!(json["new_year"]["leng_sak_date"]["day"], 8);
    }
}
