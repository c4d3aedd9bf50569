//! Khmer New Year (Songkran) computation.
//!
//! The sun's mean longitude is stepped over four candidate elapsed-day counts
//! near the end of the Chula Sakaraj year, corrected with the traditional
//! equation-of-center table, and the candidate that puts the sun at zero
//! degrees fixes the hour and minute of the transition. Leng Sak, the day the
//! new year number takes effect, comes from the JS-anchored bodithey; New
//! Year's Day is one or two transitional (Von Both) days before it.

use serde::Serialize;
use tracing::debug;

use crate::consts::{
    ARC_PER_DEGREE, ARC_PER_SIGN, BODITHEY_MODULUS, MINUTES_PER_DAY, NEW_YEAR_OVERRIDES,
    SHADOW_DEFAULT, SHADOW_TABLE, SOTINS, SOTINS_AFTER_LONG_YEAR,
};
use crate::era::{ad_to_js, js_to_be};
use crate::gregorian::{GregorianDate, GregorianDateTime};
use crate::leap::{
    aharkun, bodithey_js, has_366_days_js, is_adhikameas_js, is_chantrathimeas_js, kromthupul_js,
};
use crate::types::{DayOfWeek, KhmerDay, KhmerMonth};
use crate::{CalendarError, KhmerDate};

/// Weekday of Leng Sak indexed by `aharkun mod 7`.
static LENG_SAK_WEEKDAYS: [DayOfWeek; 7] = [
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
];

/// Solar longitude as zodiac sign, degree and minute of arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SolarPosition {
    pub reasey: i64,
    pub angsar: i64,
    pub libda: i64,
}

impl SolarPosition {
    const fn from_arc(arc: i64) -> Self {
        Self {
            reasey: arc / ARC_PER_SIGN,
            angsar: (arc % ARC_PER_SIGN) / ARC_PER_DEGREE,
            libda: arc % ARC_PER_DEGREE,
        }
    }

    /// Corrected solar longitude after `sotin` elapsed days of JS year `js`.
    pub fn after(js: i64, sotin: i64) -> Self {
        let r2 = 800 * sotin + kromthupul_js(js - 1);
        let reasey = r2 / 24_350;
        let r3 = r2 % 24_350;
        let angsar = r3 / 811;
        let libda = (r3 % 811) / 14 - 3;
        let mean = ARC_PER_SIGN * reasey + ARC_PER_DEGREE * angsar + libda;

        let start = ARC_PER_SIGN * 2 + ARC_PER_DEGREE * 20;
        let mut left = mean - start;
        if mean < start {
            left += ARC_PER_SIGN * 12;
        }
        let kaen = left / ARC_PER_SIGN;

        let reduced = match kaen {
            0..=2 => kaen,
            3..=5 => ARC_PER_SIGN * 6 - left,
            6..=8 => left - ARC_PER_SIGN * 6,
            9..=11 => ARC_PER_SIGN * 11 + ARC_PER_DEGREE * 29 + 60 - left,
            _ => -1,
        };

        let reasey = reduced / ARC_PER_SIGN;
        let angsar = (reduced % ARC_PER_SIGN) / ARC_PER_DEGREE;
        let libda = reduced % ARC_PER_DEGREE;
        let (khan, pouichalip) = if angsar >= 15 {
            (2 * reasey + 1, 60 * (angsar - 15) + libda)
        } else {
            (2 * reasey, 60 * angsar + libda)
        };

        let (multiplicity, chhaya) = usize::try_from(khan)
            .ok()
            .and_then(|k| SHADOW_TABLE.get(k).copied())
            .unwrap_or(SHADOW_DEFAULT);
        let phol = pouichalip * multiplicity / 900 + chhaya;

        Self::from_arc(if kaen <= 5 { mean - phol } else { mean + phol })
    }
}

/// Hour and minute of the New Year transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NewYearTime {
    pub hour: u8,
    pub minute: u8,
}

/// Everything about the New Year of one Chula Sakaraj year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewYearDayInfo {
    pub js_year: i64,
    pub time: NewYearTime,
    /// Transitional days between New Year's Day and Leng Sak, 1 or 2.
    pub von_both: u8,
    pub new_year_date: KhmerDate,
    pub new_year_weekday: DayOfWeek,
    pub leng_sak_date: KhmerDate,
    pub leng_sak_weekday: DayOfWeek,
    /// Solar positions at the four elapsed-day seeds, earliest first.
    pub candidates: [SolarPosition; 4],
}

impl NewYearDayInfo {
    /// Computes the New Year that starts JS year `js`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidKhmerDay` if the Leng Sak day falls
    /// outside a month, which happens only for years before the Chula Sakaraj
    /// era.
    pub fn from_js_year(js: i64) -> Result<Self, CalendarError> {
        let sotins = if has_366_days_js(js - 1) {
            SOTINS_AFTER_LONG_YEAR
        } else {
            SOTINS
        };
        let candidates = sotins.map(|sotin| SolarPosition::after(js, sotin));

        let time = candidates
            .iter()
            .find(|sun| sun.angsar == 0)
            .map(|sun| {
                let minutes = MINUTES_PER_DAY - sun.libda * 24;
                NewYearTime {
                    hour: (minutes / 60).rem_euclid(24) as u8,
                    minute: minutes.rem_euclid(60) as u8,
                }
            })
            .unwrap_or_default();
        let von_both: u8 = if candidates[0].angsar == 0 { 2 } else { 1 };

        let leng_sak_date = leng_sak(js)?;
        let leng_sak_weekday = LENG_SAK_WEEKDAYS[aharkun(js_to_be(js)).rem_euclid(7) as usize];

        let back = von_both + 1;
        let new_year_date = leng_sak_date - u64::from(back);
        let new_year_weekday = leng_sak_weekday + -i64::from(back);

        debug!(
            js_year = js,
            hour = time.hour,
            minute = time.minute,
            von_both,
            "computed New Year"
        );

        Ok(Self {
            js_year: js,
            time,
            von_both,
            new_year_date,
            new_year_weekday,
            leng_sak_date,
            leng_sak_weekday,
            candidates,
        })
    }

    /// New Year falling in Gregorian year `ad`.
    ///
    /// # Errors
    /// See [`NewYearDayInfo::from_js_year`].
    pub fn from_ad_year(ad: i64) -> Result<Self, CalendarError> {
        Self::from_js_year(ad_to_js(ad))
    }
}

/// Khmer date of Leng Sak for JS year `js`.
fn leng_sak(js: i64) -> Result<KhmerDate, CalendarError> {
    let bodithey = bodithey_js(js);
    let doubly_leap = is_adhikameas_js(js - 1) && is_chantrathimeas_js(js - 1);

    let (day, month) = if bodithey >= 6 {
        let day = if doubly_leap { bodithey + 1 } else { bodithey };
        if day >= BODITHEY_MODULUS {
            (day - (BODITHEY_MODULUS - 1), KhmerMonth::Pisakh)
        } else {
            (day, KhmerMonth::Chet)
        }
    } else {
        (bodithey + 1, KhmerMonth::Pisakh)
    };
    let day = KhmerDay::from_number(u8::try_from(day).unwrap_or(0))?;

    // ពិសាខ waxing still belongs to the outgoing BE year
    let be = js_to_be(js);
    let be = if month == KhmerMonth::Chet || day.number() <= 15 {
        be - 1
    } else {
        be
    };
    Ok(KhmerDate::new_unchecked(day.number(), month, be))
}

/// Gregorian moment of the New Year in year `ad`.
///
/// Years with an officially announced moment that differs from the computed
/// one return the announced moment. The announcement only changes this
/// answer: [`NewYearDayInfo`] and the animal year placement in
/// [`crate::KhmerCalendar`] keep using the computed moment, so in those years
/// the two can disagree by some hours.
///
/// # Errors
/// Returns `CalendarError::InvalidGregorianDate` when `ad` is outside the
/// supported range.
pub fn new_year_moment(ad: u16) -> Result<GregorianDateTime, CalendarError> {
    if let Some(&(_, month, day, hour, minute)) =
        NEW_YEAR_OVERRIDES.iter().find(|entry| entry.0 == ad)
    {
        debug!(year = ad, "using announced New Year moment");
        return GregorianDateTime::new(ad, month, day, hour, minute, 0);
    }

    // validate the year before doing any work
    GregorianDate::new(ad, 1, 1)?;
    let info = NewYearDayInfo::from_ad_year(i64::from(ad))?;
    let date = info.new_year_date.to_gregorian()?;
    GregorianDateTime::from_date(date, info.time.hour, info.time.minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u8, month: KhmerMonth, be: i64) -> KhmerDate {
        KhmerDate::new(KhmerDay::from_number(day).unwrap(), month, be).unwrap()
    }

    #[test]
    fn test_candidates_1900() {
        let info = NewYearDayInfo::from_ad_year(1900).unwrap();
        let expected = [(12, 0, 11), (12, 1, 10), (12, 2, 7), (12, 3, 4)];
        for (sun, (reasey, angsar, libda)) in info.candidates.iter().zip(expected) {
            assert_eq!((sun.reasey, sun.angsar, sun.libda), (reasey, angsar, libda));
        }
    }

    #[test]
    fn test_candidates_2024() {
        let info = NewYearDayInfo::from_ad_year(2024).unwrap();
        let expected = [(12, 0, 4), (12, 1, 3), (12, 2, 1), (12, 2, 59)];
        for (sun, (reasey, angsar, libda)) in info.candidates.iter().zip(expected) {
            assert_eq!((sun.reasey, sun.angsar, sun.libda), (reasey, angsar, libda));
        }
    }

    #[test]
    fn test_known_new_years() {
        struct TestCase {
            ad: i64,
            time: (u8, u8),
            von_both: u8,
            new_year: (u8, i64),
            leng_sak: (u8, i64),
            description: &'static str,
        }

        // every one of these falls in ចេត្រ
        let cases = [
            TestCase { ad: 1900, time: (19, 36), von_both: 2, new_year: (13, 2443), leng_sak: (16, 2443), description: "epoch year" },
            TestCase { ad: 2011, time: (13, 36), von_both: 1, new_year: (11, 2554), leng_sak: (13, 2554), description: "announced moment differs" },
            TestCase { ad: 2020, time: (20, 48), von_both: 2, new_year: (21, 2563), leng_sak: (24, 2563), description: "two transitional days" },
            TestCase { ad: 2023, time: (16, 0), von_both: 1, new_year: (24, 2566), leng_sak: (26, 2566), description: "one transitional day" },
            TestCase { ad: 2024, time: (22, 24), von_both: 2, new_year: (5, 2567), leng_sak: (8, 2567), description: "leap-month year" },
            TestCase { ad: 2025, time: (4, 48), von_both: 1, new_year: (17, 2568), leng_sak: (19, 2568), description: "morning transition" },
            TestCase { ad: 2026, time: (10, 48), von_both: 1, new_year: (27, 2569), leng_sak: (29, 2569), description: "late ចេត្រ" },
        ];

        for case in cases {
            let info = NewYearDayInfo::from_ad_year(case.ad).unwrap();
            assert_eq!((info.time.hour, info.time.minute), case.time, "time: {}", case.description);
            assert_eq!(info.von_both, case.von_both, "von both: {}", case.description);
            assert_eq!(
                info.new_year_date,
                date(case.new_year.0, KhmerMonth::Chet, case.new_year.1),
                "new year: {}",
                case.description
            );
            assert_eq!(
                info.leng_sak_date,
                date(case.leng_sak.0, KhmerMonth::Chet, case.leng_sak.1),
                "leng sak: {}",
                case.description
            );
        }
    }

    #[test]
    fn test_weekdays() {
        let info = NewYearDayInfo::from_ad_year(1900).unwrap();
        assert_eq!(info.new_year_weekday, DayOfWeek::Thursday);
        assert_eq!(info.leng_sak_weekday, DayOfWeek::Sunday);

        let info = NewYearDayInfo::from_ad_year(2024).unwrap();
        assert_eq!(info.new_year_weekday, DayOfWeek::Saturday);
        assert_eq!(info.leng_sak_weekday, DayOfWeek::Tuesday);
    }

    #[test]
    fn test_weekdays_match_gregorian() {
        for ad in 1950..2050 {
            let info = NewYearDayInfo::from_ad_year(ad).unwrap();
            let leng_sak = info.leng_sak_date.to_gregorian().unwrap();
            let new_year = info.new_year_date.to_gregorian().unwrap();
            assert_eq!(leng_sak.day_of_week(), info.leng_sak_weekday, "leng sak {ad}");
            assert_eq!(new_year.day_of_week(), info.new_year_weekday, "new year {ad}");
        }
    }

    #[test]
    fn test_new_year_precedes_leng_sak() {
        for ad in 1800..2200 {
            let info = NewYearDayInfo::from_ad_year(ad).unwrap();
            assert!(matches!(info.von_both, 1 | 2), "{ad}");
            assert_eq!(
                info.new_year_date + i64::from(info.von_both + 1),
                info.leng_sak_date,
                "{ad}"
            );
        }
    }

    #[test]
    fn test_leng_sak_rolls_into_pisakh() {
        // JS years whose Leng Sak lands in ពិសាខ keep a valid day number
        for js in 1000..1600 {
            let info = NewYearDayInfo::from_js_year(js).unwrap();
            let ls = info.leng_sak_date;
            assert!(KhmerDate::new(ls.day(), ls.month(), ls.be_year()).is_ok(), "JS {js}");
        }
    }

    #[test]
    fn test_new_year_moment_computed() {
        let moment = new_year_moment(2023).unwrap();
        assert_eq!(moment, GregorianDateTime::new(2023, 4, 14, 16, 0, 0).unwrap());
        let moment = new_year_moment(1900).unwrap();
        assert_eq!(moment, GregorianDateTime::new(1900, 4, 12, 19, 36, 0).unwrap());
    }

    #[test]
    fn test_new_year_moment_announced() {
        let moment = new_year_moment(2024).unwrap();
        assert_eq!(moment, GregorianDateTime::new(2024, 4, 13, 22, 17, 0).unwrap());
        // the computed record is not affected
        let info = NewYearDayInfo::from_ad_year(2024).unwrap();
        assert_eq!((info.time.hour, info.time.minute), (22, 24));
    }

    #[test]
    fn test_new_year_moment_out_of_range() {
        assert!(matches!(
            new_year_moment(999),
            Err(CalendarError::InvalidGregorianDate { year: 999, .. })
        ));
    }
}
