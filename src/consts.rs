//! Calibration constants for the Khmer calendar.
//!
//! Every number the algorithms depend on lives here. Nothing is read from the
//! environment; changing one of these changes historical results.

// --- era offsets ---

/// Anno Domini minus this gives the Chula Sakaraj year.
pub const AD_JS_OFFSET: i64 = 638;
/// Anno Domini plus this gives the Buddhist Era year.
pub const AD_BE_OFFSET: i64 = 544;
/// Buddhist Era minus this gives the Chula Sakaraj year.
pub const BE_JS_OFFSET: i64 = 1182;

// --- supported Gregorian range ---

/// Smallest Gregorian year accepted as conversion input.
pub const MIN_YEAR: u16 = 1000;
/// Largest Gregorian year accepted as conversion input.
pub const MAX_YEAR: u16 = 9999;
/// Maximum valid Gregorian month (December)
pub const MAX_MONTH: u8 = 12;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Gregorian month lengths (index 0 unused, months are 1-indexed)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Smallest Buddhist Era year a `KhmerDate` may carry (early BE 1543 falls in AD 1000).
pub const MIN_BE_YEAR: i64 = MIN_YEAR as i64 - 1 + AD_BE_OFFSET;
/// Largest Buddhist Era year a `KhmerDate` may carry.
pub const MAX_BE_YEAR: i64 = MAX_YEAR as i64 + AD_BE_OFFSET;

pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

// --- epoch anchor: 1 January 1900 ---

/// Gregorian year of the epoch.
pub const EPOCH_YEAR: u16 = 1900;
/// Gregorian month of the epoch.
pub const EPOCH_MONTH: u8 = 1;
/// Gregorian day of the epoch.
pub const EPOCH_DAY: u8 = 1;
/// Canonical lunar day (waxing 1) at the epoch.
pub const EPOCH_KHMER_DAY: u8 = 1;
/// Buddhist Era year in force at the epoch.
pub const EPOCH_BE_YEAR: i64 = 2443;
/// Animal index at the epoch (កុរ).
pub const EPOCH_ANIMAL: u8 = 11;
/// Chula Sakaraj year in force at the epoch.
pub const EPOCH_JS_YEAR: i64 = 1261;

// --- intercalation formulas ---

/// Sun-days per 800-year cycle (the numerator shared by both families).
pub const SOLAR_DAYS_PER_800: i64 = 292_207;
/// Length of the kromthupul cycle.
pub const KROMTHUPUL_MODULUS: i64 = 800;
/// A year whose kromthupul is at or below this is a 366-day solar year.
pub const SOLAR_LEAP_THRESHOLD: i64 = 207;

/// Added to the BE sun-day product before dividing into aharkun.
pub const BE_HARKUN_ADDEND: i64 = 499;
/// Added to the BE aharkun quotient.
pub const BE_HARKUN_OFFSET: i64 = 4;
/// Added to `11 * aharkun` in the BE avoman.
pub const BE_AVOMAN_ADDEND: i64 = 25;

/// Added to the JS sun-day product before dividing into aharkun.
pub const JS_HARKUN_ADDEND: i64 = 373;
/// Added to the JS aharkun quotient.
pub const JS_HARKUN_OFFSET: i64 = 1;
/// Added to `11 * aharkun` in the JS avoman.
pub const JS_AVOMAN_ADDEND: i64 = 650;

/// Avoman cycle length.
pub const AVOMAN_MODULUS: i64 = 692;
/// Bodithey cycle length, one lunar month.
pub const BODITHEY_MODULUS: i64 = 30;

/// Upper bound on the backward walk through consecutive leap-month years.
pub const MAX_LEAP_LOOKBACK: u32 = 19;

// --- month and year lengths ---

/// Days in a year with neither leap day nor leap month.
pub const DAYS_IN_PLAIN_YEAR: u16 = 354;
/// Days in a leap-day year (30-day ជេស្ឋ).
pub const DAYS_IN_LEAP_DAY_YEAR: u16 = 355;
/// Days in a leap-month year (two 30-day អាសាឍ).
pub const DAYS_IN_LEAP_MONTH_YEAR: u16 = 384;
/// Days in one moon phase.
pub const DAYS_PER_PHASE: u8 = 15;

/// Cap on the month-by-month walk of the Khmer to Gregorian search: two years
/// of at most thirteen traversed months.
pub const MAX_MONTH_STEPS: u32 = 26;

// --- New Year ---

/// Elapsed-day seeds when the previous JS year had 366 days.
pub const SOTINS_AFTER_LONG_YEAR: [i64; 4] = [363, 364, 365, 366];
/// Elapsed-day seeds otherwise.
pub const SOTINS: [i64; 4] = [362, 363, 364, 365];

/// Minutes of arc in one zodiac sign (reasey).
pub const ARC_PER_SIGN: i64 = 1800;
/// Minutes of arc in one degree (angsar).
pub const ARC_PER_DEGREE: i64 = 60;

/// Equation-of-center step table indexed by khan: `(multiplier, chhaya)`.
pub const SHADOW_TABLE: [(i64, i64); 6] = [(35, 0), (32, 35), (27, 67), (22, 94), (13, 116), (5, 129)];
/// Entry used for any khan past the table.
pub const SHADOW_DEFAULT: (i64, i64) = (0, 134);

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Officially announced New Year moments that differ from the computed ones:
/// `(AD year, month, day, hour, minute)`.
pub const NEW_YEAR_OVERRIDES: [(u16, u8, u8, u8, u8); 8] = [
    (1879, 4, 12, 11, 36),
    (1897, 4, 13, 2, 0),
    (2011, 4, 14, 13, 12),
    (2012, 4, 14, 19, 11),
    (2013, 4, 14, 2, 12),
    (2014, 4, 14, 8, 7),
    (2015, 4, 14, 14, 2),
    (2024, 4, 13, 22, 17),
];
