use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::consts::DAYS_PER_PHASE;
use crate::leap::LeapType;
use crate::{CalendarError, prelude::*};

static MONTH_NAMES: [&str; 14] = [
    "មិគសិរ",
    "បុស្ស",
    "មាឃ",
    "ផល្គុន",
    "ចេត្រ",
    "ពិសាខ",
    "ជេស្ឋ",
    "អាសាឍ",
    "ស្រាពណ៍",
    "ភទ្របទ",
    "អស្សុជ",
    "កត្ដិក",
    "បឋមាសាឍ",
    "ទុតិយាសាឍ",
];

static MONTH_ABBREVIATIONS: [&str; 14] = [
    "មិ", "បុ", "មា", "ផល", "ចេ", "ពិ", "ជេ", "អា", "ស្រ", "ភ", "អ", "ក", "បឋ", "ទុតិ",
];

static ANIMAL_NAMES: [&str; 12] = [
    "ជូត", "ឆ្លូវ", "ខាល", "ថោះ", "រោង", "ម្សាញ់", "មមី", "មមែ", "វក", "រកា", "ច", "កុរ",
];

static ERA_NAMES: [&str; 10] = [
    "សំរឹទ្ធិស័ក",
    "ឯកស័ក",
    "ទោស័ក",
    "ត្រីស័ក",
    "ចត្វាស័ក",
    "បញ្ចស័ក",
    "ឆស័ក",
    "សប្តស័ក",
    "អដ្ឋស័ក",
    "នព្វស័ក",
];

/// Lunar day symbols indexed by canonical day number minus one.
static MOON_DAY_SYMBOLS: [&str; 30] = [
    "᧡", "᧢", "᧣", "᧤", "᧥", "᧦", "᧧", "᧨", "᧩", "᧪", "᧫", "᧬", "᧭", "᧮", "᧯", "᧱", "᧲", "᧳",
    "᧴", "᧵", "᧶", "᧷", "᧸", "᧹", "᧺", "᧻", "᧼", "᧽", "᧾", "᧿",
];

// Monday first
static WEEKDAY_NAMES: [&str; 7] = ["ចន្ទ", "អង្គារ", "ពុធ", "ព្រហស្បតិ៍", "សុក្រ", "សៅរ៍", "អាទិត្យ"];
static WEEKDAY_SHORT_NAMES: [&str; 7] = ["ច", "អ", "ព", "ព្រ", "សុ", "ស", "អា"];

/// Half of a lunar month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum MoonPhase {
    /// កើត, days 1-15
    #[display(fmt = "កើត")]
    Waxing,
    /// រោច, days 16-30
    #[display(fmt = "រោច")]
    Waning,
}

impl MoonPhase {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Waxing => "កើត",
            Self::Waning => "រោច",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Waxing => "ក",
            Self::Waning => "រ",
        }
    }
}

/// A lunar day: a moon phase plus a day-of-phase in `1..=15`.
///
/// Stored as the canonical month day `1..=30` where waning days follow the
/// fifteen waxing days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct KhmerDay(u8);

impl KhmerDay {
    /// Creates a lunar day from a day-of-phase and its phase.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidKhmerDay` if `day` is not in `1..=15`.
    pub const fn new(day: u8, phase: MoonPhase) -> Result<Self, CalendarError> {
        if day == 0 || day > DAYS_PER_PHASE {
            return Err(CalendarError::InvalidKhmerDay { day });
        }
        Ok(match phase {
            MoonPhase::Waxing => Self(day),
            MoonPhase::Waning => Self(day + DAYS_PER_PHASE),
        })
    }

    /// Creates a lunar day from its canonical number.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidKhmerDay` if `number` is not in `1..=30`.
    pub const fn from_number(number: u8) -> Result<Self, CalendarError> {
        if number == 0 || number > 2 * DAYS_PER_PHASE {
            return Err(CalendarError::InvalidKhmerDay { day: number });
        }
        Ok(Self(number))
    }

    pub(crate) const fn new_unchecked(number: u8) -> Self {
        Self(number)
    }

    /// Canonical number, 1-15 waxing and 16-30 waning.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn phase(self) -> MoonPhase {
        if self.0 > DAYS_PER_PHASE {
            MoonPhase::Waning
        } else {
            MoonPhase::Waxing
        }
    }

    /// Day within the phase, 1-15.
    pub const fn day_of_phase(self) -> u8 {
        if self.0 > DAYS_PER_PHASE {
            self.0 - DAYS_PER_PHASE
        } else {
            self.0
        }
    }

    /// Single-glyph lunar day symbol (᧡ for waxing 1 through ᧿ for waning 15).
    pub fn symbol(self) -> &'static str {
        MOON_DAY_SYMBOLS[usize::from(self.0 - 1)]
    }
}

impl TryFrom<u8> for KhmerDay {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<KhmerDay> for u8 {
    fn from(day: KhmerDay) -> Self {
        day.0
    }
}

impl fmt::Display for KhmerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day_of_phase(), self.phase())
    }
}

/// Lunar month label.
///
/// The two intercalary labels exist only in leap-month years, where they take
/// the place of [`KhmerMonth::Asath`]. Ordering is label order, not
/// chronology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum KhmerMonth {
    /// មិគសិរ
    Mikasar,
    /// បុស្ស
    Bos,
    /// មាឃ
    Meak,
    /// ផល្គុន
    Phalgun,
    /// ចេត្រ
    Chet,
    /// ពិសាខ, the Buddhist Era year turns over in its middle
    Pisakh,
    /// ជេស្ឋ, 30 days in leap-day years
    Jesth,
    /// អាសាឍ
    Asath,
    /// ស្រាពណ៍
    Srap,
    /// ភទ្របទ
    Photrobot,
    /// អស្សុជ
    Assoch,
    /// កត្ដិក
    Kadek,
    /// បឋមាសាឍ, first intercalary month
    PathamAsath,
    /// ទុតិយាសាឍ, second intercalary month
    TutiyAsath,
}

impl KhmerMonth {
    pub const ALL: [Self; 14] = [
        Self::Mikasar,
        Self::Bos,
        Self::Meak,
        Self::Phalgun,
        Self::Chet,
        Self::Pisakh,
        Self::Jesth,
        Self::Asath,
        Self::Srap,
        Self::Photrobot,
        Self::Assoch,
        Self::Kadek,
        Self::PathamAsath,
        Self::TutiyAsath,
    ];

    /// Looks up a month by its index `0..=13`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonthIndex` for any other index.
    pub fn from_index(index: u8) -> Result<Self, CalendarError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(CalendarError::InvalidMonthIndex(index))
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.index())]
    }

    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[usize::from(self.index())]
    }

    pub const fn is_intercalary(self) -> bool {
        matches!(self, Self::PathamAsath | Self::TutiyAsath)
    }

    /// Number of days in this month for a year of the given type. Zero means
    /// the month does not occur.
    pub const fn length(self, leap: LeapType) -> u8 {
        match self {
            Self::Jesth => match leap {
                LeapType::LeapDay => 30,
                _ => 29,
            },
            Self::PathamAsath | Self::TutiyAsath => match leap {
                LeapType::LeapMonth => 30,
                _ => 0,
            },
            Self::Mikasar | Self::Meak | Self::Chet | Self::Srap | Self::Assoch => 29,
            Self::Bos | Self::Phalgun | Self::Pisakh | Self::Asath | Self::Photrobot | Self::Kadek => 30,
        }
    }

    /// Month following this one in BE year `be`.
    pub fn next(self, be: i64) -> Self {
        match self {
            Self::Mikasar => Self::Bos,
            Self::Bos => Self::Meak,
            Self::Meak => Self::Phalgun,
            Self::Phalgun => Self::Chet,
            Self::Chet => Self::Pisakh,
            Self::Pisakh => Self::Jesth,
            Self::Jesth if LeapType::of(be) == LeapType::LeapMonth => Self::PathamAsath,
            Self::Jesth => Self::Asath,
            Self::Asath | Self::TutiyAsath => Self::Srap,
            Self::Srap => Self::Photrobot,
            Self::Photrobot => Self::Assoch,
            Self::Assoch => Self::Kadek,
            Self::Kadek => Self::Mikasar,
            Self::PathamAsath => Self::TutiyAsath,
        }
    }

    /// Month preceding this one in BE year `be`.
    pub fn previous(self, be: i64) -> Self {
        match self {
            Self::Mikasar => Self::Kadek,
            Self::Bos => Self::Mikasar,
            Self::Meak => Self::Bos,
            Self::Phalgun => Self::Meak,
            Self::Chet => Self::Phalgun,
            Self::Pisakh => Self::Chet,
            Self::Jesth => Self::Pisakh,
            Self::Asath | Self::PathamAsath => Self::Jesth,
            Self::Srap if LeapType::of(be) == LeapType::LeapMonth => Self::TutiyAsath,
            Self::Srap => Self::Asath,
            Self::Photrobot => Self::Srap,
            Self::Assoch => Self::Photrobot,
            Self::Kadek => Self::Assoch,
            Self::TutiyAsath => Self::PathamAsath,
        }
    }
}

impl TryFrom<u8> for KhmerMonth {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl From<KhmerMonth> for u8 {
    fn from(month: KhmerMonth) -> Self {
        month.index()
    }
}

impl fmt::Display for KhmerMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Days in `month` of BE year `be`.
pub fn days_in_month(month: KhmerMonth, be: i64) -> u8 {
    month.length(LeapType::of(be))
}

/// Days in BE year `be`: 354, 355 or 384.
pub fn days_in_year(be: i64) -> u16 {
    LeapType::of(be).days_in_year()
}

/// Months of BE year `be` in traversal order, មិគសិរ through កត្ដិក.
pub fn months_of_year(be: i64) -> Vec<KhmerMonth> {
    let mut months = vec![KhmerMonth::Mikasar];
    let mut month = KhmerMonth::Mikasar.next(be);
    while month != KhmerMonth::Mikasar {
        months.push(month);
        month = month.next(be);
    }
    months
}

/// Position in the twelve-year animal cycle, ជូត (0) through កុរ (11).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Into, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnimalYear(u8);

impl AnimalYear {
    /// # Errors
    /// Returns `CalendarError::InvalidAnimalIndex` if `index` is not in `0..=11`.
    pub const fn new(index: u8) -> Result<Self, CalendarError> {
        if index >= 12 {
            return Err(CalendarError::InvalidAnimalIndex(index));
        }
        Ok(Self(index))
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        ANIMAL_NAMES[usize::from(self.0)]
    }
}

/// Steps along the cycle in either direction.
impl Add<i64> for AnimalYear {
    type Output = Self;

    fn add(self, years: i64) -> Self {
        Self((i64::from(self.0) + years.rem_euclid(12)).rem_euclid(12) as u8)
    }
}

impl TryFrom<u8> for AnimalYear {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for AnimalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position in the ten-year era cycle, derived from a Chula Sakaraj year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Into, Serialize)]
#[serde(into = "u8")]
pub struct EraYear(u8);

impl EraYear {
    pub const fn from_js_year(js: i64) -> Self {
        Self(js.rem_euclid(10) as u8)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        ERA_NAMES[usize::from(self.0)]
    }
}

impl fmt::Display for EraYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday of a Julian Day Number.
    pub const fn from_julian_day(jdn: i64) -> Self {
        Self::ALL[jdn.rem_euclid(7) as usize]
    }

    /// 0 for Monday through 6 for Sunday.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[usize::from(self.index())]
    }

    pub fn short_name(self) -> &'static str {
        WEEKDAY_SHORT_NAMES[usize::from(self.index())]
    }
}

impl Add<i64> for DayOfWeek {
    type Output = Self;

    fn add(self, days: i64) -> Self {
        Self::ALL[(i64::from(self.index()) + days.rem_euclid(7)).rem_euclid(7) as usize]
    }
}
