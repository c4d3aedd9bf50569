//! Khmer text rendering for calendar readings.

use crate::KhmerCalendar;

static SOLAR_MONTH_NAMES: [&str; 12] = [
    "មករា",
    "កុម្ភៈ",
    "មីនា",
    "មេសា",
    "ឧសភា",
    "មិថុនា",
    "កក្កដា",
    "សីហា",
    "កញ្ញា",
    "តុលា",
    "វិច្ឆិកា",
    "ធ្នូ",
];

static SOLAR_MONTH_ABBREVIATIONS: [&str; 12] = [
    "មក", "កម", "មន", "មស", "ឧស", "មថ", "កដ", "សហ", "កញ", "តល", "វក", "ធន",
];

static KHMER_DIGITS: [char; 10] = ['០', '១', '២', '៣', '៤', '៥', '៦', '៧', '៨', '៩'];

/// Two-letter tokens come first so `Ms` wins over `M`.
static TOKENS: [&str; 16] = [
    "Ms", "ms", "W", "w", "d", "D", "n", "N", "o", "m", "M", "a", "e", "b", "c", "j",
];

/// Replaces ASCII digits with Khmer digits, leaving everything else as is.
///
/// ```
/// assert_eq!(khmer_calendar::to_khmer_numeral("BE 2568"), "BE ២៥៦៨");
/// ```
pub fn to_khmer_numeral(text: &str) -> String {
    text.chars()
        .map(|ch| match ch.to_digit(10) {
            Some(digit) => KHMER_DIGITS[digit as usize],
            None => ch,
        })
        .collect()
}

fn solar_month_name(month: u8) -> &'static str {
    SOLAR_MONTH_NAMES
        .get(usize::from(month).wrapping_sub(1))
        .copied()
        .unwrap_or_default()
}

fn solar_month_abbreviation(month: u8) -> &'static str {
    SOLAR_MONTH_ABBREVIATIONS
        .get(usize::from(month).wrapping_sub(1))
        .copied()
        .unwrap_or_default()
}

fn token_value(cal: &KhmerCalendar, token: &str) -> String {
    let date = cal.date();
    let day = date.day();
    let civil = cal.gregorian().date();
    match token {
        "W" => cal.day_of_week().name().to_owned(),
        "w" => cal.day_of_week().short_name().to_owned(),
        "d" => day.day_of_phase().to_string(),
        "D" => format!("{:02}", day.day_of_phase()),
        "n" => day.phase().short_name().to_owned(),
        "N" => day.phase().name().to_owned(),
        "o" => day.symbol().to_owned(),
        "m" => date.month().name().to_owned(),
        "ms" => date.month().abbreviation().to_owned(),
        "M" => solar_month_name(civil.month()).to_owned(),
        "Ms" => solar_month_abbreviation(civil.month()).to_owned(),
        "a" => cal.animal().name().to_owned(),
        "e" => cal.era().name().to_owned(),
        "b" => cal.be_year().to_string(),
        "c" => civil.year().to_string(),
        "j" => cal.js_year().to_string(),
        _ => token.to_owned(),
    }
}

pub(crate) fn format_default(cal: &KhmerCalendar) -> String {
    let day = cal.date().day();
    to_khmer_numeral(&format!(
        "ថ្ងៃ{} {}{} ខែ{} ឆ្នាំ{} {} ពុទ្ធសករាជ {}",
        cal.day_of_week().name(),
        day.day_of_phase(),
        day.phase().name(),
        cal.date().month().name(),
        cal.animal().name(),
        cal.era().name(),
        cal.be_year()
    ))
}

pub(crate) fn format_pattern(cal: &KhmerCalendar, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        // `[text]` is literal; an empty `[]` is not an escape
        let escape_end = if ch == '[' {
            rest[1..].find(']').filter(|&end| end > 0)
        } else {
            None
        };
        if let Some(end) = escape_end {
            out.push_str(&rest[1..=end]);
            rest = &rest[end + 2..];
            continue;
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&to_khmer_numeral(&token_value(cal, token)));
            rest = &rest[token.len()..];
            continue;
        }

        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
