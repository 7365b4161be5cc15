//! Date string parsing for the shapes transactional mail uses

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

// Day-first numeric: 12/03/2024, 12-03-24, 12.03.2024
static DMY_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[/.-](\d{1,2})[/.-](\d{4}|\d{2})\b").unwrap());

// 12 Mar 2024, 12th March, 2024, 12-Mar-2024
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?[\s-]{1,2}([a-z]{3,9})\.?[,\s-]{1,3}(\d{4})\b").unwrap()
});

// March 12, 2024 / Mar 12 2024
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]{3,9})\.?\s{1,2}(\d{1,2})(?:st|nd|rd|th)?,?\s{1,2}(\d{4})\b").unwrap()
});

// 12 Mar / 12th March, year taken from the reference timestamp; a date
// past the reference belongs to the previous year
static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?[\s-]{1,2}([a-z]{3,9})\b").unwrap()
});

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Dates considered per shape before giving up
const MAX_TRIES: usize = 8;

/// Month number for an English month name or an abbreviation of at least
/// three letters ("mar", "march"; not "marketplace")
#[must_use]
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .zip(1u32..)
        .find(|(full, _)| full.starts_with(lower.as_str()))
        .map(|(_, month)| month)
}

/// Find and parse the first date in `text`.
///
/// Shapes are tried from most to least explicit; year-less dates take the
/// latest year that keeps them on or before `reference`. Dates outside
/// 2000..=reference year + 1 are rejected.
#[must_use]
pub fn parse_date(text: &str, reference: DateTime<Utc>) -> Option<NaiveDate> {
    let max_year = reference.year() + 1;
    let plausible = |d: NaiveDate| (2000..=max_year).contains(&d.year()).then_some(d);

    let iso = ISO
        .captures_iter(text)
        .take(MAX_TRIES)
        .find_map(|caps| ymd(&caps[1], &caps[2], &caps[3]).and_then(plausible));
    if iso.is_some() {
        return iso;
    }

    let named = DAY_MONTH_YEAR
        .captures_iter(text)
        .take(MAX_TRIES)
        .find_map(|caps| {
            let month = month_from_name(&caps[2])?;
            day_month_year(&caps[1], month, &caps[3]).and_then(plausible)
        })
        .or_else(|| {
            MONTH_DAY_YEAR
                .captures_iter(text)
                .take(MAX_TRIES)
                .find_map(|caps| {
                    let month = month_from_name(&caps[1])?;
                    day_month_year(&caps[2], month, &caps[3]).and_then(plausible)
                })
        });
    if named.is_some() {
        return named;
    }

    let numeric = DMY_NUMERIC
        .captures_iter(text)
        .take(MAX_TRIES)
        .find_map(|caps| {
            let year = expand_year(&caps[3])?;
            NaiveDate::from_ymd_opt(year, caps[2].parse().ok()?, caps[1].parse().ok()?)
                .and_then(plausible)
        });
    if numeric.is_some() {
        return numeric;
    }

    let today = reference.date_naive();
    DAY_MONTH
        .captures_iter(text)
        .take(MAX_TRIES)
        .find_map(|caps| {
            let month = month_from_name(&caps[2])?;
            let day = caps[1].parse().ok()?;
            match NaiveDate::from_ymd_opt(reference.year(), month, day) {
                Some(date) if date <= today => Some(date),
                _ => NaiveDate::from_ymd_opt(reference.year() - 1, month, day),
            }
        })
}

/// True when the whole of `text` is a numeric date (`2024-03-12`, `12-03-2024`)
#[must_use]
pub fn is_date_shaped(text: &str) -> bool {
    [&*ISO, &*DMY_NUMERIC]
        .iter()
        .any(|re| re.find(text).is_some_and(|m| m.as_str() == text))
}

/// Midnight UTC of `date`
#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn day_month_year(day: &str, month: u32, year: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + year } else { year })
}
