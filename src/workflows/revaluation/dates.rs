use super::domain::{CollateralRecord, FieldValue};
use chrono::{DateTime, Datelike, NaiveDate};
use rand::{Rng, RngCore};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// Supplies a last-revaluation date for records that lack a usable one.
pub trait MissingDatePolicy {
    fn fallback_last_date(&self, rng: &mut dyn RngCore) -> NaiveDate;
}

/// Draws a day uniformly from an inclusive range. Placeholder data only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl FallbackDateRange {
    /// Bounds are swapped if given out of order.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl MissingDatePolicy for FallbackDateRange {
    fn fallback_last_date(&self, rng: &mut dyn RngCore) -> NaiveDate {
        let span = (self.end - self.start).num_days();
        let offset = rng.gen_range(0..=span);
        self.start + chrono::Duration::days(offset)
    }
}

/// Always answers with the same day; handy when randomness is unwanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFallbackDate(pub NaiveDate);

impl MissingDatePolicy for FixedFallbackDate {
    fn fallback_last_date(&self, _rng: &mut dyn RngCore) -> NaiveDate {
        self.0
    }
}

/// Parses a date cell. Text tries each accepted format in order; numbers are
/// Unix seconds. Anything else, or a value that does not parse, is `None`.
pub fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Text(text) => parse_date_str(text),
        FieldValue::Integer(seconds) if *seconds != 0 => {
            DateTime::from_timestamp(*seconds, 0).map(|dt| dt.date_naive())
        }
        FieldValue::Decimal(seconds) if seconds.is_finite() && *seconds != 0.0 => {
            DateTime::from_timestamp(seconds.trunc() as i64, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Moves `date` forward by whole calendar months, clamping the day to the end
/// of the target month. `None` only when the result leaves chrono's range.
pub fn add_calendar_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = date.month0() as i64 + months as i64;
    let year = date.year() as i64 + total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let year = i32::try_from(year).ok()?;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Last and planned revaluation dates of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedDates {
    pub last: NaiveDate,
    pub planned: NaiveDate,
    pub used_fallback: bool,
}

/// Resolves the record's last revaluation date (falling back to `policy`) and
/// its planned date: an explicit next date wins, otherwise last + cadence.
pub fn derive_dates(
    record: &CollateralRecord,
    frequency_months: u32,
    policy: &dyn MissingDatePolicy,
    rng: &mut dyn RngCore,
) -> DerivedDates {
    let parsed_last = record.last_revaluation_date.as_ref().and_then(parse_date);
    let used_fallback = parsed_last.is_none();
    let last = parsed_last.unwrap_or_else(|| policy.fallback_last_date(rng));

    let planned = record
        .next_revaluation_date
        .as_ref()
        .and_then(parse_date)
        .or_else(|| add_calendar_months(last, frequency_months))
        .unwrap_or(last);

    DerivedDates {
        last,
        planned,
        used_fallback,
    }
}
