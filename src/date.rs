// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar date without a zone.
//!
//! [`Date`] is a plain `{year, month, day}` triple. Two orthogonal checks
//! apply to it:
//!
//! - [`Date::is_zero`] detects the `0000-00-00` sentinel meaning "absent".
//! - [`Date::validate`] checks field ranges; the zero value does **not**
//!   validate, since month and day start at 1.
//!
//! Comparison and arithmetic route through the UTC [`Instant`] bridge, so a
//! date with out-of-range fields behaves like its normalized equivalent.
//!
//! # Examples
//!
//! ```
//! use civildate::Date;
//!
//! let date = Date::new(549, 14, 1);
//! assert_eq!(date, Date { year: 550, month: 2, day: 1 });
//! assert_eq!(date.to_string(), "0550-02-01");
//! ```

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};

use crate::datetime::Datetime;
use crate::error::{Error, Field, Result};
use crate::format::Format;
use crate::instant::Instant;
use crate::time::TimeOfDay;

pub const MIN_YEAR: u32 = 0;
pub const MAX_YEAR: u32 = 999_999_999;
pub const MIN_MONTH_OF_YEAR: u32 = 1;
pub const MAX_MONTH_OF_YEAR: u32 = 12;
pub const MIN_DAY_OF_MONTH: u32 = 1;
pub const MAX_DAY_OF_MONTH: u32 = 31;

/// A proleptic-Gregorian civil date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    /// `0000-00-00`, the "absent" sentinel.
    pub const ZERO: Self = Self {
        year: 0,
        month: 0,
        day: 0,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Build a date, normalizing calendar overflow.
    ///
    /// Out-of-range and negative components roll over the way calendar
    /// arithmetic does (`(2021, 13, 1)` is 2022-01-01, `(2021, 3, 0)` is
    /// 2021-02-28). A result before 0001-01-01 collapses to [`Date::ZERO`]
    /// rather than failing; callers that must tell BC input apart from an
    /// explicit zero need to check the components beforehand.
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        Self::from_instant(Instant::from_civil(year, month, day, 0, 0, 0))
    }

    /// Date part of `instant`, or zero when it precedes year 1 or its year
    /// does not fit the field.
    pub(crate) fn from_instant(instant: Instant) -> Self {
        if instant.is_before_ad() {
            log::debug!(
                "instant {} precedes 0001-01-01, collapsing to the zero date",
                instant.unix_seconds()
            );
            return Self::ZERO;
        }
        let fields = instant.to_civil();
        match u32::try_from(fields.year) {
            Ok(year) => Self {
                year,
                month: fields.month,
                day: fields.day,
            },
            Err(_) => {
                log::debug!("year {} does not fit a date, collapsing to zero", fields.year);
                Self::ZERO
            }
        }
    }

    /// Convert from a chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year().into(), date.month().into(), date.day().into())
    }

    /// Parse `input` with `format`, ignoring any zone offset it carries.
    ///
    /// Patterns that include a time of day are accepted; the time is
    /// dropped.
    pub fn parse(format: Format, input: &str) -> Result<Self> {
        let naive = format.parse_naive(input)?;
        Ok(Self::from_instant(Instant::from_naive(naive)))
    }

    // ── checks ────────────────────────────────────────────────────────

    /// Check year, month and day in that order; the first field out of
    /// range is reported and the rest are not inspected.
    pub fn validate(&self) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(Error::out_of_range("date", Field::Year, self.year));
        }
        if !(MIN_MONTH_OF_YEAR..=MAX_MONTH_OF_YEAR).contains(&self.month) {
            return Err(Error::out_of_range("date", Field::Month, self.month));
        }
        if !(MIN_DAY_OF_MONTH..=MAX_DAY_OF_MONTH).contains(&self.day) {
            return Err(Error::out_of_range("date", Field::Day, self.day));
        }
        Ok(*self)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Midnight at UTC on this date.
    #[inline]
    pub fn to_instant(&self) -> Instant {
        Instant::from_civil(
            self.year.into(),
            self.month.into(),
            self.day.into(),
            0,
            0,
            0,
        )
    }

    /// This date at `00:00:00`. The zero date yields the zero datetime.
    #[inline]
    pub const fn to_datetime(&self) -> Datetime {
        Datetime {
            date: *self,
            time: TimeOfDay::ZERO,
        }
    }

    /// Convert to a chrono date, if within chrono's range.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        self.to_instant().to_naive().map(|datetime| datetime.date())
    }

    /// Render with `format` at UTC.
    pub fn format(&self, format: Format) -> Result<String> {
        format.render(self.to_instant())
    }

    /// Zero-padded renderings: `(2000, 1, 3)` → `("2000", "01", "03")`.
    ///
    /// The year is padded to at least four digits and grows past 9999.
    pub fn split_string(&self) -> (String, String, String) {
        (
            format!("{:04}", self.year),
            format!("{:02}", self.month),
            format!("{:02}", self.day),
        )
    }

    // ── comparison ────────────────────────────────────────────────────

    #[inline]
    pub fn before(&self, other: &Date) -> bool {
        self.to_instant() < other.to_instant()
    }

    #[inline]
    pub fn after(&self, other: &Date) -> bool {
        self.to_instant() > other.to_instant()
    }

    /// Same instant; `(2020, 13, 1)` equals `(2021, 1, 1)` here even though
    /// `==` compares fields.
    #[inline]
    pub fn equal(&self, other: &Date) -> bool {
        self.to_instant() == other.to_instant()
    }

    #[inline]
    pub fn before_equal(&self, other: &Date) -> bool {
        self.to_instant() <= other.to_instant()
    }

    #[inline]
    pub fn after_equal(&self, other: &Date) -> bool {
        self.to_instant() >= other.to_instant()
    }

    /// Inclusive on both ends.
    pub fn between(&self, start: &Date, end: &Date) -> bool {
        self.after_equal(start) && self.before_equal(end)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// `self − target`. The flag is `false` when the span exceeds what a
    /// signed 64-bit nanosecond count holds (about 292 years) and the
    /// returned duration is saturated.
    pub fn duration_since(&self, target: &Date) -> (Duration, bool) {
        self.to_instant().duration_since(target.to_instant())
    }

    /// Shift by whole years, months and days, renormalizing the result.
    pub fn add_date(&self, years: i64, months: i64, days: i64) -> Self {
        Self::from_instant(self.to_instant().add_date(years, months, days))
    }

    // ── flag binding ──────────────────────────────────────────────────

    /// Overwrite `self` from a command-line value in canonical form.
    ///
    /// Empty input is an error. On error `self` is left untouched.
    pub fn unmarshal_flag(&mut self, input: &str) -> Result<()> {
        *self = input.parse()?;
        Ok(())
    }
}

impl Add<Duration> for Date {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Self::from_instant(self.to_instant() + rhs)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Canonical `YYYY-MM-DD` only; empty input is rejected.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::UnmarshalFlag { subject: "date" });
        }
        let naive = Format::DateHyphen.parse_canonical(s)?;
        Ok(Self::from_instant(Instant::from_naive(naive)))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn ymd(year: u32, month: u32, day: u32) -> Date {
        Date { year, month, day }
    }

    #[test]
    fn new_collapses_bc_to_zero() {
        assert_eq!(Date::new(0, 0, 0), Date::ZERO);
        assert_eq!(Date::new(0, -1, 0), Date::ZERO);
        assert_eq!(Date::new(1, 1, 0), Date::ZERO);
        assert_eq!(Date::new(1, 1, 1), ymd(1, 1, 1));
    }

    #[test]
    fn new_normalizes_overflow() {
        assert_eq!(Date::new(549, 14, 1), ymd(550, 2, 1));
        assert_eq!(Date::new(549, 4, 33), ymd(549, 5, 3));
        assert_eq!(Date::new(2021, 3, 0), ymd(2021, 2, 28));
        assert_eq!(Date::new(2021, -1, 15), ymd(2020, 11, 15));
    }

    #[test]
    fn new_collapses_years_beyond_field_width() {
        assert_eq!(Date::new(i64::from(u32::MAX) + 1, 1, 1), Date::ZERO);
    }

    #[test]
    fn split_string_pads() {
        let (y, m, d) = Date::new(2018, 10, 21).split_string();
        assert_eq!((y.as_str(), m.as_str(), d.as_str()), ("2018", "10", "21"));
        let (y, m, d) = Date::new(9, 2, 1).split_string();
        assert_eq!((y.as_str(), m.as_str(), d.as_str()), ("0009", "02", "01"));
        let (y, _, _) = Date::new(18, 2, 1).split_string();
        assert_eq!(y, "0018");
        let (y, _, _) = ymd(123_456, 1, 1).split_string();
        assert_eq!(y, "123456");
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Date::ZERO.to_string(), "0000-00-00");
        assert_eq!(ymd(2020, 5, 10).to_string(), "2020-05-10");
    }

    #[test]
    fn validate_checks_in_order() {
        assert!(ymd(2020, 12, 31).validate().is_ok());
        let err = ymd(1_000_000_000, 0, 0).validate().unwrap_err();
        assert!(matches!(err, Error::OutOfRangeDate { field: Field::Year, .. }));
        let err = ymd(2020, 13, 0).validate().unwrap_err();
        assert!(matches!(err, Error::OutOfRangeDate { field: Field::Month, value: 13, .. }));
        let err = ymd(2020, 1, 32).validate().unwrap_err();
        assert!(matches!(err, Error::OutOfRangeDate { field: Field::Day, value: 32, .. }));
    }

    #[test]
    fn zero_is_not_valid() {
        assert!(Date::ZERO.is_zero());
        assert_eq!(
            Date::ZERO.validate().unwrap_err().kind(),
            ErrorKind::OutOfRangeDate
        );
        assert!(!Date::new(2020, 1, 1).is_zero());
    }

    #[test]
    fn parse_with_patterns() {
        assert_eq!(
            Date::parse(Format::DateHyphen, "2020-04-05").unwrap(),
            ymd(2020, 4, 5)
        );
        assert_eq!(
            Date::parse(Format::DateSlash, "2020/04/05").unwrap(),
            ymd(2020, 4, 5)
        );
        assert_eq!(
            Date::parse(Format::DateTimeHyphen, "2020-04-05 14:15:18").unwrap(),
            ymd(2020, 4, 5)
        );
        assert_eq!(
            Date::parse(Format::Rfc3339, "2020-04-05T01:00:00+09:00").unwrap(),
            ymd(2020, 4, 5)
        );
        for (format, input) in [
            (Format::DateTimeHyphen, "2020-04-05T16:00:00+06:00"),
            (Format::DateHyphen, ""),
        ] {
            let err = Date::parse(format, input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse);
        }
    }

    #[test]
    fn format_with_patterns() {
        let date = ymd(2022, 4, 9);
        assert_eq!(date.format(Format::DateSlash).unwrap(), "2022/04/09");
        assert_eq!(date.format(Format::DateTimeHyphen).unwrap(), "2022-04-09 00:00:00");
    }

    #[test]
    fn to_datetime_is_midnight() {
        assert_eq!(
            Date::new(2020, 11, 1).to_datetime(),
            Datetime::new(2020, 11, 1, 0, 0, 0)
        );
        assert_eq!(Date::ZERO.to_datetime(), Datetime::ZERO);
    }

    #[test]
    fn duration_since_in_days() {
        let (duration, ok) = Date::new(2020, 7, 10).duration_since(&Date::new(2020, 7, 1));
        assert!(ok);
        assert_eq!(duration, Duration::days(9));
        let (duration, _) = Date::new(2020, 7, 10).duration_since(&Date::new(2020, 7, 10));
        assert_eq!(duration, Duration::zero());
        let (duration, ok) = Date::ZERO.duration_since(&Date::ZERO);
        assert!(ok);
        assert_eq!(duration, Duration::zero());
        let (duration, _) = Date::new(2020, 7, 10).duration_since(&Date::new(2019, 9, 10));
        assert_eq!(duration, Duration::days(304));
    }

    #[test]
    fn comparisons_use_instants() {
        let early = Date::new(2020, 3, 1);
        let late = Date::new(2020, 3, 2);
        assert!(early.before(&late));
        assert!(late.after(&early));
        assert!(early.before_equal(&early));
        assert!(late.after_equal(&late));
        assert!(ymd(2020, 13, 1).equal(&ymd(2021, 1, 1)));
        assert!(Date::ZERO.before(&early));
        assert!(!Date::ZERO.after(&early));
    }

    #[test]
    fn between_is_inclusive() {
        let start = Date::new(2020, 3, 1);
        let end = Date::new(2020, 3, 31);
        assert!(start.between(&start, &end));
        assert!(end.between(&start, &end));
        assert!(Date::new(2020, 3, 15).between(&start, &end));
        assert!(!Date::new(2020, 2, 29).between(&start, &end));
        assert!(!Date::new(2020, 4, 1).between(&start, &end));
    }

    #[test]
    fn add_duration_and_calendar_units() {
        let date = Date::new(2020, 1, 31);
        assert_eq!(date + Duration::days(30), ymd(2020, 3, 1));
        assert_eq!(date + Duration::hours(-24), ymd(2020, 1, 30));
        assert_eq!(date.add_date(0, 1, 0), ymd(2020, 3, 2));
        assert_eq!(date.add_date(1, 0, 1), ymd(2021, 2, 1));
        assert_eq!(Date::new(1, 1, 1) + Duration::days(-1), Date::ZERO);
    }

    #[test]
    fn from_str_is_strict() {
        assert_eq!("2020-04-01".parse::<Date>().unwrap(), ymd(2020, 4, 1));
        assert_eq!(
            "".parse::<Date>().unwrap_err().kind(),
            ErrorKind::UnmarshalFlag
        );
        assert_eq!(
            "2020/04/01".parse::<Date>().unwrap_err().kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            "2020-04-01 20:10:10".parse::<Date>().unwrap_err().kind(),
            ErrorKind::Parse
        );
        for input in ["2020-1-3", " 2020-01-03", "+2020-01-03", "12-01-03"] {
            let err = input.parse::<Date>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{input:?}");
        }
    }

    #[test]
    fn unmarshal_flag_keeps_value_on_error() {
        let mut date = ymd(1999, 1, 1);
        assert!(date.unmarshal_flag("").is_err());
        assert_eq!(date, ymd(1999, 1, 1));
        date.unmarshal_flag("2020-04-01").unwrap();
        assert_eq!(date, ymd(2020, 4, 1));
    }

    #[test]
    fn chrono_conversions() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Date::from(naive), ymd(2024, 2, 29));
        assert_eq!(ymd(2024, 2, 29).to_naive(), Some(naive));
        assert_eq!(ymd(999_999_999, 1, 1).to_naive(), None);
    }
}
