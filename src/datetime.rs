// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar date plus wall-clock time, without a zone.
//!
//! [`Datetime`] composes a [`Date`] and a [`TimeOfDay`]. It is zero only
//! when both halves are zero. Every conversion to and from an absolute
//! timeline is pinned to UTC; there is no process-wide zone setting.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::date::Date;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::instant::Instant;
use crate::time::TimeOfDay;

/// A civil date and time of day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datetime {
    pub date: Date,
    pub time: TimeOfDay,
}

impl Datetime {
    /// `0000-00-00 00:00:00`.
    pub const ZERO: Self = Self {
        date: Date::ZERO,
        time: TimeOfDay::ZERO,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Build a datetime, normalizing overflow in every component.
    ///
    /// `(549, 4, 33, 13, 80, 80)` becomes `0549-05-03 14:21:20`. Results
    /// before 0001-01-01 00:00:00 collapse to [`Datetime::ZERO`].
    pub fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        Self::from_instant(Instant::from_civil(year, month, day, hour, minute, second))
    }

    pub(crate) fn from_instant(instant: Instant) -> Self {
        if instant.is_before_ad() {
            log::debug!(
                "instant {} precedes 0001-01-01 00:00:00, collapsing to the zero datetime",
                instant.unix_seconds()
            );
            return Self::ZERO;
        }
        let fields = instant.to_civil();
        let Ok(year) = u32::try_from(fields.year) else {
            log::debug!("year {} does not fit a datetime, collapsing to zero", fields.year);
            return Self::ZERO;
        };
        Self {
            date: Date {
                year,
                month: fields.month,
                day: fields.day,
            },
            time: TimeOfDay {
                hour: fields.hour,
                minute: fields.minute,
                second: fields.second,
            },
        }
    }

    /// Convert from a chrono naive datetime; sub-second parts are dropped.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self::from_instant(Instant::from_naive(datetime))
    }

    /// Wall-clock fields of `datetime` in its own zone. The zone itself is
    /// discarded.
    pub fn from_chrono<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_naive(datetime.naive_local())
    }

    /// Current wall clock at UTC.
    pub fn now_utc() -> Self {
        Self::from_naive(Utc::now().naive_utc())
    }

    /// Current wall clock at a fixed offset from UTC.
    pub fn now_at(offset: FixedOffset) -> Self {
        Self::from_chrono(&Utc::now().with_timezone(&offset))
    }

    /// Parse `input` with `format`. Offsets in the input are ignored and the
    /// wall-clock digits are taken as they are.
    pub fn parse(format: Format, input: &str) -> Result<Self> {
        let naive = format.parse_naive(input)?;
        Ok(Self::from_naive(naive))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.date.is_zero() && self.time.is_zero()
    }

    #[inline]
    pub const fn is_not_zero(&self) -> bool {
        !self.is_zero()
    }

    // ── conversions ───────────────────────────────────────────────────

    #[inline]
    pub fn to_instant(&self) -> Instant {
        Instant::from_civil(
            self.date.year.into(),
            self.date.month.into(),
            self.date.day.into(),
            self.time.hour.into(),
            self.time.minute.into(),
            self.time.second.into(),
        )
    }

    /// Convert to a chrono naive datetime, if within chrono's range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        self.to_instant().to_naive()
    }

    pub fn format(&self, format: Format) -> Result<String> {
        format.render(self.to_instant())
    }

    // ── comparison ────────────────────────────────────────────────────

    #[inline]
    pub fn before(&self, other: &Datetime) -> bool {
        self.to_instant() < other.to_instant()
    }

    #[inline]
    pub fn after(&self, other: &Datetime) -> bool {
        self.to_instant() > other.to_instant()
    }

    #[inline]
    pub fn equal(&self, other: &Datetime) -> bool {
        self.to_instant() == other.to_instant()
    }

    #[inline]
    pub fn before_equal(&self, other: &Datetime) -> bool {
        self.to_instant() <= other.to_instant()
    }

    #[inline]
    pub fn after_equal(&self, other: &Datetime) -> bool {
        self.to_instant() >= other.to_instant()
    }

    /// Inclusive on both ends.
    pub fn between(&self, start: &Datetime, end: &Datetime) -> bool {
        self.after_equal(start) && self.before_equal(end)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// `self − target`, with a `false` flag when the result saturated.
    pub fn duration_since(&self, target: &Datetime) -> (Duration, bool) {
        self.to_instant().duration_since(target.to_instant())
    }

    pub fn add_date(&self, years: i64, months: i64, days: i64) -> Self {
        Self::from_instant(self.to_instant().add_date(years, months, days))
    }

    // ── flag binding ──────────────────────────────────────────────────

    /// Overwrite `self` from `YYYY-MM-DD HH:MM:SS`. Empty input is an error.
    pub fn unmarshal_flag(&mut self, input: &str) -> Result<()> {
        *self = input.parse()?;
        Ok(())
    }
}

impl Add<Duration> for Datetime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Self::from_instant(self.to_instant() + rhs)
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

impl FromStr for Datetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::UnmarshalFlag {
                subject: "datetime",
            });
        }
        let naive = Format::DateTimeHyphen.parse_canonical(s)?;
        Ok(Self::from_naive(naive))
    }
}

impl From<Date> for Datetime {
    fn from(date: Date) -> Self {
        date.to_datetime()
    }
}

impl From<NaiveDateTime> for Datetime {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_naive(datetime)
    }
}
