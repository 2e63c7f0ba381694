// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date periods and the period divider.
//!
//! This module provides:
//! - [`DatePeriod`]: an inclusive `[start, end]` range of civil dates
//! - [`divide_period`]: splits a range into contiguous chunks of at most N days

use chrono::Duration;
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{Error, Result};
use crate::instant::SECONDS_PER_DAY;

/// An inclusive range of civil dates.
///
/// # Examples
///
/// ```
/// use civildate::{Date, DatePeriod};
///
/// let period = DatePeriod::new(Date::new(2022, 4, 1), Date::new(2022, 4, 7));
/// assert_eq!(period.to_string(), "2022-04-01 to 2022-04-07");
///
/// let chunks = period.divide(3).unwrap();
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[2].start, Date::new(2022, 4, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatePeriod {
    pub start: Date,
    pub end: Date,
}

impl DatePeriod {
    pub const fn new(start: Date, end: Date) -> Self {
        DatePeriod { start, end }
    }

    /// Split this period; see [`divide_period`].
    pub fn divide(&self, chunk_days: i64) -> Result<Vec<DatePeriod>> {
        divide_period(self.start, self.end, chunk_days)
    }

    /// `end − start`, with the saturation flag of [`Date::duration_since`].
    pub fn duration(&self) -> (Duration, bool) {
        self.end.duration_since(&self.start)
    }

    /// Returns the distance from `start` to `end` in days.
    ///
    /// Computed on the exact second grid, so it never saturates.
    ///
    /// ```
    /// use civildate::{Date, DatePeriod};
    /// use qtty::Days;
    ///
    /// let period = DatePeriod::new(Date::new(2020, 2, 1), Date::new(2020, 3, 1));
    /// assert_eq!(period.duration_days(), Days::new(29.0));
    /// ```
    pub fn duration_days(&self) -> Days {
        let seconds = self.end.to_instant().unix_seconds() - self.start.to_instant().unix_seconds();
        Days::new(seconds as f64 / SECONDS_PER_DAY as f64)
    }

    /// Whether `date` lies within the period, ends included.
    pub fn contains(&self, date: &Date) -> bool {
        date.between(&self.start, &self.end)
    }

    /// Returns the overlapping sub-period between `self` and `other`.
    ///
    /// Both ends are inclusive, so periods sharing a single boundary day
    /// intersect on that day.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start.after_equal(&other.start) {
            self.start
        } else {
            other.start
        };
        let end = if self.end.before_equal(&other.end) {
            self.end
        } else {
            other.end
        };

        if start.before_equal(&end) {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Split `[start, end]` into contiguous, gap-free periods of at most
/// `chunk_days` days.
///
/// A range no longer than `chunk_days` days comes back as a single period,
/// unchanged. Otherwise chunks of exactly `chunk_days` days are emitted from
/// `start` onwards and the remainder, if any, forms a shorter last chunk
/// ending on `end`.
///
/// # Errors
///
/// - [`Error::EmptyDate`] if either bound is the zero date.
/// - [`Error::IncorrectDivisionDays`] if `chunk_days < 1`.
/// - [`Error::LengthOfPeriod`] if `end − start` does not fit a duration.
pub fn divide_period(start: Date, end: Date, chunk_days: i64) -> Result<Vec<DatePeriod>> {
    if start.is_zero() || end.is_zero() {
        return Err(Error::EmptyDate { start, end });
    }
    if chunk_days < 1 {
        return Err(Error::IncorrectDivisionDays { days: chunk_days });
    }
    let (span, ok) = end.duration_since(&start);
    if !ok {
        return Err(Error::LengthOfPeriod { start, end });
    }
    // A chunk longer than any representable span always covers the range.
    let limit = Duration::try_days(chunk_days).unwrap_or(Duration::MAX);
    if span <= limit {
        return Ok(vec![DatePeriod::new(start, end)]);
    }

    let one_day = Duration::days(1);
    let mut periods = Vec::new();
    let mut chunk_start = start;
    let mut counter = 0;
    let mut day = start;
    loop {
        counter += 1;
        if counter == 1 {
            chunk_start = day;
        }
        let closes_chunk = counter == chunk_days;
        let reaches_end = day.after_equal(&end);
        if closes_chunk || reaches_end {
            log::trace!("closing chunk {chunk_start} to {day}");
            periods.push(DatePeriod::new(chunk_start, day));
            counter = 0;
        }
        if reaches_end {
            break;
        }
        day = day + one_day;
    }
    Ok(periods)
}
