// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! UTC instant bridge.
//!
//! [`Instant`] is the computation aid behind every civil value. It stores a
//! whole number of seconds since the Unix epoch, always read at UTC, in an
//! `i128` so that any signed 64-bit civil tuple can be normalized without
//! overflow. All comparison, arithmetic and overflow normalization
//! (month 14, day 33, second 80, negative components) goes through here:
//!
//! ```text
//! civil tuple → Instant → normalized civil tuple
//! ```
//!
//! The calendar math is proleptic Gregorian and uses the era/day-of-era
//! decomposition, so years far outside chrono's range (up to and beyond
//! 999 999 999) are handled exactly.

use chrono::{DateTime, Duration, NaiveDateTime};
use std::ops::Add;

pub(crate) const SECONDS_PER_MINUTE: i128 = 60;
pub(crate) const SECONDS_PER_HOUR: i128 = 3_600;
pub(crate) const SECONDS_PER_DAY: i128 = 86_400;
const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Days from 0000-03-01 to 1970-01-01.
const UNIX_EPOCH_DAY_OFFSET: i128 = 719_468;
const DAYS_PER_ERA: i128 = 146_097;

/// Unix seconds of 0001-01-01T00:00:00 UTC, the first representable instant.
pub const FIRST_UNIX_IN_AD: i64 = -62_135_596_800;

// ═══════════════════════════════════════════════════════════════════════════
// Civil fields
// ═══════════════════════════════════════════════════════════════════════════

/// Normalized civil fields read back from an [`Instant`].
///
/// `month` is always `1..=12`, `day` a valid day of that month, and the
/// clock fields are within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilFields {
    pub year: i128,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A point on the UTC timeline with one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    seconds: i128,
}

impl Instant {
    /// The first instant of year 1 AD.
    pub const FIRST_AD: Self = Self::from_unix_seconds(FIRST_UNIX_IN_AD);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from seconds since 1970-01-01T00:00:00 UTC.
    #[inline]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self {
            seconds: seconds as i128,
        }
    }

    /// Convert a civil tuple, read at UTC, into an instant.
    ///
    /// Components may be out of range or negative; overflow cascades the
    /// way calendar arithmetic does: month 14 is February of the next year,
    /// day 0 is the last day of the previous month, second 80 is one minute
    /// and twenty seconds.
    pub fn from_civil(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        let months = year as i128 * 12 + (month as i128 - 1);
        let norm_year = months.div_euclid(12);
        let norm_month = months.rem_euclid(12) + 1;

        let days = days_from_civil(norm_year, norm_month, 1) + (day as i128 - 1);
        let seconds = days * SECONDS_PER_DAY
            + hour as i128 * SECONDS_PER_HOUR
            + minute as i128 * SECONDS_PER_MINUTE
            + second as i128;
        Self { seconds }
    }

    /// Build from a chrono naive datetime interpreted at UTC.
    ///
    /// Sub-second precision is dropped.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self {
            seconds: datetime.and_utc().timestamp() as i128,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Seconds since the Unix epoch.
    #[inline]
    pub const fn unix_seconds(&self) -> i128 {
        self.seconds
    }

    /// Whether this instant precedes year 1 AD.
    #[inline]
    pub fn is_before_ad(&self) -> bool {
        *self < Self::FIRST_AD
    }

    /// Read the normalized civil fields back out.
    pub fn to_civil(&self) -> CivilFields {
        let days = self.seconds.div_euclid(SECONDS_PER_DAY);
        let secs_of_day = self.seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        CivilFields {
            year,
            month: month as u32,
            day: day as u32,
            hour: (secs_of_day / SECONDS_PER_HOUR) as u32,
            minute: (secs_of_day % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u32,
            second: (secs_of_day % SECONDS_PER_MINUTE) as u32,
        }
    }

    /// Convert to a chrono naive datetime at UTC.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let seconds = i64::try_from(self.seconds).ok()?;
        DateTime::from_timestamp(seconds, 0).map(|datetime| datetime.naive_utc())
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Add whole calendar years, months and days, keeping the time of day.
    ///
    /// The shifted tuple is renormalized, so 2020-01-31 plus one month is
    /// 2020-03-02.
    pub fn add_date(&self, years: i64, months: i64, days: i64) -> Self {
        let fields = self.to_civil();
        let months = fields.year * 12 + (fields.month as i128 - 1) + months as i128;
        let year = months.div_euclid(12) + years as i128;
        let month = months.rem_euclid(12) + 1;

        let day_number = days_from_civil(year, month, 1) + (fields.day as i128 - 1) + days as i128;
        let seconds_of_day = fields.hour as i128 * SECONDS_PER_HOUR
            + fields.minute as i128 * SECONDS_PER_MINUTE
            + fields.second as i128;
        Self {
            seconds: day_number * SECONDS_PER_DAY + seconds_of_day,
        }
    }

    /// Signed difference `self − earlier`.
    ///
    /// The boolean is `false` when the difference does not fit a signed
    /// 64-bit nanosecond count (roughly 292 years either way); the duration
    /// is then saturated to the nearest bound.
    pub fn duration_since(&self, earlier: Instant) -> (Duration, bool) {
        let nanos = (self.seconds - earlier.seconds) * NANOS_PER_SECOND;
        match i64::try_from(nanos) {
            Ok(nanos) => (Duration::nanoseconds(nanos), true),
            Err(_) if nanos > 0 => (Duration::nanoseconds(i64::MAX), false),
            Err(_) => (Duration::nanoseconds(i64::MIN), false),
        }
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Duration> for Instant {
    type Output = Self;

    /// Sub-second parts of `rhs` are floored onto the second grid.
    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        let mut seconds = rhs.num_seconds() as i128;
        if rhs.subsec_nanos() < 0 {
            seconds -= 1;
        }
        Self {
            seconds: self.seconds + seconds,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Proleptic Gregorian day numbers
// ═══════════════════════════════════════════════════════════════════════════

/// Days since 1970-01-01 for a normalized `(year, month 1..=12, day)`.
///
/// `day` may lie outside the month; the result is then simply offset.
fn days_from_civil(year: i128, month: i128, day: i128) -> i128 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - UNIX_EPOCH_DAY_OFFSET
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i128) -> (i128, i128, i128) {
    let days = days + UNIX_EPOCH_DAY_OFFSET;
    let era = days.div_euclid(DAYS_PER_ERA);
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i128::from(month <= 2);
    (year, month, day)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(year: i128, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> CivilFields {
        CivilFields {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn unix_epoch_is_zero() {
        assert_eq!(Instant::from_civil(1970, 1, 1, 0, 0, 0).unix_seconds(), 0);
        assert_eq!(
            Instant::from_unix_seconds(0).to_civil(),
            civil(1970, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn first_ad_constant_matches_calendar() {
        assert_eq!(Instant::from_civil(1, 1, 1, 0, 0, 0), Instant::FIRST_AD);
        assert!(!Instant::FIRST_AD.is_before_ad());
        assert!(Instant::from_civil(1, 1, 1, 0, 0, -1).is_before_ad());
    }

    #[test]
    fn month_overflow_rolls_into_next_year() {
        let instant = Instant::from_civil(549, 14, 1, 0, 0, 0);
        assert_eq!(instant.to_civil(), civil(550, 2, 1, 0, 0, 0));
    }

    #[test]
    fn day_and_clock_overflow_cascade() {
        let instant = Instant::from_civil(549, 4, 33, 13, 80, 80);
        assert_eq!(instant.to_civil(), civil(549, 5, 3, 14, 21, 20));
    }

    #[test]
    fn zero_tuple_lands_in_year_minus_one() {
        // month 0 is December of year -1, day 0 the last day of November.
        let instant = Instant::from_civil(0, 0, 0, 0, 0, 0);
        assert_eq!(instant.to_civil(), civil(-1, 11, 30, 0, 0, 0));
        assert!(instant.is_before_ad());
    }

    #[test]
    fn negative_components_borrow() {
        let instant = Instant::from_civil(2020, 3, 1, 0, 0, -1);
        assert_eq!(instant.to_civil(), civil(2020, 2, 29, 23, 59, 59));
    }

    #[test]
    fn matches_chrono_inside_its_range() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        let instant = Instant::from_civil(2024, 2, 29, 23, 59, 58);
        assert_eq!(Instant::from_naive(naive), instant);
        assert_eq!(instant.to_naive(), Some(naive));
    }

    #[test]
    fn huge_years_roundtrip() {
        let instant = Instant::from_civil(999_999_999, 12, 31, 23, 59, 59);
        assert_eq!(instant.to_civil(), civil(999_999_999, 12, 31, 23, 59, 59));
        assert_eq!(instant.to_naive(), None);
    }

    #[test]
    fn add_duration_floors_subsecond_parts() {
        let base = Instant::from_unix_seconds(100);
        assert_eq!((base + Duration::milliseconds(1_500)).unix_seconds(), 101);
        assert_eq!((base + Duration::milliseconds(-1_500)).unix_seconds(), 98);
        assert_eq!((base + Duration::hours(-1)).unix_seconds(), 100 - 3_600);
    }

    #[test]
    fn add_date_renormalizes() {
        let base = Instant::from_civil(2020, 4, 15, 20, 20, 20);
        assert_eq!(base.add_date(0, 9, 30).to_civil(), civil(2021, 2, 14, 20, 20, 20));
        assert_eq!(base.add_date(2, 1, 1).to_civil(), civil(2022, 5, 16, 20, 20, 20));
        let jan31 = Instant::from_civil(2020, 1, 31, 0, 0, 0);
        assert_eq!(jan31.add_date(0, 1, 0).to_civil(), civil(2020, 3, 2, 0, 0, 0));
    }

    #[test]
    fn duration_since_saturates_beyond_i64_nanoseconds() {
        let later = Instant::from_civil(2000, 6, 30, 0, 0, 0);
        let earlier = Instant::from_civil(1710, 7, 30, 0, 0, 0);
        let (duration, ok) = later.duration_since(earlier);
        assert!(ok);
        assert_eq!(duration.num_hours(), 2_541_384);

        let ancient = Instant::from_civil(1500, 1, 1, 0, 0, 0);
        assert_eq!(
            later.duration_since(ancient),
            (Duration::nanoseconds(i64::MAX), false)
        );
        assert_eq!(
            ancient.duration_since(later),
            (Duration::nanoseconds(i64::MIN), false)
        );
    }
}
