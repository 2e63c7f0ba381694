// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil Dates
//!
//! Calendar date and datetime values with no timezone attached, for storing,
//! transporting and comparing "wall-clock" values without zone ambiguity.
//!
//! # Core types
//!
//! - [`Date`]: year, month and day in the proleptic Gregorian calendar.
//! - [`TimeOfDay`]: hour, minute and second.
//! - [`Datetime`]: a [`Date`] plus a [`TimeOfDay`].
//! - [`Nullable<T>`]: a value plus a validity flag; see [`NullDate`] and
//!   [`NullDatetime`].
//! - [`DatePeriod`]: an inclusive date range, split by [`divide_period`].
//! - [`Format`]: the catalogue of text patterns for parsing and formatting.
//!
//! # Zero values
//!
//! `0000-00-00` (and `0000-00-00 00:00:00`) means "absent". Constructors
//! never fail: a tuple that normalizes to before 0001-01-01 collapses to
//! zero. Zero values do not pass `validate`, so callers check the two
//! independently.
//!
//! # Boundaries
//!
//! | Boundary | Present | Zero / invalid |
//! |----------|---------|----------------|
//! | [`Display`](std::fmt::Display) | `2020-01-03 04:05:06` | `0000-00-00 00:00:00` |
//! | JSON (`serde` feature) | `"2020-01-03 04:05:06"` | `null` |
//! | [`StorageBinding`] | canonical text | canonical text ([`Nullable`]: `NULL`) |
//! | [`FromStr`](std::str::FromStr) | canonical text | error ([`Nullable`]: empty string) |
//!
//! Every conversion to an absolute timeline is pinned to UTC; there is no
//! process-wide zone setting.

mod date;
mod datetime;
mod error;
mod format;
pub(crate) mod instant;
#[cfg(feature = "serde")]
mod json;
mod nullable;
mod period;
mod storage;
mod time;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use date::Date;
pub use datetime::Datetime;
pub use error::{BoxError, Error, ErrorKind, Field, Result, ScanFailure};
pub use format::Format;
pub use instant::{CivilFields, Instant, FIRST_UNIX_IN_AD};
pub use nullable::{CivilValue, NullDate, NullDatetime, Nullable};
pub use period::{divide_period, DatePeriod};
pub use storage::{StorageBinding, StorageValue};
pub use time::TimeOfDay;

// ── Field limits ──────────────────────────────────────────────────────────

pub use date::{
    MAX_DAY_OF_MONTH, MAX_MONTH_OF_YEAR, MAX_YEAR, MIN_DAY_OF_MONTH, MIN_MONTH_OF_YEAR, MIN_YEAR,
};
pub use time::{
    MAX_HOUR_OF_DAY, MAX_MINUTE_OF_HOUR, MAX_SECOND_OF_MINUTE, MIN_HOUR_OF_DAY,
    MIN_MINUTE_OF_HOUR, MIN_SECOND_OF_MINUTE,
};
