// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Presence-flagged wrappers around [`Date`] and [`Datetime`].
//!
//! A [`Nullable`] is valid exactly when it holds a non-zero value: every
//! constructor funnels through [`Nullable::new`], which maps the zero value
//! to "absent". At the storage, JSON and flag boundaries an absent value
//! becomes `NULL`, `null` and the empty string respectively.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};

use crate::date::Date;
use crate::datetime::Datetime;
use crate::error::{Error, Result};
use crate::storage::{StorageBinding, StorageValue};

/// A civil value type that can be wrapped by [`Nullable`].
pub trait CivilValue:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + FromStr<Err = Error> + StorageBinding
{
    /// Name used in error messages.
    const SUBJECT: &'static str;

    /// Whether this is the "absent" sentinel.
    fn is_zero(&self) -> bool;
}

impl CivilValue for Date {
    const SUBJECT: &'static str = "date";

    #[inline]
    fn is_zero(&self) -> bool {
        Date::is_zero(self)
    }
}

impl CivilValue for Datetime {
    const SUBJECT: &'static str = "datetime";

    #[inline]
    fn is_zero(&self) -> bool {
        Datetime::is_zero(self)
    }
}

/// A civil value plus a validity flag.
///
/// The inner value of an invalid wrapper is always zero.
///
/// # Examples
///
/// ```
/// use civildate::{Date, NullDate};
///
/// let present = NullDate::from_ymd(2020, 1, 3);
/// assert_eq!(present.get(), Some(Date::new(2020, 1, 3)));
///
/// let absent = NullDate::from_ymd(0, 0, 0);
/// assert!(!absent.is_valid());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    value: T,
    valid: bool,
}

/// Nullable calendar date.
pub type NullDate = Nullable<Date>;

/// Nullable calendar date plus time of day.
pub type NullDatetime = Nullable<Datetime>;

impl<T: CivilValue> Nullable<T> {
    /// Wrap `value`; the zero value yields an invalid wrapper.
    pub fn new(value: T) -> Self {
        if value.is_zero() {
            Self::null()
        } else {
            Self { value, valid: true }
        }
    }

    /// The absent value.
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The inner value, or zero when absent.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn get(&self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::null();
    }

    /// Overwrite `self` from a command-line value.
    ///
    /// Empty input clears the value without error. A malformed value also
    /// clears it and the parse error is returned.
    pub fn unmarshal_flag(&mut self, input: &str) -> Result<()> {
        match input.parse() {
            Ok(value) => {
                *self = value;
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }
}

impl<T: CivilValue> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: CivilValue> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Self::new)
    }
}

impl<T: CivilValue> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.get()
    }
}

impl NullDate {
    /// Normalizing constructor; see [`Date::new`].
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Self {
        Self::new(Date::new(year, month, day))
    }
}

impl NullDatetime {
    /// Normalizing constructor; see [`Datetime::new`].
    pub fn from_ymd_hms(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> Self {
        Self::new(Datetime::new(year, month, day, hour, minute, second))
    }

    /// Midnight on `date`.
    pub fn from_date(date: Date) -> Self {
        Self::new(date.to_datetime())
    }

    /// Wall-clock fields of an optional zoned datetime.
    pub fn from_chrono<Tz: TimeZone>(datetime: Option<&DateTime<Tz>>) -> Self {
        datetime.map_or_else(Self::null, |datetime| {
            Self::new(Datetime::from_chrono(datetime))
        })
    }
}

impl<T: CivilValue> fmt::Display for Nullable<T> {
    /// The canonical form when valid, nothing otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => fmt::Display::fmt(&value, f),
            None => Ok(()),
        }
    }
}

impl<T: CivilValue> FromStr for Nullable<T> {
    type Err = Error;

    /// Empty input is the absent value.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::null());
        }
        s.parse().map(Self::new)
    }
}

impl<T: CivilValue> StorageBinding for Nullable<T> {
    /// `Null` when invalid, the inner representation otherwise.
    fn to_storage(&self) -> Result<StorageValue> {
        match self.get() {
            Some(value) => value.to_storage(),
            None => Ok(StorageValue::Null),
        }
    }

    /// `Null` clears the value without error. Any scan error also clears it
    /// and is returned.
    fn scan(&mut self, value: &StorageValue) -> Result<()> {
        if value.is_null() {
            self.clear();
            return Ok(());
        }
        let mut inner = T::default();
        match inner.scan(value) {
            Ok(()) => {
                *self = Self::new(inner);
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }
}
