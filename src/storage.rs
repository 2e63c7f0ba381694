// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Storage binding: conversion to and from a driver-neutral column value.
//!
//! Values are written in canonical text form. Reading is lenient about
//! trailing content (a date column may hold a full datetime) but strict
//! about the leading `YYYY-M-D` shape, and performs no range validation:
//! the digits found are stored as they are.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::date::Date;
use crate::datetime::Datetime;
use crate::error::{Error, Result, ScanFailure};
use crate::time::TimeOfDay;

/// A column value as handed over by a storage driver.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A native timestamp column, already stripped of any zone.
    Timestamp(NaiveDateTime),
}

impl StorageValue {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, StorageValue::Null)
    }

    /// Text form of the value, if it has one.
    ///
    /// Bytes must be valid UTF-8; scalars use their display form and
    /// timestamps render as `YYYY-MM-DD HH:MM:SS`.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            StorageValue::Null => None,
            StorageValue::Text(text) => Some(Cow::Borrowed(text)),
            StorageValue::Bytes(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            StorageValue::Int(value) => Some(Cow::Owned(value.to_string())),
            StorageValue::Float(value) => Some(Cow::Owned(value.to_string())),
            StorageValue::Bool(value) => Some(Cow::Owned(value.to_string())),
            StorageValue::Timestamp(value) => {
                Some(Cow::Owned(value.format("%Y-%m-%d %H:%M:%S").to_string()))
            }
        }
    }
}

impl fmt::Display for StorageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None if self.is_null() => f.write_str("NULL"),
            None => f.write_str("<binary>"),
        }
    }
}

impl From<&str> for StorageValue {
    fn from(value: &str) -> Self {
        StorageValue::Text(value.to_owned())
    }
}

impl From<String> for StorageValue {
    fn from(value: String) -> Self {
        StorageValue::Text(value)
    }
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        StorageValue::Bytes(value)
    }
}

impl From<NaiveDateTime> for StorageValue {
    fn from(value: NaiveDateTime) -> Self {
        StorageValue::Timestamp(value)
    }
}

impl<T: Into<StorageValue>> From<Option<T>> for StorageValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StorageValue::Null, Into::into)
    }
}

/// Two-way binding between a civil value and a storage column.
pub trait StorageBinding {
    /// Storage representation of `self`.
    fn to_storage(&self) -> Result<StorageValue>;

    /// Overwrite `self` from a storage value. On error `self` is unchanged.
    fn scan(&mut self, value: &StorageValue) -> Result<()>;
}

fn date_regex() -> &'static Regex {
    /// Leading `YYYY-M-D`; anything after it is ignored.
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();

    DATE_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})")
            .expect("could not compile date regular expression")
    })
}

fn datetime_regex() -> &'static Regex {
    /// Leading `YYYY-M-D H:M:S`; anything after it is ignored.
    static DATETIME_REGEX: OnceLock<Regex> = OnceLock::new();

    DATETIME_REGEX.get_or_init(|| {
        Regex::new(
            r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2}) ([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})",
        )
        .expect("could not compile datetime regular expression")
    })
}

/// Match `regex` at the start of the value's text and read every capture
/// group as a number.
fn scan_groups<const N: usize>(
    subject: &'static str,
    regex: &Regex,
    value: &StorageValue,
) -> Result<[u32; N]> {
    let fail = |reason: ScanFailure| {
        log::debug!("rejecting storage value {value} for {subject}: {reason}");
        Error::scan(subject, reason)
    };

    if value.is_null() {
        return Err(fail(ScanFailure::NullValue));
    }
    let text = value.to_text().ok_or_else(|| fail(ScanFailure::NotText))?;
    let captures = regex
        .captures(&text)
        .ok_or_else(|| fail(ScanFailure::PatternMismatch(text.to_string())))?;

    let mut numbers = [0u32; N];
    for (slot, group) in numbers.iter_mut().zip(captures.iter().skip(1)) {
        let group = group.map_or("", |m| m.as_str());
        *slot = group
            .parse()
            .map_err(|_| fail(ScanFailure::InvalidNumber(group.to_owned())))?;
    }
    Ok(numbers)
}

impl StorageBinding for Date {
    /// Always succeeds; the zero date is stored as `0000-00-00`.
    fn to_storage(&self) -> Result<StorageValue> {
        Ok(StorageValue::Text(self.to_string()))
    }

    /// Accepts any text starting with `YYYY-M-D`, including full datetimes
    /// whose time part is dropped.
    fn scan(&mut self, value: &StorageValue) -> Result<()> {
        let [year, month, day] = scan_groups("date", date_regex(), value)?;
        *self = Date { year, month, day };
        Ok(())
    }
}

impl StorageBinding for Datetime {
    fn to_storage(&self) -> Result<StorageValue> {
        Ok(StorageValue::Text(self.to_string()))
    }

    fn scan(&mut self, value: &StorageValue) -> Result<()> {
        let [year, month, day, hour, minute, second] =
            scan_groups("datetime", datetime_regex(), value)?;
        *self = Datetime {
            date: Date { year, month, day },
            time: TimeOfDay {
                hour,
                minute,
                second,
            },
        };
        Ok(())
    }
}
