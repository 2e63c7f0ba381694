// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types shared by every civil value and codec in the crate.
//!
//! Every fallible operation returns [`Error`]. Callers branch on the
//! category via [`Error::kind`] instead of matching on messages.

use std::fmt;

use thiserror::Error;

use crate::date::Date;
use crate::format::Format;

/// Boxed underlying cause carried by codec errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error category, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field is outside its permitted range.
    OutOfRangeDate,
    /// A required date was the zero value.
    EmptyDate,
    /// A span does not fit the representable duration range.
    LengthOfPeriod,
    /// The chunk size handed to the period divider is below one day.
    IncorrectDivisionDays,
    /// A storage value could not be scanned.
    Scan,
    /// JSON encoding failed.
    MarshalJson,
    /// JSON decoding failed.
    UnmarshalJson,
    /// Command-line flag decoding failed.
    UnmarshalFlag,
    /// A string did not match the requested pattern.
    Parse,
}

/// Calendar or clock field named by [`Error::OutOfRangeDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
        };
        f.write_str(name)
    }
}

/// Reason a storage scan was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    /// The storage value was NULL.
    NullValue,
    /// The storage value has no text representation.
    NotText,
    /// The text did not match the expected leading pattern.
    PatternMismatch(String),
    /// A captured group was not a number that fits the field.
    InvalidNumber(String),
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanFailure::NullValue => f.write_str("nil value"),
            ScanFailure::NotText => f.write_str("value is not convertible to text"),
            ScanFailure::PatternMismatch(text) => write!(f, "{text:?} does not match"),
            ScanFailure::InvalidNumber(group) => write!(f, "invalid number {group:?}"),
        }
    }
}

/// Errors returned by civil value operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{subject} out of range: {field} {value}")]
    OutOfRangeDate {
        subject: &'static str,
        field: Field,
        value: i128,
    },

    #[error("date is empty: start {start}, end {end}")]
    EmptyDate { start: Date, end: Date },

    #[error("too long or too short a period: start {start}, end {end}")]
    LengthOfPeriod { start: Date, end: Date },

    #[error("the number of days specified is less than or equal to 0: {days}")]
    IncorrectDivisionDays { days: i64 },

    #[error("failed to scan {subject}: {reason}")]
    Scan {
        subject: &'static str,
        reason: ScanFailure,
    },

    #[error("failed to marshal json: {source}")]
    MarshalJson {
        #[source]
        source: BoxError,
    },

    #[error("failed to unmarshal json {subject}: {context}")]
    UnmarshalJson {
        subject: &'static str,
        context: &'static str,
        #[source]
        source: Option<BoxError>,
    },

    #[error("failed to unmarshal flag {subject}: input is empty")]
    UnmarshalFlag { subject: &'static str },

    /// `source` is absent when the text was rejected before reaching the
    /// pattern engine, for instance by the canonical shape check.
    #[error("failed to parse {input:?} as {format}")]
    Parse {
        input: String,
        format: Format,
        #[source]
        source: Option<chrono::ParseError>,
    },
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRangeDate { .. } => ErrorKind::OutOfRangeDate,
            Error::EmptyDate { .. } => ErrorKind::EmptyDate,
            Error::LengthOfPeriod { .. } => ErrorKind::LengthOfPeriod,
            Error::IncorrectDivisionDays { .. } => ErrorKind::IncorrectDivisionDays,
            Error::Scan { .. } => ErrorKind::Scan,
            Error::MarshalJson { .. } => ErrorKind::MarshalJson,
            Error::UnmarshalJson { .. } => ErrorKind::UnmarshalJson,
            Error::UnmarshalFlag { .. } => ErrorKind::UnmarshalFlag,
            Error::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Shorthand for `self.kind() == kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn out_of_range(subject: &'static str, field: Field, value: impl Into<i128>) -> Self {
        Error::OutOfRangeDate {
            subject,
            field,
            value: value.into(),
        }
    }

    pub(crate) fn scan(subject: &'static str, reason: ScanFailure) -> Self {
        Error::Scan { subject, reason }
    }
}
