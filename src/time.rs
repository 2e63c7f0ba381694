// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Wall-clock time of day without a zone.

use std::fmt;

use crate::error::{Error, Field, Result};

pub const MIN_HOUR_OF_DAY: u32 = 1;
pub const MAX_HOUR_OF_DAY: u32 = 23;
pub const MIN_MINUTE_OF_HOUR: u32 = 0;
pub const MAX_MINUTE_OF_HOUR: u32 = 59;
pub const MIN_SECOND_OF_MINUTE: u32 = 0;
pub const MAX_SECOND_OF_MINUTE: u32 = 59;

/// Hour, minute and second of a civil day.
///
/// Construction through the public fields is unchecked; call
/// [`TimeOfDay::validate`] or use [`TimeOfDay::new`] to enforce ranges.
/// Note that validation requires `hour >= 1`: midnight hour is a legal
/// *value* (it is what [`TimeOfDay::ZERO`] holds) but does not validate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeOfDay {
    /// `00:00:00`, the zero value.
    pub const ZERO: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Validated constructor.
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self> {
        Self {
            hour,
            minute,
            second,
        }
        .validate()
    }

    /// Check hour, minute and second in that order; the first field out of
    /// range is reported and the rest are not inspected.
    pub fn validate(&self) -> Result<Self> {
        if !(MIN_HOUR_OF_DAY..=MAX_HOUR_OF_DAY).contains(&self.hour) {
            return Err(Error::out_of_range("time", Field::Hour, self.hour));
        }
        if !(MIN_MINUTE_OF_HOUR..=MAX_MINUTE_OF_HOUR).contains(&self.minute) {
            return Err(Error::out_of_range("time", Field::Minute, self.minute));
        }
        if !(MIN_SECOND_OF_MINUTE..=MAX_SECOND_OF_MINUTE).contains(&self.second) {
            return Err(Error::out_of_range("time", Field::Second, self.second));
        }
        Ok(*self)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0
    }

    /// Two-digit renderings: `(12, 1, 3)` → `("12", "01", "03")`.
    pub fn split_string(&self) -> (String, String, String) {
        (
            format!("{:02}", self.hour),
            format!("{:02}", self.minute),
            format!("{:02}", self.second),
        )
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
