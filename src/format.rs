// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Named text patterns and the adapter onto chrono's formatting engine.
//!
//! Every [`Format`] expands to a list of chrono format items. Parsing is
//! pinned to UTC: if the input carries a UTC offset (`+09:00`, `Z`, a zone
//! abbreviation) it is checked for syntax and then **discarded**, so the
//! wall-clock digits are taken verbatim.
//!
//! Fields a pattern does not mention default to the start of their range:
//! [`Format::Month`] parses `"202204"` as 2022-04-01 00:00:00.

use std::fmt::{self, Write};
use std::sync::OnceLock;

use chrono::format::{self, Fixed, Item, Parsed, StrftimeItems};
use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{Error, Field, Result};
use crate::instant::Instant;

/// Catalogue of supported text patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `200601`
    Month,
    /// `2006-01`
    MonthHyphen,
    /// `060102`
    DateAbbreviated,
    /// `20060102`
    Date,
    /// `2006-01-02`, canonical date form.
    DateHyphen,
    /// `2006/01/02`
    DateSlash,
    /// `2006010215`
    DateHour,
    /// `2006-01-02 15`
    DateHourHyphen,
    /// `2006/01/02 15`
    DateHourSlash,
    /// `2006-01-02 Z07:00`
    DateRfc3339,
    /// `20060102150405`
    DateTime,
    /// `2006-01-02 15:04:05`, canonical datetime form.
    DateTimeHyphen,
    /// `2006/01/02 15:04:05`
    DateTimeSlash,
    /// `Mon Jan  2 15:04:05 2006`
    Ansic,
    /// `Mon Jan  2 15:04:05 MST 2006`
    UnixDate,
    /// `Mon Jan 02 15:04:05 -0700 2006`
    RubyDate,
    /// `02 Jan 06 15:04 MST`
    Rfc822,
    /// `02 Jan 06 15:04 -0700`
    Rfc822Z,
    /// `Monday, 02-Jan-06 15:04:05 MST`
    Rfc850,
    /// `Mon, 02 Jan 2006 15:04:05 MST`
    Rfc1123,
    /// `Mon, 02 Jan 2006 15:04:05 -0700`
    Rfc1123Z,
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
    /// `2006-01-02T15:04:05.999999999Z07:00`
    Rfc3339Nano,
}

impl Format {
    /// Every pattern in the catalogue.
    pub const ALL: [Format; 23] = [
        Format::Month,
        Format::MonthHyphen,
        Format::DateAbbreviated,
        Format::Date,
        Format::DateHyphen,
        Format::DateSlash,
        Format::DateHour,
        Format::DateHourHyphen,
        Format::DateHourSlash,
        Format::DateRfc3339,
        Format::DateTime,
        Format::DateTimeHyphen,
        Format::DateTimeSlash,
        Format::Ansic,
        Format::UnixDate,
        Format::RubyDate,
        Format::Rfc822,
        Format::Rfc822Z,
        Format::Rfc850,
        Format::Rfc1123,
        Format::Rfc1123Z,
        Format::Rfc3339,
        Format::Rfc3339Nano,
    ];

    /// Reference layout this pattern renders, as listed on each variant.
    pub const fn layout(&self) -> &'static str {
        match self {
            Format::Month => "200601",
            Format::MonthHyphen => "2006-01",
            Format::DateAbbreviated => "060102",
            Format::Date => "20060102",
            Format::DateHyphen => "2006-01-02",
            Format::DateSlash => "2006/01/02",
            Format::DateHour => "2006010215",
            Format::DateHourHyphen => "2006-01-02 15",
            Format::DateHourSlash => "2006/01/02 15",
            Format::DateRfc3339 => "2006-01-02 Z07:00",
            Format::DateTime => "20060102150405",
            Format::DateTimeHyphen => "2006-01-02 15:04:05",
            Format::DateTimeSlash => "2006/01/02 15:04:05",
            Format::Ansic => "Mon Jan _2 15:04:05 2006",
            Format::UnixDate => "Mon Jan _2 15:04:05 MST 2006",
            Format::RubyDate => "Mon Jan 02 15:04:05 -0700 2006",
            Format::Rfc822 => "02 Jan 06 15:04 MST",
            Format::Rfc822Z => "02 Jan 06 15:04 -0700",
            Format::Rfc850 => "Monday, 02-Jan-06 15:04:05 MST",
            Format::Rfc1123 => "Mon, 02 Jan 2006 15:04:05 MST",
            Format::Rfc1123Z => "Mon, 02 Jan 2006 15:04:05 -0700",
            Format::Rfc3339 => "2006-01-02T15:04:05Z07:00",
            Format::Rfc3339Nano => "2006-01-02T15:04:05.999999999Z07:00",
        }
    }

    /// chrono strftime text for the pattern, minus a trailing `Z`-or-offset
    /// suffix which has no strftime spelling (see [`Format::zulu_offset`]).
    const fn strftime(&self) -> &'static str {
        match self {
            Format::Month => "%Y%m",
            Format::MonthHyphen => "%Y-%m",
            Format::DateAbbreviated => "%y%m%d",
            Format::Date => "%Y%m%d",
            Format::DateHyphen => "%Y-%m-%d",
            Format::DateSlash => "%Y/%m/%d",
            Format::DateHour => "%Y%m%d%H",
            Format::DateHourHyphen => "%Y-%m-%d %H",
            Format::DateHourSlash => "%Y/%m/%d %H",
            Format::DateRfc3339 => "%Y-%m-%d ",
            Format::DateTime => "%Y%m%d%H%M%S",
            Format::DateTimeHyphen => "%Y-%m-%d %H:%M:%S",
            Format::DateTimeSlash => "%Y/%m/%d %H:%M:%S",
            Format::Ansic => "%a %b %e %H:%M:%S %Y",
            Format::UnixDate => "%a %b %e %H:%M:%S %Z %Y",
            Format::RubyDate => "%a %b %d %H:%M:%S %z %Y",
            Format::Rfc822 => "%d %b %y %H:%M %Z",
            Format::Rfc822Z => "%d %b %y %H:%M %z",
            Format::Rfc850 => "%A, %d-%b-%y %H:%M:%S %Z",
            Format::Rfc1123 => "%a, %d %b %Y %H:%M:%S %Z",
            Format::Rfc1123Z => "%a, %d %b %Y %H:%M:%S %z",
            Format::Rfc3339 => "%Y-%m-%dT%H:%M:%S",
            Format::Rfc3339Nano => "%Y-%m-%dT%H:%M:%S%.f",
        }
    }

    /// Patterns ending in an offset that renders UTC as `Z`.
    const fn zulu_offset(&self) -> bool {
        matches!(
            self,
            Format::DateRfc3339 | Format::Rfc3339 | Format::Rfc3339Nano
        )
    }

    /// Patterns carrying a two-digit year.
    const fn short_year(&self) -> bool {
        matches!(
            self,
            Format::DateAbbreviated | Format::Rfc822 | Format::Rfc822Z | Format::Rfc850
        )
    }

    const fn has_day(&self) -> bool {
        !matches!(self, Format::Month | Format::MonthHyphen)
    }

    const fn has_hour(&self) -> bool {
        !matches!(
            self,
            Format::Month
                | Format::MonthHyphen
                | Format::DateAbbreviated
                | Format::Date
                | Format::DateHyphen
                | Format::DateSlash
                | Format::DateRfc3339
        )
    }

    const fn has_minute(&self) -> bool {
        self.has_hour()
            && !matches!(
                self,
                Format::DateHour | Format::DateHourHyphen | Format::DateHourSlash
            )
    }

    /// The chrono format items for this pattern.
    pub fn items(&self) -> Vec<Item<'static>> {
        let mut items: Vec<Item<'static>> = StrftimeItems::new(self.strftime()).collect();
        if self.zulu_offset() {
            items.push(Item::Fixed(Fixed::TimezoneOffsetColonZ));
        }
        items
    }

    /// Parse `input` into a naive datetime, ignoring any embedded offset.
    pub(crate) fn parse_naive(&self, input: &str) -> Result<NaiveDateTime> {
        self.parse_fields(input).map_err(|source| Error::Parse {
            input: input.to_owned(),
            format: *self,
            source: Some(source),
        })
    }

    /// Like [`Format::parse_naive`], but for the two canonical patterns the
    /// input must also have the exact zero-padded shape they render: at least
    /// four year digits, two digits for every other field, no sign and no
    /// surrounding whitespace.
    pub(crate) fn parse_canonical(&self, input: &str) -> Result<NaiveDateTime> {
        let shape = match self {
            Format::DateHyphen => Some(canonical_date_regex()),
            Format::DateTimeHyphen => Some(canonical_datetime_regex()),
            _ => None,
        };
        if shape.is_some_and(|regex| !regex.is_match(input)) {
            return Err(Error::Parse {
                input: input.to_owned(),
                format: *self,
                source: None,
            });
        }
        self.parse_naive(input)
    }

    fn parse_fields(&self, input: &str) -> format::ParseResult<NaiveDateTime> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, input, self.items().iter())?;
        if self.short_year() && parsed.year_div_100().is_none() {
            // 69..=99 is the twentieth century, 00..=68 the twenty-first.
            if let Some(year) = parsed.year_mod_100() {
                parsed.set_year_div_100(if year >= 69 { 19 } else { 20 })?;
            }
        }
        if !self.has_day() {
            parsed.set_day(1)?;
        }
        if !self.has_hour() {
            parsed.set_hour(0)?;
        }
        if !self.has_minute() {
            parsed.set_minute(0)?;
        }
        // Offset 0 regardless of what the input said: civil time has no zone.
        parsed.to_naive_datetime_with_offset(0)
    }

    /// Render an instant at UTC with this pattern.
    ///
    /// Fails with [`Error::OutOfRangeDate`] when the year lies outside the
    /// range the formatting engine can represent.
    pub(crate) fn render(&self, instant: Instant) -> Result<String> {
        let naive = instant
            .to_naive()
            .ok_or_else(|| Error::out_of_range("datetime", Field::Year, instant.to_civil().year))?;
        let items = self.items();
        let mut out = String::new();
        write!(out, "{}", naive.and_utc().format_with_items(items.iter()))
            .map_err(|_| Error::out_of_range("datetime", Field::Year, instant.to_civil().year))?;
        Ok(out)
    }
}

fn canonical_date_regex() -> &'static Regex {
    static CANONICAL_DATE_REGEX: OnceLock<Regex> = OnceLock::new();

    CANONICAL_DATE_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{4,}-[0-9]{2}-[0-9]{2}$")
            .expect("could not compile canonical date regular expression")
    })
}

fn canonical_datetime_regex() -> &'static Regex {
    static CANONICAL_DATETIME_REGEX: OnceLock<Regex> = OnceLock::new();

    CANONICAL_DATETIME_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{4,}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
            .expect("could not compile canonical datetime regular expression")
    })
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layout())
    }
}
