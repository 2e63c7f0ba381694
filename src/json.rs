// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! JSON support (requires the `serde` feature).
//!
//! Zero values and invalid nullables serialize as `null`, never as
//! `"0000-00-00"`. A `null` (or a missing field in a derived struct)
//! deserializes back to the zero value. Any other JSON value must be a
//! string in canonical form.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date::Date;
use crate::datetime::Datetime;
use crate::error::{Error, Result};
use crate::nullable::{CivilValue, Nullable};

// ═══════════════════════════════════════════════════════════════════════════
// Serde impls
// ═══════════════════════════════════════════════════════════════════════════

fn serialize_canonical<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: CivilValue,
    S: Serializer,
{
    if value.is_zero() {
        serializer.serialize_none()
    } else {
        serializer.collect_str(value)
    }
}

/// Accepts `null`/absent as zero, otherwise a canonical string.
struct CanonicalVisitor<T>(PhantomData<T>);

impl<'de, T: CivilValue> Visitor<'de> for CanonicalVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "null or a {} string in canonical form", T::SUBJECT)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<T, E> {
        Ok(T::default())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<T, E> {
        Ok(T::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<T, D::Error> {
        deserializer.deserialize_str(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<T, E> {
        v.parse().map_err(E::custom)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_canonical(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_option(CanonicalVisitor(PhantomData))
    }
}

impl Serialize for Datetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_canonical(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Datetime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_option(CanonicalVisitor(PhantomData))
    }
}

impl<T: CivilValue + Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.get() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: CivilValue + Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        T::deserialize(deserializer).map(Nullable::new)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Byte-level marshal / unmarshal
// ═══════════════════════════════════════════════════════════════════════════

fn marshal<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| Error::MarshalJson {
        source: Box::new(source),
    })
}

fn unmarshal<T: CivilValue + DeserializeOwned>(data: &[u8]) -> Result<T> {
    if data.is_empty() {
        return Err(Error::UnmarshalJson {
            subject: T::SUBJECT,
            context: "payload is empty",
            source: None,
        });
    }
    serde_json::from_slice(data).map_err(|source| Error::UnmarshalJson {
        subject: T::SUBJECT,
        context: "invalid payload",
        source: Some(Box::new(source)),
    })
}

impl Date {
    /// JSON bytes: `null` when zero, `"YYYY-MM-DD"` otherwise.
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        marshal(self)
    }

    /// Overwrite `self` from JSON bytes.
    ///
    /// `null` yields the zero date. An empty payload, a non-string value or
    /// a string that is not `YYYY-MM-DD` fails with
    /// [`Error::UnmarshalJson`] and leaves `self` untouched.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        *self = unmarshal(data)?;
        Ok(())
    }
}

impl Datetime {
    /// JSON bytes: `null` when zero, `"YYYY-MM-DD HH:MM:SS"` otherwise.
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        marshal(self)
    }

    /// Overwrite `self` from JSON bytes; see [`Date::unmarshal_json`].
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        *self = unmarshal(data)?;
        Ok(())
    }
}

impl<T: CivilValue + Serialize + DeserializeOwned> Nullable<T> {
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        marshal(self)
    }

    /// Overwrite `self` from JSON bytes.
    ///
    /// An empty payload or `null` (any letter case) clears the value
    /// without error. Any other failure also clears it, and the error is
    /// returned.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() || data.eq_ignore_ascii_case(b"null") {
            self.clear();
            return Ok(());
        }
        match unmarshal::<T>(data) {
            Ok(value) => {
                *self = Nullable::new(value);
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, NullDate, NullDatetime};
    use serde_json::json;

    #[test]
    fn date_serializes_canonically() {
        assert_eq!(
            serde_json::to_value(Date::new(2020, 1, 3)).unwrap(),
            json!("2020-01-03")
        );
        assert_eq!(serde_json::to_value(Date::ZERO).unwrap(), json!(null));
        assert_eq!(Date::ZERO.marshal_json().unwrap(), b"null");
        assert_eq!(Date::new(9, 1, 3).marshal_json().unwrap(), br#""0009-01-03""#);
    }

    #[test]
    fn datetime_serializes_canonically() {
        assert_eq!(
            serde_json::to_value(Datetime::new(2020, 1, 3, 4, 5, 6)).unwrap(),
            json!("2020-01-03 04:05:06")
        );
        assert_eq!(serde_json::to_value(Datetime::ZERO).unwrap(), json!(null));
    }

    #[test]
    fn null_deserializes_to_zero() {
        let date: Date = serde_json::from_str("null").unwrap();
        assert!(date.is_zero());
        let datetime: Datetime = serde_json::from_str("null").unwrap();
        assert!(datetime.is_zero());

        let mut date = Date::new(2020, 1, 1);
        date.unmarshal_json(b"null").unwrap();
        assert_eq!(date, Date::ZERO);
    }

    #[test]
    fn unmarshal_requires_canonical_strings() {
        let mut date = Date::new(2020, 1, 1);
        for payload in [
            &b""[..],
            b"20200103",
            br#""2020/01/03""#,
            br#""2020-01-03 10:00:00""#,
            b"{}",
        ] {
            let err = date.unmarshal_json(payload).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnmarshalJson);
        }
        assert_eq!(date, Date::new(2020, 1, 1));

        date.unmarshal_json(br#""2021-02-03""#).unwrap();
        assert_eq!(date, Date::new(2021, 2, 3));

        let mut datetime = Datetime::ZERO;
        datetime.unmarshal_json(br#""2021-02-03 04:05:06""#).unwrap();
        assert_eq!(datetime, Datetime::new(2021, 2, 3, 4, 5, 6));
        assert!(datetime.unmarshal_json(br#""2021-02-03""#).is_err());
    }

    #[test]
    fn unmarshal_rejects_unpadded_and_signed_text() {
        let mut date = Date::new(2020, 1, 1);
        for payload in [
            &br#""2020-1-3""#[..],
            br#"" 2020-01-03""#,
            br#""+2020-01-03""#,
            br#""12-01-03""#,
        ] {
            let err = date.unmarshal_json(payload).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnmarshalJson);
        }
        assert_eq!(date, Date::new(2020, 1, 1));

        let mut datetime = Datetime::new(2020, 1, 1, 0, 0, 0);
        let err = datetime.unmarshal_json(br#""2020-1-3 1:2:3""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmarshalJson);
        assert_eq!(datetime, Datetime::new(2020, 1, 1, 0, 0, 0));

        let mut value = NullDate::from_ymd(2020, 1, 3);
        assert!(value.unmarshal_json(br#""2020-1-3""#).is_err());
        assert!(!value.is_valid());
    }

    #[test]
    fn empty_payload_has_no_source() {
        use std::error::Error as _;
        let mut date = Date::ZERO;
        let err = date.unmarshal_json(b"").unwrap_err();
        assert!(err.source().is_none());
        let err = date.unmarshal_json(b"1").unwrap_err();
        assert!(err.source().is_some());
    }

    #[test]
    fn nullable_json() {
        assert_eq!(NullDate::from_ymd(2020, 1, 3).marshal_json().unwrap(), br#""2020-01-03""#);
        assert_eq!(NullDate::null().marshal_json().unwrap(), b"null");
        assert_eq!(
            serde_json::to_value(NullDatetime::from_ymd_hms(2020, 1, 3, 4, 5, 6)).unwrap(),
            json!("2020-01-03 04:05:06")
        );

        let mut value = NullDate::from_ymd(2020, 1, 3);
        value.unmarshal_json(b"NULL").unwrap();
        assert!(!value.is_valid());
        value.unmarshal_json(br#""2020-05-06""#).unwrap();
        assert_eq!(value.get(), Some(Date::new(2020, 5, 6)));
        value.unmarshal_json(b"").unwrap();
        assert!(!value.is_valid());

        value.unmarshal_json(br#""2020-05-06""#).unwrap();
        let err = value.unmarshal_json(br#""bogus""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmarshalJson);
        assert!(!value.is_valid());
        assert_eq!(value.value(), Date::ZERO);
    }

    #[test]
    fn nullable_deserialize_from_null() {
        let value: NullDatetime = serde_json::from_str("null").unwrap();
        assert!(!value.is_valid());
        let value: NullDatetime = serde_json::from_str(r#""2020-01-03 04:05:06""#).unwrap();
        assert!(value.is_valid());
    }
}
