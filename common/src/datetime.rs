//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
    PrimitiveDateTime,
};

/// Human-readable date and time format used in persisted documents.
const HUMAN_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// Date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time in
    /// UTC.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] representing the current date and time in
    /// the local timezone.
    ///
    /// Falls back to UTC whenever the local UTC offset cannot be determined
    /// (which may happen in multi-threaded processes).
    #[must_use]
    pub fn now_local() -> Self {
        Self {
            inner: time::OffsetDateTime::now_local()
                .unwrap_or_else(|_| time::OffsetDateTime::now_utc()),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided `YYYY-MM-DD HH:MM:SS`
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match the format.
    pub fn from_human(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            inner: PrimitiveDateTime::parse(input, HUMAN_FORMAT)
                .map_err(ParseError::Parse)?
                .assume_utc(),
            _of: PhantomData,
        })
    }

    /// Returns the [`DateTime`] as an `YYYY-MM-DD HH:MM:SS` string.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_human(&self) -> String {
        self.inner.format(HUMAN_FORMAT).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as human-readable: {e}")
        })
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::DateTimeOf;

    pub mod human {
        //! Module providing serialization and deserialization of
        //! [`DateTimeOf`] as an `YYYY-MM-DD HH:MM:SS` string.

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as an `YYYY-MM-DD HH:MM:SS` string.
        ///
        /// # Errors
        ///
        /// Never errors.
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_str(&dt.to_human())
        }

        /// Deserializes an `YYYY-MM-DD HH:MM:SS` string into a
        /// [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the string doesn't match the format.
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            DateTimeOf::from_human(&String::deserialize(deserializer)?)
                .map_err(Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    #[test]
    fn formats_human() {
        let dt = DateTime::from_human("2024-05-17 09:03:41").unwrap();
        assert_eq!(dt.to_human(), "2024-05-17 09:03:41");
    }

    #[test]
    fn rejects_malformed_human() {
        assert!(DateTime::from_human("17/05/2024").is_err());
        assert!(DateTime::from_human("2024-05-17T09:03:41Z").is_err());
        assert!(DateTime::from_human("").is_err());
    }

    #[test]
    fn now_roundtrips_through_human() {
        let now = DateTime::now();
        let parsed = DateTime::from_human(&now.to_human()).unwrap();
        assert_eq!(parsed.to_human(), now.to_human());
    }
}
