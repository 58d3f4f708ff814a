//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{format_description::well_known::Rfc3339, UtcOffset};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// Any UTC offset is accepted and normalized to UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        time::OffsetDateTime::parse(input, &Rfc3339)
            .map(Into::into)
            .map_err(ParseError)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Drops the sub-second part of this [`DateTime`].
    #[must_use]
    pub fn truncate_subsec(self) -> Self {
        Self {
            inner: self.inner.replace_nanosecond(0).unwrap_or(self.inner),
            _of: PhantomData,
        }
    }

    /// Returns this [`DateTime`] as seen at the provided [`UtcOffset`].
    #[must_use]
    pub fn to_offset(&self, offset: UtcOffset) -> time::OffsetDateTime {
        self.inner.to_offset(offset)
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
#[display("invalid RFC 3339 date and time: {_0}")]
pub struct ParseError(time::error::Parse);

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

impl<Of: ?Sized> From<time::OffsetDateTime> for DateTimeOf<Of> {
    fn from(dt: time::OffsetDateTime) -> Self {
        Self {
            inner: dt.to_offset(UtcOffset::UTC),
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::DateTimeOf;

    pub mod rfc3339 {
        //! Module providing serialization and deserialization of [`DateTimeOf`]
        //! as an [RFC 3339] string.
        //!
        //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as an [RFC 3339] string.
        ///
        /// # Errors
        ///
        /// Never errors on its own, only propagates `serializer` errors.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_str(&dt.to_rfc3339())
        }

        /// Deserializes an [RFC 3339] string into a [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the string is not a valid [RFC 3339] date and
        /// time.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            let s = String::deserialize(deserializer)?;
            DateTimeOf::from_rfc3339(&s).map_err(Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{macros::offset, UtcOffset};

    use super::DateTime;

    #[test]
    fn parses_offsets_into_utc() {
        let dt = DateTime::from_rfc3339("2023-03-16T23:41:52+02:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2023-03-16T21:41:52Z");
        assert_eq!(
            dt,
            DateTime::from_rfc3339("2023-03-16T21:41:52+00:00").unwrap(),
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(DateTime::from_rfc3339("16/03/2023 21:41").is_err());
        assert!(DateTime::from_rfc3339("2023-03-16T21:41:52").is_err());
    }

    #[test]
    fn truncates_subseconds() {
        let dt = DateTime::from_rfc3339("2023-03-16T21:41:52.123456Z")
            .unwrap()
            .truncate_subsec();

        assert_eq!(dt.to_rfc3339(), "2023-03-16T21:41:52Z");
    }

    #[test]
    fn converts_to_offset() {
        let dt = DateTime::from_rfc3339("2023-03-16T21:41:52Z").unwrap();

        assert_eq!(dt.to_offset(UtcOffset::UTC).hour(), 21);
        assert_eq!(dt.to_offset(offset!(+1)).hour(), 22);
        assert_eq!(dt.to_offset(offset!(-5)).hour(), 16);
    }
}
