use std::fmt;

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Unix timestamp with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimestampMs(i64);

impl TimestampMs {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_inner(inner: i64) -> Self {
        Self(inner)
    }

    pub const fn into_inner(self) -> i64 {
        self.0
    }

    pub const fn from_milliseconds(milliseconds: i64) -> Self {
        Self(milliseconds)
    }

    pub const fn into_milliseconds(self) -> i64 {
        self.0
    }

    pub const fn into_seconds(self) -> i64 {
        self.0 / 1000
    }
}

impl From<OffsetDateTime> for TimestampMs {
    fn from(from: OffsetDateTime) -> Self {
        Self((from.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl TryFrom<TimestampMs> for OffsetDateTime {
    type Error = time::error::ComponentRange;

    fn try_from(from: TimestampMs) -> Result<Self, Self::Error> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(from.0) * 1_000_000)
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match OffsetDateTime::try_from(*self).map(|dt| dt.format(&Rfc3339)) {
            Ok(Ok(formatted)) => f.write_str(&formatted),
            _ => write!(f, "{}ms", self.0),
        }
    }
}
