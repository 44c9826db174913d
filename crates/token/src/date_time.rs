//! UTC date and time for token issued times.
//!
//! Issued times travel as RFC 3339 strings with second
//! precision and a `Z` offset, for example `2024-05-01T09:30:00Z`.

use crate::Result;
use std::fmt;
use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

/// Date and time in UTC.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    /// Create a UTC date time for now truncated to the second.
    pub fn now() -> Result<Self> {
        Ok(Self(OffsetDateTime::now_utc().replace_nanosecond(0)?))
    }

    /// Parse as RFC3339 and normalize to UTC.
    pub fn parse_rfc3339(value: &str) -> Result<Self> {
        let datetime = OffsetDateTime::parse(value, &Rfc3339)?;
        Ok(Self(datetime.to_offset(time::UtcOffset::UTC)))
    }

    /// Convert this date and time to a RFC3339 formatted string.
    pub fn to_rfc3339(&self) -> Result<String> {
        Ok(self.0.format(&Rfc3339)?)
    }

    /// Unix timestamp in seconds.
    pub fn unix_timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Determine if this time is older than `max_age_seconds`
    /// relative to `now`.
    ///
    /// An age that reaches outside the representable range
    /// never makes a time stale.
    pub fn is_older_than(&self, max_age_seconds: i64, now: &Self) -> bool {
        match now.0.checked_sub(Duration::seconds(max_age_seconds)) {
            Some(oldest) => self.0 < oldest,
            None => false,
        }
    }
}

impl fmt::Display for UtcDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(value) => write!(f, "{}", value),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl TryFrom<OffsetDateTime> for UtcDateTime {
    type Error = crate::Error;

    fn try_from(value: OffsetDateTime) -> Result<Self> {
        Ok(Self(
            value.to_offset(time::UtcOffset::UTC).replace_nanosecond(0)?,
        ))
    }
}

impl From<UtcDateTime> for OffsetDateTime {
    fn from(value: UtcDateTime) -> Self {
        value.0
    }
}
