use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Fixed target offset: UTC+5:30 (IST), no daylight-saving rules.
pub const MARKET_OFFSET: UtcOffset = offset!(+5:30);

const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// RFC3339 timestamp pinned to the fixed market offset.
///
/// Because the offset never varies, the stored text form sorts
/// lexicographically in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarketTimestamp(OffsetDateTime);

impl MarketTimestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().to_offset(MARKET_OFFSET))
    }

    /// Convert a provider unix timestamp (seconds) to market time.
    ///
    /// Values whose converted year falls outside 0..=9999 are rejected; the
    /// RFC3339 stored form cannot carry them.
    pub fn from_unix(seconds: i64) -> Result<Self, ValidationError> {
        let value = OffsetDateTime::from_unix_timestamp(seconds)
            .map_err(|_| ValidationError::TimestampOutOfRange { value: seconds })?
            .to_offset(MARKET_OFFSET);
        if !(0..=9999).contains(&value.year()) {
            return Err(ValidationError::TimestampOutOfRange { value: seconds });
        }
        Ok(Self(value))
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed =
            OffsetDateTime::parse(input, &Rfc3339).map_err(|_| ValidationError::TimestampUnparsable {
                value: input.to_owned(),
            })?;
        Ok(Self(parsed.to_offset(MARKET_OFFSET)))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// Stored/wire form.
    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("market timestamp must be RFC3339 formattable")
    }

    /// Seconds-precision human form used by the snapshot report.
    pub fn format_display(self) -> String {
        let body = self
            .0
            .format(DISPLAY_FORMAT)
            .expect("market timestamp must be display formattable");
        format!("{body} +05:30")
    }
}

impl Display for MarketTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for MarketTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for MarketTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Source of "now" for report headers, injectable so tests run with a fixed
/// clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> MarketTimestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> MarketTimestamp {
        MarketTimestamp::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(MarketTimestamp);

impl FixedClock {
    pub fn new(at: MarketTimestamp) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> MarketTimestamp {
        self.0
    }
}
