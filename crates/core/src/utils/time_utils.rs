//! Timestamp helpers shared by the ledger and valuation services.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::constants::TRANSACTION_TIME_FORMAT;
use crate::errors::{Result, ValidationError};

/// Truncates an instant to minute precision. Ledger timestamps are stored to
/// the minute; sub-minute detail would break same-instant mark matching.
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Parses a naive wall-clock reading in the engine wire format
/// ("2019-01-02 09:30").
pub fn parse_transaction_time(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TRANSACTION_TIME_FORMAT)
        .map_err(|e| ValidationError::DateTimeParse(e).into())
}

/// Resolves a naive wall-clock reading in `tz` to a UTC instant.
///
/// Ambiguous local times (the DST fold) resolve to the earlier instant;
/// non-existent local times (the DST gap) are rejected.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(ValidationError::InvalidInput(format!(
            "local time {} does not exist in {}",
            naive, tz
        ))
        .into()),
    }
}
