//! Time and timestamp helpers.

use chrono::{DateTime, Duration, Utc};

/// UTC timestamp used for `createdAt`, `updatedAt` and token expiry.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the instant `minutes` from now.
#[must_use]
pub fn minutes_from_now(minutes: i64) -> Timestamp {
    now() + Duration::minutes(minutes)
}
