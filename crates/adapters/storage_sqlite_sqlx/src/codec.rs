//! Column encoding shared by the repositories.
//!
//! Ids are stored as hyphenated UUID text, timestamps as RFC 3339 text and
//! lists as JSON text.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use hubdesk_domain::time::Timestamp;

pub(crate) fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

pub(crate) fn get_id<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    T::from_str(&raw).map_err(decode_err)
}

pub(crate) fn get_timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_timestamp(&raw)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.to_utc())
        .map_err(decode_err)
}

pub(crate) fn get_json<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: serde::de::DeserializeOwned,
{
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(decode_err)
}

pub(crate) fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339()
}
