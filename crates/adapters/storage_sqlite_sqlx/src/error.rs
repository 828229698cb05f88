//! Storage errors, labelled with the hubdesk table and operation that failed.

use std::fmt;

use hubdesk_domain::error::HubdeskError;

/// Tables owned by this adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Sessions,
    Hubs,
    Devices,
    DeviceGroups,
    Automations,
}

impl Table {
    /// Name as it appears in the schema.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Sessions => "sessions",
            Self::Hubs => "hubs",
            Self::Devices => "devices",
            Self::DeviceGroups => "device_groups",
            Self::Automations => "automations",
        }
    }

    /// Wrap a failed `op` on this table.
    pub(crate) fn failed(self, op: Op) -> impl FnOnce(sqlx::Error) -> StorageError {
        move |source| StorageError::Query {
            table: self,
            op,
            source,
        }
    }

    /// Wrap a failure to encode the JSON list stored in `column`.
    pub(crate) fn encoding(
        self,
        column: &'static str,
    ) -> impl FnOnce(serde_json::Error) -> StorageError {
        move |source| StorageError::Encode {
            table: self,
            column,
            source,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of statement a repository ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    Select,
    Update,
    Delete,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "insert into",
            Self::Select => "select from",
            Self::Update => "update",
            Self::Delete => "delete from",
        })
    }
}

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Opening the pool failed.
    #[error("could not open database")]
    Connect(#[from] sqlx::Error),

    /// Applying the embedded schema failed.
    #[error("schema migration failed")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A repository statement failed.
    #[error("{op} {table} failed")]
    Query {
        table: Table,
        op: Op,
        #[source]
        source: sqlx::Error,
    },

    /// A membership list could not be written as JSON.
    #[error("could not encode {table}.{column}")]
    Encode {
        table: Table,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for HubdeskError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
