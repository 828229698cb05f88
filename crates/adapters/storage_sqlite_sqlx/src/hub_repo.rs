//! `SQLite` implementation of [`HubRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hubdesk_app::ports::HubRepository;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::hub::Hub;
use hubdesk_domain::id::{HubId, UserId};

use crate::codec::{decode_err, format_timestamp, get_id, get_timestamp};
use crate::error::{Op, Table};

/// Wrapper for converting database rows into domain [`Hub`].
struct Wrapper(Hub);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Hub> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let owner: Option<String> = row.try_get("owner_id")?;
        let owner = owner
            .map(|raw| raw.parse::<UserId>())
            .transpose()
            .map_err(decode_err)?;

        Ok(Self(Hub {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            owner,
            firmware_version: row.try_get("firmware_version")?,
            created_at: get_timestamp(row, "created_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO hubs (id, name, address, owner_id, firmware_version, created_at) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM hubs WHERE id = ?";
const SELECT_BY_NAME: &str = "SELECT * FROM hubs WHERE name = ?";
const SELECT_ALL: &str = "SELECT * FROM hubs ORDER BY rowid";
const SELECT_BY_OWNER: &str = "SELECT * FROM hubs WHERE owner_id = ? ORDER BY rowid";
const UPDATE: &str =
    "UPDATE hubs SET name = ?, address = ?, owner_id = ?, firmware_version = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM hubs WHERE id = ?";

/// `SQLite`-backed hub repository.
#[derive(Clone)]
pub struct SqliteHubRepository {
    pool: SqlitePool,
}

impl SqliteHubRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HubRepository for SqliteHubRepository {
    async fn create(&self, hub: Hub) -> Result<Hub, HubdeskError> {
        sqlx::query(INSERT)
            .bind(hub.id.to_string())
            .bind(&hub.name)
            .bind(&hub.address)
            .bind(hub.owner.map(|id| id.to_string()))
            .bind(&hub.firmware_version)
            .bind(format_timestamp(&hub.created_at))
            .execute(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Insert))?;
        Ok(hub)
    }

    async fn get_by_id(&self, id: HubId) -> Result<Option<Hub>, HubdeskError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Select))?;
        Ok(Wrapper::maybe(row))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Hub>, HubdeskError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Select))?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Hub>, HubdeskError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Select))?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Hub>, HubdeskError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_OWNER)
            .bind(owner.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Select))?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, hub: Hub) -> Result<Hub, HubdeskError> {
        sqlx::query(UPDATE)
            .bind(&hub.name)
            .bind(&hub.address)
            .bind(hub.owner.map(|id| id.to_string()))
            .bind(&hub.firmware_version)
            .bind(hub.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Update))?;
        Ok(hub)
    }

    async fn delete(&self, id: HubId) -> Result<(), HubdeskError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Hubs.failed(Op::Delete))?;
        Ok(())
    }
}
