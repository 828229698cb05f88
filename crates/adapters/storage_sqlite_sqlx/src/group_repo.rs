//! `SQLite` implementation of [`GroupRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hubdesk_app::ports::GroupRepository;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::group::Group;
use hubdesk_domain::id::GroupId;

use crate::codec::{format_timestamp, get_id, get_json, get_timestamp};
use crate::error::{Op, Table};

struct Wrapper(Group);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Group> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Group {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            devices: get_json(row, "devices")?,
            created_at: get_timestamp(row, "created_at")?,
        }))
    }
}

/// `SQLite`-backed group repository. Members are a JSON array of device ids.
#[derive(Clone)]
pub struct SqliteGroupRepository {
    pool: SqlitePool,
}

impl SqliteGroupRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl GroupRepository for SqliteGroupRepository {
    async fn create(&self, group: Group) -> Result<Group, HubdeskError> {
        let devices = serde_json::to_string(&group.devices)
            .map_err(Table::DeviceGroups.encoding("devices"))?;

        sqlx::query(
            "INSERT INTO device_groups (id, name, devices, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(group.id.to_string())
        .bind(&group.name)
        .bind(&devices)
        .bind(format_timestamp(&group.created_at))
        .execute(&self.pool)
        .await
        .map_err(Table::DeviceGroups.failed(Op::Insert))?;

        Ok(group)
    }

    async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, HubdeskError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM device_groups WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::DeviceGroups.failed(Op::Select))?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Group>, HubdeskError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM device_groups ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(Table::DeviceGroups.failed(Op::Select))?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, group: Group) -> Result<Group, HubdeskError> {
        let devices = serde_json::to_string(&group.devices)
            .map_err(Table::DeviceGroups.encoding("devices"))?;

        sqlx::query("UPDATE device_groups SET name = ?, devices = ? WHERE id = ?")
            .bind(&group.name)
            .bind(&devices)
            .bind(group.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::DeviceGroups.failed(Op::Update))?;

        Ok(group)
    }

    async fn delete(&self, id: GroupId) -> Result<(), HubdeskError> {
        sqlx::query("DELETE FROM device_groups WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::DeviceGroups.failed(Op::Delete))?;
        Ok(())
    }
}
