//! `SQLite` implementation of [`DeviceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hubdesk_app::ports::DeviceRepository;
use hubdesk_domain::device::{Device, DeviceStatus, DeviceType};
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::id::DeviceId;

use crate::codec::{format_timestamp, get_id, get_json, get_timestamp};
use crate::error::{Op, Table};

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let device_type: String = row.try_get("device_type")?;

        Ok(Self(Device {
            id: get_id(row, "id")?,
            address: row.try_get("address")?,
            hub: row.try_get("hub")?,
            groups: get_json(row, "group_names")?,
            status: DeviceStatus::from(status),
            device_type: DeviceType::from(device_type),
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO devices (id, address, hub, group_names, status, device_type, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_BY_HUB: &str = "SELECT * FROM devices WHERE hub = ? ORDER BY rowid";
const UPDATE: &str = "UPDATE devices SET address = ?, hub = ?, group_names = ?, status = ?, device_type = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device, HubdeskError> {
        let groups = serde_json::to_string(&device.groups)
            .map_err(Table::Devices.encoding("groups"))?;

        sqlx::query(INSERT)
            .bind(device.id.to_string())
            .bind(&device.address)
            .bind(&device.hub)
            .bind(&groups)
            .bind(device.status.as_str())
            .bind(device.device_type.as_str())
            .bind(format_timestamp(&device.created_at))
            .bind(format_timestamp(&device.updated_at))
            .execute(&self.pool)
            .await
            .map_err(Table::Devices.failed(Op::Insert))?;

        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, HubdeskError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::Devices.failed(Op::Select))?;
        Ok(Wrapper::maybe(row))
    }

    async fn find_by_hub(&self, hub: &str) -> Result<Vec<Device>, HubdeskError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_HUB)
            .bind(hub)
            .fetch_all(&self.pool)
            .await
            .map_err(Table::Devices.failed(Op::Select))?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, device: Device) -> Result<Device, HubdeskError> {
        let groups = serde_json::to_string(&device.groups)
            .map_err(Table::Devices.encoding("groups"))?;

        sqlx::query(UPDATE)
            .bind(&device.address)
            .bind(&device.hub)
            .bind(&groups)
            .bind(device.status.as_str())
            .bind(device.device_type.as_str())
            .bind(format_timestamp(&device.updated_at))
            .bind(device.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Devices.failed(Op::Update))?;

        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), HubdeskError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Devices.failed(Op::Delete))?;
        Ok(())
    }
}
