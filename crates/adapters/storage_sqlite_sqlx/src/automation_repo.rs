//! `SQLite` implementation of [`AutomationRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hubdesk_app::ports::AutomationRepository;
use hubdesk_domain::automation::Automation;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::id::AutomationId;

use crate::codec::{format_timestamp, get_id, get_json, get_timestamp};
use crate::error::{Op, Table};

struct Wrapper(Automation);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Automation> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Automation {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            hub: row.try_get("hub")?,
            directives: get_json(row, "directives")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        }))
    }
}

/// `SQLite`-backed automation repository.
#[derive(Clone)]
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, automation: Automation) -> Result<Automation, HubdeskError> {
        let directives = serde_json::to_string(&automation.directives)
            .map_err(Table::Automations.encoding("directives"))?;

        sqlx::query(
                "INSERT INTO automations (id, name, hub, directives, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(automation.id.to_string())
            .bind(&automation.name)
            .bind(&automation.hub)
            .bind(&directives)
            .bind(format_timestamp(&automation.created_at))
            .bind(format_timestamp(&automation.updated_at))
            .execute(&self.pool)
            .await
            .map_err(Table::Automations.failed(Op::Insert))?;

        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, HubdeskError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM automations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Table::Automations.failed(Op::Select))?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Automation>, HubdeskError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM automations ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(Table::Automations.failed(Op::Select))?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, automation: Automation) -> Result<Automation, HubdeskError> {
        let directives = serde_json::to_string(&automation.directives)
            .map_err(Table::Automations.encoding("directives"))?;

        sqlx::query(
                "UPDATE automations SET name = ?, hub = ?, directives = ?, updated_at = ? WHERE id = ?",
            )
            .bind(&automation.name)
            .bind(&automation.hub)
            .bind(&directives)
            .bind(format_timestamp(&automation.updated_at))
            .bind(automation.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Automations.failed(Op::Update))?;

        Ok(automation)
    }

    async fn delete(&self, id: AutomationId) -> Result<(), HubdeskError> {
        sqlx::query("DELETE FROM automations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Table::Automations.failed(Op::Delete))?;
        Ok(())
    }
}
