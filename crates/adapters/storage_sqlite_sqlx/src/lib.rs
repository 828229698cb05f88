//! # hubdesk-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `hubdesk-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Membership lists (device groups, group members, automation directives)
//! are stored as JSON text columns.
//!
//! ## Dependency rule
//! Depends on `hubdesk-app` (for port traits) and `hubdesk-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod automation_repo;
mod codec;
mod device_repo;
mod error;
mod group_repo;
mod hub_repo;
mod pool;
mod user_repo;

pub use automation_repo::SqliteAutomationRepository;
pub use device_repo::SqliteDeviceRepository;
pub use error::{Op, StorageError, Table};
pub use group_repo::SqliteGroupRepository;
pub use hub_repo::SqliteHubRepository;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
