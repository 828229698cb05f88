//! # hubdesk-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HubRepository`, `DeviceRepository`, `GroupRepository`,
//!     `AutomationRepository` — CRUD for the device-management records
//!   - `UserRepository` — accounts and login sessions
//!   - `HubGateway` — command delivery and firmware lookup on a hub
//!   - `AccountNotifier` — out-of-band delivery of password-reset tokens
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HubService`, `DeviceService`, `GroupService`, `AutomationService`
//!   - `AccountService` — signup, login, sessions, profile
//! - Enforce the shared controller contract: validate input, look up every
//!   referenced record, then perform a single store write
//!
//! ## Dependency rule
//! Depends on `hubdesk-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
