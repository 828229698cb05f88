//! # hubdesk-adapter-virtual
//!
//! In-process stand-ins for the outside world, used by `hubdeskd` and the
//! end-to-end tests.
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`VirtualHubGateway`] | `HubGateway` | Applies settings to simulated devices, serves one firmware catalog, hubs can be taken offline |
//! | [`LogNotifier`] | `AccountNotifier` | Logs issued resets, optionally keeping them in an outbox |
//!
//! ## Dependency rule
//!
//! Depends on `hubdesk-app` (port traits) and `hubdesk-domain` only.

mod gateway;
mod notifier;

pub use gateway::{APPLIED_CAPACITY, DeliveredCommand, GatewayError, VirtualHubGateway};
pub use notifier::{LogNotifier, ResetNotice};
