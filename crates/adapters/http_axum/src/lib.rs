//! # hubdesk-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** for hubs, devices, groups, automations
//!   and user accounts (`/hubs/add`, `/devices/{deviceID}`, `/automations/send`, …)
//! - Resolve `Authorization: Bearer <token>` headers into sessions
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `hubdesk-app` (for port traits and services) and `hubdesk-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
