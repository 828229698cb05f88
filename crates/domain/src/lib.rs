//! # hubdesk-domain
//!
//! Pure domain model for the hubdesk device-management backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** (account holders, the root of hub ownership)
//! - Define **Hubs** (physical coordinators that devices attach to)
//! - Define **Devices** (addressable endpoints belonging to exactly one hub)
//! - Define **Groups** (named lists of device references)
//! - Define **Automations** (named lists of device/setting directives)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

mod macros;

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod device;
pub mod group;
pub mod hub;
pub mod user;
