//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod account_service;
pub mod automation_service;
pub mod device_service;
pub mod group_service;
pub mod hub_service;

#[cfg(test)]
pub(crate) mod fakes;
