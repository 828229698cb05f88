//! Hub gateway port — talking to a physical hub.
//!
//! The wire protocol between the backend and a hub lives entirely in the
//! adapter. The application only needs two things from it: deliver a
//! setting to a device, and report the newest firmware for a hub.

use std::future::Future;

use hubdesk_domain::automation::Setting;
use hubdesk_domain::device::Device;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::hub::Hub;

/// Outbound connection to hubs.
pub trait HubGateway {
    /// Ask `hub` to apply `setting` to `device`.
    ///
    /// An error means this one command was not delivered.
    fn send_command(
        &self,
        hub: &Hub,
        device: &Device,
        setting: &Setting,
    ) -> impl Future<Output = Result<(), HubdeskError>> + Send;

    /// Newest firmware version published for `hub`.
    fn latest_firmware(&self, hub: &Hub)
    -> impl Future<Output = Result<String, HubdeskError>> + Send;
}
