// ── Entity generators ──
//
// Stateless builders for each layer of a topology. Every draw goes
// through the caller's `GenerationRng`.

pub mod catalog;
pub mod client;
pub mod client_catalog;
pub mod device;
pub mod network;
pub mod plan;

pub use client::{ClientGenerator, ClientVlan, NetworkClients};
pub use device::{DeviceGenerator, DevicePlacement, MAX_DEVICES_PER_NETWORK, NetworkDevices};
pub use network::{DEFAULT_DASHBOARD_URL, NetworkGenerator, VlanType};
pub use plan::{DeviceGroup, DevicePlan, SingleDevice, SiteKind};
