// ── Domain model ──
//
// Plain records shaped like Dashboard API responses. Field names are
// camelCase on the wire; everything here is produced once per generation
// run and never mutated afterwards.

pub mod client;
pub mod device;
pub mod mac;
pub mod network;
pub mod organization;
pub mod topology;
pub mod vlan;
pub mod vpn;

pub use client::{ClientStatus, ConnectionType, DeviceClient, DeviceClientUsage, NetworkClient, Usage};
pub use device::{
    AvailabilityNetwork, AvailabilityStatus, Device, DeviceAvailability, DeviceStatus, PoeBudget,
    PowerSupply, ProductType, StatusComponents,
};
pub use mac::MacAddress;
pub use network::Network;
pub use organization::Organization;
pub use topology::{Topology, TopologyStats};
pub use vlan::{DhcpHandling, Toggle, Vlan, VlanNameEntry, VlanProfile};
pub use vpn::{CellularSubnet, CellularSubnetPool, VpnConfig, VpnHub, VpnMode, VpnSubnet};
