// ── Client domain types ──
//
// The Dashboard reports the same client twice: once per network with the
// full field set, once per device with a reduced set and usage in
// kilobytes. Both shapes live here.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::mac::MacAddress;

/// How a client reached the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ConnectionType {
    Wired,
    Wireless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ClientStatus {
    Online,
    Offline,
}

/// Traffic totals in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub sent: u64,
    pub recv: u64,
    pub total: u64,
}

impl Usage {
    pub fn new(sent: u64, recv: u64) -> Self {
        Self {
            sent,
            recv,
            total: sent + recv,
        }
    }
}

/// Traffic totals in kilobytes, as the per-device endpoint reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClientUsage {
    pub sent: u64,
    pub recv: u64,
}

impl From<Usage> for DeviceClientUsage {
    fn from(usage: Usage) -> Self {
        Self {
            sent: usage.sent / 1000,
            recv: usage.recv / 1000,
        }
    }
}

/// Network-scoped client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkClient {
    pub id: String,
    pub network_id: String,
    pub mac: MacAddress,
    pub ip: String,
    pub ip6: Option<String>,
    pub ip6_local: Option<String>,
    pub description: String,
    pub first_seen: String,
    pub last_seen: String,
    pub manufacturer: String,
    pub os: String,
    pub device_type_prediction: String,
    pub user: Option<String>,
    pub vlan: String,
    pub named_vlan: String,
    pub ssid: Option<String>,
    pub switchport: Option<String>,
    pub wireless_capabilities: Option<String>,
    pub sm_installed: bool,
    pub recent_device_serial: Option<String>,
    pub recent_device_name: Option<String>,
    pub recent_device_mac: Option<MacAddress>,
    pub recent_device_connection: ConnectionType,
    pub notes: Option<String>,
    pub group_policy_8021x: Option<String>,
    pub adaptive_policy_group: Option<String>,
    pub psk_group: Option<String>,
    pub status: ClientStatus,
    pub usage: Usage,
}

/// Device-scoped client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClient {
    pub id: String,
    pub mac: MacAddress,
    pub description: String,
    pub mdns_name: String,
    pub dhcp_hostname: String,
    pub user: Option<String>,
    pub ip: String,
    pub vlan: String,
    pub named_vlan: String,
    pub switchport: Option<String>,
    pub adaptive_policy_group: Option<String>,
    pub usage: DeviceClientUsage,
}

impl From<&NetworkClient> for DeviceClient {
    fn from(client: &NetworkClient) -> Self {
        Self {
            id: client.id.clone(),
            mac: client.mac.clone(),
            description: client.description.clone(),
            mdns_name: client.description.clone(),
            dhcp_hostname: dhcp_hostname(&client.description),
            user: client.user.clone(),
            ip: client.ip.clone(),
            vlan: client.vlan.clone(),
            named_vlan: client.named_vlan.clone(),
            switchport: client.switchport.clone(),
            adaptive_policy_group: client.adaptive_policy_group.clone(),
            usage: client.usage.into(),
        }
    }
}

/// NetBIOS-style hostname: dashes removed, upper-cased, at most 15 chars.
fn dhcp_hostname(description: &str) -> String {
    description
        .chars()
        .filter(|&c| c != '-')
        .flat_map(char::to_uppercase)
        .take(15)
        .collect()
}
