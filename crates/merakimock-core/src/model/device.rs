// ── Device domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::mac::MacAddress;

/// Dashboard product classification of a physical device.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProductType {
    Appliance,
    Switch,
    Wireless,
    CellularGateway,
    Camera,
    Sensor,
}

impl ProductType {
    /// Serial prefix used by the Dashboard for this product family.
    pub fn serial_prefix(self) -> &'static str {
        match self {
            Self::Sensor => "Q3",
            _ => "Q2",
        }
    }
}

/// A managed device. Identity is the serial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    pub name: String,
    pub mac: MacAddress,
    pub network_id: String,
    pub organization_id: String,
    pub model: String,
    pub product_type: ProductType,
    pub firmware: String,
    pub lan_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan1_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan2_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    pub tags: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub notes: Option<String>,
    pub url: String,
    pub configuration_updated_at: String,
    pub details: Vec<serde_json::Value>,
}

// ── Availability / status ───────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AvailabilityStatus {
    Online,
    Alerting,
    Offline,
    Dormant,
}

/// Organization-level device availability entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAvailability {
    pub serial: String,
    pub name: String,
    pub mac: MacAddress,
    pub network: AvailabilityNetwork,
    pub product_type: ProductType,
    pub status: AvailabilityStatus,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityNetwork {
    pub id: String,
}

/// Organization-level device status entry, the richer sibling of
/// [`DeviceAvailability`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub name: String,
    pub serial: String,
    pub mac: MacAddress,
    pub public_ip: Option<String>,
    pub network_id: String,
    pub status: AvailabilityStatus,
    pub last_reported_at: String,
    pub lan_ip: String,
    pub gateway: String,
    pub ip_type: String,
    pub primary_dns: String,
    pub secondary_dns: String,
    pub product_type: ProductType,
    pub model: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<StatusComponents>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusComponents {
    pub power_supplies: Vec<PowerSupply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSupply {
    pub slot: u8,
    pub serial: String,
    pub model: String,
    pub status: String,
    pub poe: PoeBudget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoeBudget {
    pub unit: String,
    pub maximum: u32,
}
