// ── DeviceGenerator ──
//
// Devices, availabilities and statuses for one network. LAN addresses come
// from a network-scoped octet plus a device index shared by every product
// family, so no two devices of a network collide.

use tracing::debug;

use super::catalog::{self, Location, UNKNOWN_FIRMWARE};
use super::network::DEFAULT_DASHBOARD_URL;
use super::plan::{DeviceGroup, DevicePlan, SingleDevice};
use crate::model::vlan::subnet_base;
use crate::model::{
    AvailabilityNetwork, AvailabilityStatus, Device, DeviceAvailability, DeviceStatus, MacAddress,
    PoeBudget, PowerSupply, ProductType, StatusComponents,
};
use crate::rng::{GenerationRng, format_timestamp};

/// Cisco Meraki OUI used for every generated device MAC.
pub const MERAKI_OUI: &str = "00:18:0A";

const DEGRADED_STATUSES: [AvailabilityStatus; 3] = [
    AvailabilityStatus::Alerting,
    AvailabilityStatus::Offline,
    AvailabilityStatus::Dormant,
];

/// Where the devices of one network live.
#[derive(Debug, Clone, Copy)]
pub struct DevicePlacement<'a> {
    pub network_id: &'a str,
    pub organization_id: &'a str,
    pub location: &'a Location,
    /// Second octet of every LAN address in the network.
    pub network_octet: u8,
}

/// Output of [`DeviceGenerator::generate_devices_for_network`], index-aligned.
#[derive(Debug, Clone, Default)]
pub struct NetworkDevices {
    pub devices: Vec<Device>,
    pub availabilities: Vec<DeviceAvailability>,
    pub statuses: Vec<DeviceStatus>,
}

/// Builds device-layer records.
#[derive(Debug, Clone)]
pub struct DeviceGenerator {
    dashboard_url: String,
}

impl Default for DeviceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DASHBOARD_URL)
    }
}

impl DeviceGenerator {
    pub fn new(dashboard_url: impl Into<String>) -> Self {
        Self {
            dashboard_url: dashboard_url.into().trim_end_matches('/').to_owned(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn generate_device(
        &self,
        rng: &mut GenerationRng,
        placement: &DevicePlacement<'_>,
        product_type: ProductType,
        model: &str,
        name: &str,
        device_index: u32,
        tags: Vec<String>,
    ) -> Device {
        let firmware = catalog::find_model(product_type, model)
            .and_then(|spec| rng.pick(spec.firmware))
            .copied()
            .unwrap_or(UNKNOWN_FIRMWARE);
        let serial = serial_number(rng, product_type.serial_prefix());
        let mac = MacAddress::from_oui(MERAKI_OUI, &rng.hex_octets(3));
        let location = placement.location;

        let mut device = Device {
            url: format!("{}/devices/{serial}/manage", self.dashboard_url),
            serial,
            name: name.to_owned(),
            mac,
            network_id: placement.network_id.to_owned(),
            organization_id: placement.organization_id.to_owned(),
            model: model.to_owned(),
            product_type,
            firmware: firmware.to_owned(),
            lan_ip: lan_ip(placement.network_octet, device_index),
            wan1_ip: None,
            wan2_ip: None,
            imei: None,
            tags,
            lat: location.lat + rng.range(-0.01_f64..=0.01),
            lng: location.lng + rng.range(-0.01_f64..=0.01),
            address: format!("{} {} St", rng.range(100_u32..=9_999), location.city),
            notes: None,
            configuration_updated_at: format_timestamp(rng.hours_ago(1..=72)),
            details: Vec::new(),
        };

        match product_type {
            ProductType::Appliance => {
                device.wan1_ip = Some(wan_ip(rng));
                if rng.chance(0.3) {
                    device.wan2_ip = Some(wan_ip(rng));
                }
            }
            ProductType::CellularGateway => device.imei = Some(rng.digits(15)),
            _ => {}
        }

        device
    }

    /// 95% online, otherwise alerting, offline or dormant with equal odds.
    pub fn generate_device_availability(
        &self,
        rng: &mut GenerationRng,
        device: &Device,
    ) -> DeviceAvailability {
        DeviceAvailability {
            serial: device.serial.clone(),
            name: device.name.clone(),
            mac: device.mac.clone(),
            network: AvailabilityNetwork {
                id: device.network_id.clone(),
            },
            product_type: device.product_type,
            status: draw_status(rng),
            tags: device.tags.clone(),
        }
    }

    /// Status record for `device`. Without an explicit `status` a fresh
    /// draw is made, independent of any availability record.
    pub fn generate_device_status(
        &self,
        rng: &mut GenerationRng,
        device: &Device,
        status: Option<AvailabilityStatus>,
    ) -> DeviceStatus {
        let status = status.unwrap_or_else(|| draw_status(rng));
        let last_reported = match status {
            AvailabilityStatus::Online => rng.minutes_ago(1..=5),
            AvailabilityStatus::Alerting => rng.minutes_ago(5..=15),
            AvailabilityStatus::Offline | AvailabilityStatus::Dormant => rng.hours_ago(1..=72),
        };
        let is_appliance = device.product_type == ProductType::Appliance;
        let gateway = match (&device.wan1_ip, is_appliance) {
            (Some(wan), true) => format!("{}.1", subnet_base(wan)),
            _ => gateway_for(&device.lan_ip),
        };
        let components = (device.product_type == ProductType::Switch
            && catalog::has_redundant_power(&device.model))
        .then(|| power_supplies(rng, &device.model));

        DeviceStatus {
            name: device.name.clone(),
            serial: device.serial.clone(),
            mac: device.mac.clone(),
            public_ip: device.wan1_ip.clone(),
            network_id: device.network_id.clone(),
            status,
            last_reported_at: format_timestamp(last_reported),
            lan_ip: device.lan_ip.clone(),
            gateway,
            ip_type: if is_appliance { "static" } else { "dhcp" }.into(),
            primary_dns: "8.8.8.8".into(),
            secondary_dns: "8.8.4.4".into(),
            product_type: device.product_type,
            model: device.model.clone(),
            tags: device.tags.clone(),
            components,
        }
    }

    /// Expands `plan` in the order appliances, switches, wireless, cellular,
    /// cameras, sensors. Each status carries its availability's status.
    pub fn generate_devices_for_network(
        &self,
        rng: &mut GenerationRng,
        placement: &DevicePlacement<'_>,
        plan: &DevicePlan,
    ) -> NetworkDevices {
        let mut out = NetworkDevices::default();
        for (index, planned) in (0_u32..).zip(expand_plan(plan, placement.network_id)) {
            let device = self.generate_device(
                rng,
                placement,
                planned.product_type,
                &planned.model,
                &planned.name,
                index,
                planned.tags,
            );
            let availability = self.generate_device_availability(rng, &device);
            let status = self.generate_device_status(rng, &device, Some(availability.status));
            out.devices.push(device);
            out.availabilities.push(availability);
            out.statuses.push(status);
        }

        debug!(
            network_id = placement.network_id,
            devices = out.devices.len(),
            "generated network devices"
        );
        out
    }
}

// ── Private helpers ─────────────────────────────────────────────────

struct PlannedDevice {
    product_type: ProductType,
    model: String,
    name: String,
    tags: Vec<String>,
}

/// Flattens a plan into concrete devices, names resolved.
fn expand_plan(plan: &DevicePlan, network_id: &str) -> Vec<PlannedDevice> {
    let singles = |product_type: ProductType, list: &[SingleDevice], suffix: &str| {
        list.iter()
            .map(|d| PlannedDevice {
                product_type,
                model: d.model.clone(),
                name: d.name_or(network_id, suffix),
                tags: d.tags.clone(),
            })
            .collect::<Vec<_>>()
    };
    let groups = |product_type: ProductType, list: &[DeviceGroup], prefix: &str| {
        list.iter()
            .flat_map(|g| {
                (0..g.count).map(move |i| PlannedDevice {
                    product_type,
                    model: g.model.clone(),
                    name: g.device_name(prefix, i),
                    tags: g.tags.clone(),
                })
            })
            .collect::<Vec<_>>()
    };

    let mut planned = singles(ProductType::Appliance, &plan.appliances, "MX");
    planned.extend(groups(ProductType::Switch, &plan.switches, "SW"));
    planned.extend(groups(ProductType::Wireless, &plan.wireless, "AP"));
    planned.extend(singles(ProductType::CellularGateway, &plan.cellular, "MG"));
    planned.extend(groups(ProductType::Camera, &plan.cameras, "CAM"));
    planned.extend(groups(ProductType::Sensor, &plan.sensors, "SENSOR"));
    planned
}

/// `{prefix}XX-XXXX-XXXX`
fn serial_number(rng: &mut GenerationRng, prefix: &str) -> String {
    format!(
        "{prefix}{}-{}-{}",
        rng.alphanumeric(2),
        rng.alphanumeric(4),
        rng.alphanumeric(4)
    )
}

/// Devices one network can address before the third LAN octet overflows.
pub const MAX_DEVICES_PER_NETWORK: usize = 254 * 256;

/// `10.{octet}.{index / 254}.{index % 254 + 1}`
fn lan_ip(network_octet: u8, device_index: u32) -> String {
    format!(
        "10.{network_octet}.{}.{}",
        device_index / 254,
        device_index % 254 + 1
    )
}

fn wan_ip(rng: &mut GenerationRng) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.range(50_u8..=200),
        rng.range(1_u8..=254),
        rng.range(1_u8..=254),
        rng.range(1_u8..=254)
    )
}

/// Devices behind the appliance use its first LAN address.
fn gateway_for(lan_ip: &str) -> String {
    let mut octets = lan_ip.split('.');
    match (octets.next(), octets.next()) {
        (Some(a), Some(b)) => format!("{a}.{b}.0.1"),
        _ => lan_ip.to_owned(),
    }
}

fn draw_status(rng: &mut GenerationRng) -> AvailabilityStatus {
    if rng.chance(0.95) {
        AvailabilityStatus::Online
    } else {
        rng.pick(&DEGRADED_STATUSES)
            .copied()
            .unwrap_or(AvailabilityStatus::Offline)
    }
}

fn power_supplies(rng: &mut GenerationRng, model: &str) -> StatusComponents {
    // MS425 is a fibre aggregation switch without PoE.
    let (psu_model, poe_watts) = if model.starts_with("MS425") {
        ("MA-PWR-250WAC", 0)
    } else {
        ("MA-PWR-640WAC", 740)
    };
    let power_supplies = (1..=2)
        .map(|slot| PowerSupply {
            slot,
            serial: serial_number(rng, "Q2"),
            model: psu_model.to_owned(),
            status: "powering".to_owned(),
            poe: PoeBudget {
                unit: "watts".to_owned(),
                maximum: poe_watts,
            },
        })
        .collect();
    StatusComponents { power_supplies }
}
