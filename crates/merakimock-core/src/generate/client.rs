// ── ClientGenerator ──
//
// Network clients with OUI-driven hostnames and predictions, addressed out
// of their VLAN's subnet and attached to a switch or access point according
// to what kind of device they are.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::catalog::{self, DEFAULT_SWITCH_PORTS};
use super::client_catalog::{
    self, ClientTraits, ConnectionPolicy, MANUFACTURERS, Manufacturer, UsageClass,
};
use crate::model::vlan::subnet_base;
use crate::model::{
    ClientStatus, ConnectionType, Device, DeviceClient, MacAddress, NetworkClient, ProductType,
    Usage, Vlan,
};
use crate::rng::GenerationRng;

const FIRST_NAMES: &[&str] = &[
    "john", "jane", "mike", "sarah", "david", "lisa", "tom", "anna", "chris", "kate",
];
const LAST_NAMES: &[&str] = &[
    "smith", "jones", "wilson", "brown", "davis", "miller", "moore", "taylor", "anderson",
    "thomas",
];
const NOTES: &[Option<&str>] = &[
    None,
    None,
    None,
    Some("Visitor device"),
    Some("Temp access"),
    Some("Executive laptop"),
    Some("Conference room"),
];
const ADAPTIVE_POLICY_GROUPS: &[Option<&str>] = &[
    None,
    None,
    Some("1: Employee"),
    Some("2: Infrastructure"),
    Some("3: Guest"),
    Some("4: IoT Devices"),
];
const GROUP_POLICIES_8021X: &[Option<&str>] = &[
    None,
    None,
    None,
    Some("Employee_Access"),
    Some("Guest_Access"),
    Some("Contractor_Access"),
    Some("Student_Access"),
];
const PSK_GROUPS: &[Option<&str>] = &[None, None, None, Some("Group 1"), Some("Group 2"), Some("IoT Group")];
const WIRELESS_CAPABILITIES: &[&str] = &[
    "802.11ac - 2.4 GHz",
    "802.11ac - 5 GHz",
    "802.11ax - 2.4 GHz",
    "802.11ax - 5 GHz",
    "802.11ax - 6 GHz",
    "802.11n - 2.4 GHz",
];

/// VLAN a client is addressed from. Borrowed from a [`Vlan`] or the
/// built-in default when a network has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientVlan<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub subnet: Option<&'a str>,
}

impl ClientVlan<'static> {
    pub const DEFAULT: Self = Self {
        id: "1",
        name: "Default",
        subnet: Some("192.168.1.0/24"),
    };
}

impl<'a> From<&'a Vlan> for ClientVlan<'a> {
    fn from(vlan: &'a Vlan) -> Self {
        Self {
            id: &vlan.id,
            name: &vlan.name,
            subnet: Some(&vlan.subnet),
        }
    }
}

/// Output of [`ClientGenerator::generate_clients_for_network`].
#[derive(Debug, Clone, Default)]
pub struct NetworkClients {
    pub network_clients: Vec<NetworkClient>,
    /// Keyed by serial; every switch and access point has an entry, possibly empty.
    pub device_clients: IndexMap<String, Vec<DeviceClient>>,
}

/// Builds client records. Tracks issued client ids so they stay unique
/// across every network of one generation run.
#[derive(Debug, Clone, Default)]
pub struct ClientGenerator {
    issued_ids: HashSet<String>,
}

impl ClientGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `k` followed by six digits, never repeated by this generator.
    pub fn next_client_id(&mut self, rng: &mut GenerationRng) -> String {
        loop {
            let id = format!("k{}", rng.range(100_000_u32..=999_999));
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    /// A single unattached client. `recentDeviceConnection` holds the
    /// device-type preference; switchport, SSID and device reference are
    /// left empty until the client is placed on infrastructure.
    ///
    /// Without a subnet the address falls back to `192.168.{vlan_id}.x`.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_client(
        &self,
        rng: &mut GenerationRng,
        client_id: &str,
        network_id: &str,
        vlan_id: &str,
        client_index: u32,
        vlan_subnet: Option<&str>,
        manufacturer: Option<&Manufacturer>,
    ) -> NetworkClient {
        let manufacturer = match manufacturer {
            Some(m) => m,
            None => pick_manufacturer(rng),
        };
        let mac = MacAddress::from_oui(manufacturer.oui, &rng.hex_octets(3));
        let fourth = client_index % 250 + 2;
        let ip = match vlan_subnet {
            Some(subnet) => format!("{}.{fourth}", subnet_base(subnet)),
            None => format!("192.168.{vlan_id}.{fourth}"),
        };
        let os = rng.pick(manufacturer.os).copied().unwrap_or("Unknown");
        let profile = rng
            .pick(client_catalog::host_profiles(manufacturer.oui))
            .copied()
            .unwrap_or(client_catalog::UNKNOWN_HOST);
        let hostname = format!("{}-{}", profile.prefix, rng.alphanumeric(4));
        let prediction = profile.render_prediction(os);

        let first_seen = rng.days_ago(1..=90).timestamp().to_string();
        let last_seen = rng.minutes_ago(0..=60).timestamp().to_string();

        let (sent_range, recv_range) = UsageClass::classify(&prediction).ranges();
        let usage = Usage::new(rng.range(sent_range), rng.range(recv_range));

        let user = rng.chance(0.7).then(|| {
            let first = rng.pick(FIRST_NAMES).copied().unwrap_or("user");
            let last = rng.pick(LAST_NAMES).copied().unwrap_or("name");
            format!("{first}.{last}")
        });
        let status = if rng.chance(0.9) {
            ClientStatus::Online
        } else {
            ClientStatus::Offline
        };
        let notes = pick_label(rng, NOTES);
        let sm_installed = rng.chance(0.2);
        let adaptive_policy_group = pick_label(rng, ADAPTIVE_POLICY_GROUPS);
        let group_policy_8021x = pick_label(rng, GROUP_POLICIES_8021X);
        let psk_group = pick_label(rng, PSK_GROUPS);
        let connection = preferred_connection(rng, ClientTraits::new(&hostname, &prediction));

        NetworkClient {
            id: client_id.to_owned(),
            network_id: network_id.to_owned(),
            mac,
            ip,
            ip6: None,
            ip6_local: None,
            description: hostname,
            first_seen,
            last_seen,
            manufacturer: manufacturer.name.to_owned(),
            os: os.to_owned(),
            device_type_prediction: prediction,
            user,
            vlan: vlan_id.to_owned(),
            named_vlan: client_catalog::vlan_name_for_id(vlan_id),
            ssid: None,
            switchport: None,
            wireless_capabilities: None,
            sm_installed,
            recent_device_serial: None,
            recent_device_name: None,
            recent_device_mac: None,
            recent_device_connection: connection,
            notes,
            group_policy_8021x,
            adaptive_policy_group,
            psk_group,
            status,
            usage,
        }
    }

    /// Generates `count` clients spread across `vlans` and attached to the
    /// switches and access points in `devices`.
    ///
    /// The first `required_manufacturers.len()` clients use the named
    /// device types (`"HP Printer"`, `"Samsung TV"`, ...); unknown keys are
    /// logged and fall back to a weighted draw.
    pub fn generate_clients_for_network<S: AsRef<str>>(
        &mut self,
        rng: &mut GenerationRng,
        network_id: &str,
        vlans: &[Vlan],
        count: u32,
        devices: &[Device],
        required_manufacturers: &[S],
    ) -> NetworkClients {
        let switches: Vec<&Device> = devices
            .iter()
            .filter(|d| d.product_type == ProductType::Switch)
            .collect();
        let access_points: Vec<&Device> = devices
            .iter()
            .filter(|d| d.product_type == ProductType::Wireless)
            .collect();

        let mut out = NetworkClients {
            network_clients: Vec::with_capacity(count as usize),
            device_clients: switches
                .iter()
                .chain(&access_points)
                .map(|d| (d.serial.clone(), Vec::new()))
                .collect(),
        };
        let vlans: Vec<ClientVlan<'_>> = vlans.iter().map(ClientVlan::from).collect();

        for index in 0..count {
            let vlan = rng.pick(&vlans).copied().unwrap_or(ClientVlan::DEFAULT);
            let client_id = self.next_client_id(rng);
            let forced = required_manufacturers
                .get(index as usize)
                .and_then(|key| forced_manufacturer(network_id, key.as_ref()));

            let mut client = self.generate_client(
                rng,
                &client_id,
                network_id,
                vlan.id,
                index,
                vlan.subnet,
                forced,
            );
            client.named_vlan = vlan.name.to_owned();

            let wants_wired = client.recent_device_connection == ConnectionType::Wired;
            let attachment = match (wants_wired, switches.is_empty(), access_points.is_empty()) {
                (true, false, _) | (false, false, true) => {
                    rng.pick(&switches).map(|d| (*d, ConnectionType::Wired))
                }
                (_, _, false) => rng.pick(&access_points).map(|d| (*d, ConnectionType::Wireless)),
                (_, true, true) => None,
            };

            if let Some((device, connection)) = attachment {
                attach(rng, &mut client, device, connection);
                let entry = out.device_clients.entry(device.serial.clone()).or_default();
                entry.push(DeviceClient::from(&client));
            }
            out.network_clients.push(client);
        }

        debug!(
            network_id,
            clients = out.network_clients.len(),
            switches = switches.len(),
            access_points = access_points.len(),
            "generated network clients"
        );
        out
    }
}

// ── Private helpers ─────────────────────────────────────────────────

fn pick_manufacturer(rng: &mut GenerationRng) -> &'static Manufacturer {
    rng.pick_weighted(MANUFACTURERS, |m| m.weight)
        .unwrap_or(&MANUFACTURERS[0])
}

fn forced_manufacturer(network_id: &str, key: &str) -> Option<&'static Manufacturer> {
    let found = client_catalog::manufacturer_for_key(key);
    if found.is_none() {
        warn!(network_id, key, "unknown required device type, drawing at random");
    }
    found
}

fn pick_label(rng: &mut GenerationRng, options: &[Option<&str>]) -> Option<String> {
    rng.pick(options).copied().flatten().map(str::to_owned)
}

fn preferred_connection(rng: &mut GenerationRng, traits: ClientTraits<'_>) -> ConnectionType {
    let wired = match traits.connection_policy() {
        ConnectionPolicy::AlwaysWireless => false,
        ConnectionPolicy::AlwaysWired => true,
        ConnectionPolicy::Either => rng.chance(0.5),
        ConnectionPolicy::MostlyWireless => rng.chance(0.4),
    };
    if wired {
        ConnectionType::Wired
    } else {
        ConnectionType::Wireless
    }
}

/// Points `client` at `device` and fills the connection-specific fields.
fn attach(
    rng: &mut GenerationRng,
    client: &mut NetworkClient,
    device: &Device,
    connection: ConnectionType,
) {
    client.recent_device_serial = Some(device.serial.clone());
    client.recent_device_name = Some(device.name.clone());
    client.recent_device_mac = Some(device.mac.clone());
    client.recent_device_connection = connection;

    match connection {
        ConnectionType::Wired => {
            let ports = catalog::find_model(ProductType::Switch, &device.model)
                .map_or(DEFAULT_SWITCH_PORTS, |m| m.ports)
                .max(1);
            client.switchport = Some(format!("GigabitEthernet1/0/{}", rng.range(1..=ports)));
            client.ssid = None;
            client.wireless_capabilities = None;
        }
        ConnectionType::Wireless => {
            client.switchport = None;
            client.ssid = Some(ssid_for(rng, client));
            client.wireless_capabilities = rng.pick(WIRELESS_CAPABILITIES).map(|&c| c.to_owned());
        }
    }
}

/// IoT gear joins the IoT SSID, guests the guest SSID, everyone else
/// mostly the corporate one.
fn ssid_for(rng: &mut GenerationRng, client: &NetworkClient) -> String {
    let traits = ClientTraits::new(&client.description, &client.device_type_prediction);
    let ssid = if traits.is_iot() {
        "IoT"
    } else if client.named_vlan.to_lowercase().contains("guest") || !rng.chance(0.9) {
        "Guest"
    } else {
        "Corporate"
    };
    ssid.to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::generate::catalog::location_at;
    use crate::generate::device::{DeviceGenerator, DevicePlacement};
    use crate::generate::network::{NetworkGenerator, VlanType};
    use crate::generate::plan::{DeviceGroup, DevicePlan, SingleDevice};

    const NO_REQUIRED: &[&str] = &[];

    fn devices(rng: &mut GenerationRng, plan: &DevicePlan) -> Vec<Device> {
        let placement = DevicePlacement {
            network_id: "N_1",
            organization_id: "1",
            location: location_at(0),
            network_octet: 10,
        };
        DeviceGenerator::default()
            .generate_devices_for_network(rng, &placement, plan)
            .devices
    }

    fn full_plan() -> DevicePlan {
        DevicePlan {
            appliances: vec![SingleDevice::new("MX68")],
            switches: vec![DeviceGroup::new("MS120-8", 2)],
            wireless: vec![DeviceGroup::new("MR46", 3)],
            ..DevicePlan::default()
        }
    }

    fn vlans(rng: &mut GenerationRng) -> Vec<Vlan> {
        NetworkGenerator::default().generate_vlans_for_network(
            rng,
            "N_1",
            &[VlanType::Corporate, VlanType::Guest, VlanType::Iot],
            10,
        )
    }

    #[test]
    fn ip_comes_from_vlan_subnet() {
        let generator = ClientGenerator::new();
        let mut rng = GenerationRng::seeded(42);
        let client = generator.generate_client(
            &mut rng,
            "k123456",
            "N_1",
            "100",
            3,
            Some("192.168.100.0/24"),
            None,
        );
        assert_eq!(client.ip, "192.168.100.5");
        assert_eq!(client.named_vlan, "Data");
        assert!(client.recent_device_serial.is_none());
    }

    #[test]
    fn ip_wraps_after_250_and_falls_back_without_subnet() {
        let generator = ClientGenerator::new();
        let mut rng = GenerationRng::seeded(1);
        let wrapped =
            generator.generate_client(&mut rng, "k1", "N_1", "10", 252, Some("10.1.2.0/24"), None);
        assert_eq!(wrapped.ip, "10.1.2.4");
        let fallback = generator.generate_client(&mut rng, "k2", "N_1", "30", 0, None, None);
        assert_eq!(fallback.ip, "192.168.30.2");
    }

    #[test]
    fn forced_manufacturer_is_used() {
        let generator = ClientGenerator::new();
        let mut rng = GenerationRng::seeded(7);
        let printer = client_catalog::manufacturer_for_key("HP Printer").unwrap();
        let client =
            generator.generate_client(&mut rng, "k1", "N_1", "10", 0, None, Some(printer));
        assert_eq!(client.mac.oui(), "c8:b5:ad");
        assert_eq!(client.manufacturer, "HP");
        assert_eq!(client.recent_device_connection, ConnectionType::Wired);
    }

    #[test]
    fn required_manufacturers_come_first() {
        let mut rng = GenerationRng::seeded(42);
        let devices = devices(&mut rng, &full_plan());
        let vlans = vlans(&mut rng);
        let out = ClientGenerator::new().generate_clients_for_network(
            &mut rng,
            "N_1",
            &vlans,
            10,
            &devices,
            &["HP Printer", "Samsung TV", "Not A Device"],
        );
        assert_eq!(out.network_clients[0].mac.oui(), "c8:b5:ad");
        assert_eq!(out.network_clients[1].mac.oui(), "8c:79:f5");
        assert_eq!(out.network_clients.len(), 10);
    }

    #[test]
    fn no_infrastructure_means_no_device_reference() {
        let mut rng = GenerationRng::seeded(42);
        let vlans = vlans(&mut rng);
        let out = ClientGenerator::new().generate_clients_for_network(
            &mut rng,
            "N_1",
            &vlans,
            100,
            &[],
            NO_REQUIRED,
        );
        assert_eq!(out.network_clients.len(), 100);
        assert!(out.device_clients.is_empty());
        for client in &out.network_clients {
            assert!(client.recent_device_serial.is_none());
            assert!(client.switchport.is_none());
            assert!(client.ssid.is_none());
        }
    }

    #[test]
    fn connection_fields_are_exclusive_and_match_device() {
        let mut rng = GenerationRng::seeded(3);
        let devices = devices(&mut rng, &full_plan());
        let vlans = vlans(&mut rng);
        let out = ClientGenerator::new().generate_clients_for_network(
            &mut rng,
            "N_1",
            &vlans,
            200,
            &devices,
            NO_REQUIRED,
        );
        for client in &out.network_clients {
            let serial = client.recent_device_serial.as_deref().unwrap();
            let device = devices.iter().find(|d| d.serial == serial).unwrap();
            match client.recent_device_connection {
                ConnectionType::Wired => {
                    assert_eq!(device.product_type, ProductType::Switch);
                    let port: u16 = client
                        .switchport
                        .as_deref()
                        .unwrap()
                        .trim_start_matches("GigabitEthernet1/0/")
                        .parse()
                        .unwrap();
                    assert!((1..=8).contains(&port));
                    assert!(client.ssid.is_none());
                }
                ConnectionType::Wireless => {
                    assert_eq!(device.product_type, ProductType::Wireless);
                    assert!(client.switchport.is_none());
                    assert!(client.wireless_capabilities.is_some());
                    let ssid = client.ssid.as_deref().unwrap();
                    if client.named_vlan == "Guest" {
                        assert_ne!(ssid, "Corporate");
                    }
                }
            }
            let vlan = vlans.iter().find(|v| v.id == client.vlan).unwrap();
            assert_eq!(client.named_vlan, vlan.name);
            assert!(vlan.contains(client.ip.parse().unwrap()));
        }
    }

    #[test]
    fn device_clients_mirror_network_clients() {
        let mut rng = GenerationRng::seeded(8);
        let devices = devices(&mut rng, &full_plan());
        let vlans = vlans(&mut rng);
        let out = ClientGenerator::new().generate_clients_for_network(
            &mut rng,
            "N_1",
            &vlans,
            50,
            &devices,
            NO_REQUIRED,
        );
        // Every switch and AP has an entry, the appliance does not.
        assert_eq!(out.device_clients.len(), 5);
        let total: usize = out.device_clients.values().map(Vec::len).sum();
        assert_eq!(total, 50);
        for (serial, list) in &out.device_clients {
            for dc in list {
                let nc = out.network_clients.iter().find(|c| c.id == dc.id).unwrap();
                assert_eq!(nc.recent_device_serial.as_deref(), Some(serial.as_str()));
                assert_eq!(dc.usage.sent, nc.usage.sent / 1000);
                assert_eq!(dc.switchport, nc.switchport);
            }
        }
    }

    #[test]
    fn only_access_points_forces_wireless() {
        let mut rng = GenerationRng::seeded(5);
        let plan = DevicePlan {
            appliances: vec![SingleDevice::new("MX67")],
            wireless: vec![DeviceGroup::new("MR33", 2)],
            ..DevicePlan::default()
        };
        let devices = devices(&mut rng, &plan);
        let out = ClientGenerator::new().generate_clients_for_network(
            &mut rng,
            "N_1",
            &[],
            30,
            &devices,
            &["Canon"],
        );
        for client in &out.network_clients {
            assert_eq!(client.recent_device_connection, ConnectionType::Wireless);
            assert_eq!(client.named_vlan, "Default");
            assert!(client.ip.starts_with("192.168.1."));
        }
        // Printers are IoT gear.
        assert_eq!(out.network_clients[0].ssid.as_deref(), Some("IoT"));
    }

    #[test]
    fn client_ids_are_unique() {
        let mut generator = ClientGenerator::new();
        let mut rng = GenerationRng::seeded(0);
        let ids: HashSet<_> = (0..5_000).map(|_| generator.next_client_id(&mut rng)).collect();
        assert_eq!(ids.len(), 5_000);
        assert!(ids.iter().all(|id| id.len() == 7 && id.starts_with('k')));
    }

    #[test]
    fn same_seed_same_clients() {
        let run = || {
            let mut rng = GenerationRng::seeded(99);
            let devices = devices(&mut rng, &full_plan());
            let vlans = vlans(&mut rng);
            ClientGenerator::new()
                .generate_clients_for_network(&mut rng, "N_1", &vlans, 20, &devices, &["Canon"])
                .network_clients
        };
        assert_eq!(run(), run());
    }
}
