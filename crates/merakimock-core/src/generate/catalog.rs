// ── Hardware and location catalogs ──

use crate::model::ProductType;

/// A hardware model the Dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub model: &'static str,
    pub product_type: ProductType,
    pub firmware: &'static [&'static str],
    /// Switch access ports, zero for everything else.
    pub ports: u16,
}

const fn hw(
    model: &'static str,
    product_type: ProductType,
    firmware: &'static [&'static str],
    ports: u16,
) -> ModelSpec {
    ModelSpec {
        model,
        product_type,
        firmware,
        ports,
    }
}

const MX_FIRMWARE: &[&str] = &["MX 18.107", "MX 18.106", "MX 17.12"];
const MX_CURRENT_FIRMWARE: &[&str] = &["MX 18.107", "MX 18.106"];
const MS_FIRMWARE: &[&str] = &["MS 15.21", "MS 15.20", "MS 14.33"];
const MS_CURRENT_FIRMWARE: &[&str] = &["MS 15.21", "MS 15.20"];
const MR_FIRMWARE: &[&str] = &["MR 30.5", "MR 29.7", "MR 28.8"];
const MR_CURRENT_FIRMWARE: &[&str] = &["MR 30.5", "MR 29.7"];
const MG_FIRMWARE: &[&str] = &["MG 1.24.2", "MG 1.23.1"];
const MT_FIRMWARE: &[&str] = &["MT 1.0.3"];
const MV_FIRMWARE: &[&str] = &["MV 4.18"];

/// Every supported model, grouped by product family.
pub static MODELS: &[ModelSpec] = &[
    // Security appliances
    hw("MX450", ProductType::Appliance, MX_FIRMWARE, 0),
    hw("MX250", ProductType::Appliance, MX_CURRENT_FIRMWARE, 0),
    hw("MX85", ProductType::Appliance, MX_FIRMWARE, 0),
    hw("MX75", ProductType::Appliance, MX_CURRENT_FIRMWARE, 0),
    hw("MX68", ProductType::Appliance, MX_FIRMWARE, 0),
    hw("MX68W", ProductType::Appliance, MX_CURRENT_FIRMWARE, 0),
    hw("MX67", ProductType::Appliance, MX_CURRENT_FIRMWARE, 0),
    hw("MX67C", ProductType::Appliance, MX_CURRENT_FIRMWARE, 0),
    // Switches
    hw("MS425-32", ProductType::Switch, MS_FIRMWARE, 32),
    hw("MS350-48", ProductType::Switch, MS_CURRENT_FIRMWARE, 48),
    hw("MS250-48", ProductType::Switch, MS_FIRMWARE, 48),
    hw("MS225-48", ProductType::Switch, MS_CURRENT_FIRMWARE, 48),
    hw("MS225-24", ProductType::Switch, MS_CURRENT_FIRMWARE, 24),
    hw("MS120-24", ProductType::Switch, MS_FIRMWARE, 24),
    hw("MS120-8", ProductType::Switch, MS_CURRENT_FIRMWARE, 8),
    // Access points
    hw("MR57", ProductType::Wireless, MR_FIRMWARE, 0),
    hw("MR56", ProductType::Wireless, MR_CURRENT_FIRMWARE, 0),
    hw("MR46", ProductType::Wireless, MR_FIRMWARE, 0),
    hw("MR36", ProductType::Wireless, MR_CURRENT_FIRMWARE, 0),
    hw("MR33", ProductType::Wireless, MR_FIRMWARE, 0),
    hw("MR30H", ProductType::Wireless, MR_CURRENT_FIRMWARE, 0),
    // Cellular gateways
    hw("MG41", ProductType::CellularGateway, MG_FIRMWARE, 0),
    hw("MG21", ProductType::CellularGateway, MG_FIRMWARE, 0),
    // Sensors
    hw("MT10", ProductType::Sensor, MT_FIRMWARE, 0),
    hw("MT12", ProductType::Sensor, MT_FIRMWARE, 0),
    hw("MT14", ProductType::Sensor, MT_FIRMWARE, 0),
    // Cameras
    hw("MV12W", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV13", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV13M", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV22", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV23", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV23X", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV33", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV33M", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV63", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV63X", ProductType::Camera, MV_FIRMWARE, 0),
    hw("MV72", ProductType::Camera, MV_FIRMWARE, 0),
];

/// Firmware reported for models missing from [`MODELS`].
pub const UNKNOWN_FIRMWARE: &str = "unknown";

/// Ports assumed for switches missing from [`MODELS`].
pub const DEFAULT_SWITCH_PORTS: u16 = 48;

pub fn find_model(product_type: ProductType, model: &str) -> Option<&'static ModelSpec> {
    MODELS
        .iter()
        .find(|m| m.product_type == product_type && m.model == model)
}

/// Switch families that report redundant power supplies in device status.
pub fn has_redundant_power(model: &str) -> bool {
    ["MS350", "MS355", "MS390", "MS410", "MS425"]
        .iter()
        .any(|prefix| model.starts_with(prefix))
}

// ── Locations ───────────────────────────────────────────────────────

/// A city devices can be placed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub city: &'static str,
    pub state: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub timezone: &'static str,
}

const fn city(
    city: &'static str,
    state: &'static str,
    lat: f64,
    lng: f64,
    timezone: &'static str,
) -> Location {
    Location {
        city,
        state,
        lat,
        lng,
        timezone,
    }
}

pub static US_LOCATIONS: &[Location] = &[
    city("San Francisco", "CA", 37.7749, -122.4194, "America/Los_Angeles"),
    city("New York", "NY", 40.7128, -74.0060, "America/New_York"),
    city("Chicago", "IL", 41.8781, -87.6298, "America/Chicago"),
    city("Los Angeles", "CA", 34.0522, -118.2437, "America/Los_Angeles"),
    city("Seattle", "WA", 47.6062, -122.3321, "America/Los_Angeles"),
    city("Austin", "TX", 30.2672, -97.7431, "America/Chicago"),
    city("Denver", "CO", 39.7392, -104.9903, "America/Denver"),
    city("Boston", "MA", 42.3601, -71.0589, "America/New_York"),
    city("Atlanta", "GA", 33.7490, -84.3880, "America/New_York"),
    city("Miami", "FL", 25.7617, -80.1918, "America/New_York"),
    city("Dallas", "TX", 32.7767, -96.7970, "America/Chicago"),
    city("Phoenix", "AZ", 33.4484, -112.0740, "America/Phoenix"),
    city("Portland", "OR", 45.5152, -122.6784, "America/Los_Angeles"),
    city("Minneapolis", "MN", 44.9778, -93.2650, "America/Chicago"),
    city("Detroit", "MI", 42.3314, -83.0458, "America/Detroit"),
    city("Philadelphia", "PA", 39.9526, -75.1652, "America/New_York"),
    city("San Diego", "CA", 32.7157, -117.1611, "America/Los_Angeles"),
    city("Houston", "TX", 29.7604, -95.3698, "America/Chicago"),
    city("Charlotte", "NC", 35.2271, -80.8431, "America/New_York"),
    city("Salt Lake City", "UT", 40.7608, -111.8910, "America/Denver"),
];

/// Location at `index`, wrapping around the table.
pub fn location_at(index: usize) -> &'static Location {
    &US_LOCATIONS[index % US_LOCATIONS.len()]
}

/// Case-insensitive lookup by city name.
pub fn find_location(city: &str) -> Option<&'static Location> {
    US_LOCATIONS
        .iter()
        .find(|loc| loc.city.eq_ignore_ascii_case(city))
}
