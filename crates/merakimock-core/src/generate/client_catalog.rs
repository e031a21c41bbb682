// ── Client manufacturer and device-type tables ──
//
// OUIs are consumer-device registrations, so the Dashboard's OUI-based
// manufacturer and device-type inference lands on something plausible.

use std::ops::RangeInclusive;

/// A manufacturer OUI with its share of the client population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manufacturer {
    pub name: &'static str,
    pub oui: &'static str,
    pub weight: u32,
    pub os: &'static [&'static str],
}

const fn maker(
    name: &'static str,
    oui: &'static str,
    weight: u32,
    os: &'static [&'static str],
) -> Manufacturer {
    Manufacturer {
        name,
        oui,
        weight,
        os,
    }
}

const WINDOWS: &[&str] = &["Windows 11", "Windows 10"];
const EMBEDDED: &[&str] = &["Embedded"];

pub static MANUFACTURERS: &[Manufacturer] = &[
    // Computers and mobile
    maker("Apple", "3C:E0:72", 15, &["iOS 17", "iOS 16", "iOS 15"]),
    maker("Apple", "A4:83:E7", 10, &["macOS Sonoma", "macOS Ventura", "macOS Monterey"]),
    maker("Samsung", "84:25:DB", 12, &["Android 14", "Android 13", "Android 12"]),
    maker("Dell", "F8:B1:56", 12, WINDOWS),
    maker("HP", "10:B6:76", 10, WINDOWS),
    maker("Lenovo", "28:D2:44", 10, &["Windows 11", "Windows 10", "Chrome OS"]),
    maker("Microsoft", "28:18:78", 5, WINDOWS),
    maker("Intel", "A4:34:D9", 3, &["Windows 11", "Windows 10", "Linux"]),
    maker("Google", "F4:F5:D8", 5, &["Android 14", "Chrome OS"]),
    // Printers
    maker("HP", "C8:B5:AD", 3, EMBEDDED),
    maker("Epson", "00:26:AB", 2, EMBEDDED),
    maker("Canon", "00:1E:8F", 2, EMBEDDED),
    // Smart TVs
    maker("Samsung", "8C:79:F5", 2, &["Tizen OS"]),
    maker("LG", "A8:23:FE", 2, &["webOS"]),
    // VoIP and handheld scanners
    maker("Cisco", "00:1B:0D", 2, &["Cisco IP Phone"]),
    maker("Zebra", "00:A0:F8", 3, &["Android 11", "Android 10"]),
    maker("Honeywell", "00:40:84", 2, &["Android 10"]),
    // Cameras and sensors
    maker("Axis", "00:40:8C", 1, EMBEDDED),
    maker("Texas Instruments", "00:17:E5", 1, EMBEDDED),
    // Medical
    maker("GE", "00:00:9A", 1, EMBEDDED),
    maker("Philips", "00:1E:C0", 1, EMBEDDED),
];

/// Human-readable device-type keys used to force specific archetypes.
pub static DEVICE_TYPE_KEYS: &[(&str, &str)] = &[
    ("Apple Mobile", "3C:E0:72"),
    ("Apple Mac", "A4:83:E7"),
    ("Samsung Mobile", "84:25:DB"),
    ("Samsung TV", "8C:79:F5"),
    ("HP Laptop", "10:B6:76"),
    ("HP Printer", "C8:B5:AD"),
    ("Dell", "F8:B1:56"),
    ("Lenovo", "28:D2:44"),
    ("Microsoft", "28:18:78"),
    ("Intel", "A4:34:D9"),
    ("Google", "F4:F5:D8"),
    ("Epson", "00:26:AB"),
    ("Canon", "00:1E:8F"),
    ("LG TV", "A8:23:FE"),
    ("Cisco", "00:1B:0D"),
    ("Zebra", "00:A0:F8"),
    ("Honeywell", "00:40:84"),
    ("Axis", "00:40:8C"),
    ("Texas Instruments", "00:17:E5"),
    ("GE Healthcare", "00:00:9A"),
    ("Philips Medical", "00:1E:C0"),
];

pub fn manufacturer_by_oui(oui: &str) -> Option<&'static Manufacturer> {
    MANUFACTURERS
        .iter()
        .find(|m| m.oui.eq_ignore_ascii_case(oui))
}

/// Resolves a device-type key such as `"HP Printer"` to its manufacturer.
pub fn manufacturer_for_key(key: &str) -> Option<&'static Manufacturer> {
    DEVICE_TYPE_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, oui)| manufacturer_by_oui(oui))
}

// ── Hostname / prediction templates ─────────────────────────────────

/// Hostname prefix plus a `deviceTypePrediction` template; `{os}` is
/// replaced with the client's OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    pub prefix: &'static str,
    pub prediction: &'static str,
}

impl HostProfile {
    pub fn render_prediction(&self, os: &str) -> String {
        self.prediction.replace("{os}", os)
    }
}

const fn host(prefix: &'static str, prediction: &'static str) -> HostProfile {
    HostProfile { prefix, prediction }
}

/// Used for OUIs without their own entry.
pub const UNKNOWN_HOST: HostProfile = host("DEVICE", "Unknown Device, {os}");

pub static HOST_PROFILES: &[(&str, &[HostProfile])] = &[
    ("3C:E0:72", &[host("IPHONE", "iPhone, {os}"), host("IPAD", "iPad, {os}")]),
    ("A4:83:E7", &[host("MACBOOK", "MacBook Pro, {os}"), host("IMAC", "iMac, {os}")]),
    (
        "84:25:DB",
        &[
            host("GALAXY", "Samsung Galaxy, {os}"),
            host("SAMSUNG-TAB", "Samsung Tablet, {os}"),
        ],
    ),
    (
        "8C:79:F5",
        &[
            host("SAMSUNG-TV", "Samsung Smart TV, {os}"),
            host("SMARTTV", "Samsung Smart TV, {os}"),
        ],
    ),
    (
        "F8:B1:56",
        &[
            host("DELL-LAPTOP", "Dell Laptop, {os}"),
            host("DELL-DESKTOP", "Dell Desktop, {os}"),
        ],
    ),
    (
        "10:B6:76",
        &[host("HP-LAPTOP", "HP Laptop, {os}"), host("HP-DESKTOP", "HP Desktop, {os}")],
    ),
    (
        "C8:B5:AD",
        &[host("HP-PRINTER", "HP LaserJet Printer"), host("HP-MFP", "HP OfficeJet MFP")],
    ),
    (
        "28:D2:44",
        &[
            host("LENOVO", "Lenovo ThinkPad, {os}"),
            host("THINKPAD", "Lenovo ThinkPad, {os}"),
        ],
    ),
    (
        "28:18:78",
        &[host("SURFACE", "Microsoft Surface, {os}"), host("DEVICE", "Windows PC, {os}")],
    ),
    ("A4:34:D9", &[host("DEVICE", "Intel NUC, {os}")]),
    (
        "F4:F5:D8",
        &[host("PIXEL", "Google Pixel, {os}"), host("CHROMEBOOK", "Chromebook, {os}")],
    ),
    ("00:26:AB", &[host("EPSON-PRINTER", "Epson Printer")]),
    ("00:1E:8F", &[host("CANON-PRINTER", "Canon Printer")]),
    ("A8:23:FE", &[host("LG-TV", "LG Smart TV, {os}"), host("LGTV", "LG Smart TV, {os}")]),
    ("00:1B:0D", &[host("VOIP", "Cisco IP Phone"), host("CISCO-PHONE", "Cisco IP Phone 8845")]),
    ("00:A0:F8", &[host("ZEBRA-SCANNER", "Zebra Scanner"), host("SCANNER", "Zebra TC52")]),
    ("00:40:84", &[host("HON-SCANNER", "Honeywell Scanner"), host("SCANNER", "Honeywell CT60")]),
    ("00:40:8C", &[host("AXIS-CAM", "Axis IP Camera"), host("CAMERA", "Axis P3245-V")]),
    ("00:17:E5", &[host("SENSOR", "IoT Sensor"), host("TI-SENSOR", "Environmental Sensor")]),
    (
        "00:00:9A",
        &[host("GE-MEDICAL", "GE Patient Monitor"), host("GE-MONITOR", "GE CARESCAPE Monitor")],
    ),
    (
        "00:1E:C0",
        &[
            host("PHILIPS-MED", "Philips IntelliVue"),
            host("PATIENT-MON", "Philips Patient Monitor"),
        ],
    ),
];

/// Candidate profiles for an OUI, never empty.
pub fn host_profiles(oui: &str) -> &'static [HostProfile] {
    const FALLBACK: &[HostProfile] = &[UNKNOWN_HOST];
    HOST_PROFILES
        .iter()
        .find(|(o, _)| o.eq_ignore_ascii_case(oui))
        .map_or(FALLBACK, |(_, profiles)| *profiles)
}

/// Predictions that legitimately carry no `, <os>` suffix.
pub static BARE_PREDICTIONS: &[&str] = &[
    "HP LaserJet Printer",
    "HP OfficeJet MFP",
    "Epson Printer",
    "Canon Printer",
    "Cisco IP Phone",
    "Cisco IP Phone 8845",
    "Zebra Scanner",
    "Zebra TC52",
    "Honeywell Scanner",
    "Honeywell CT60",
    "Axis IP Camera",
    "Axis P3245-V",
    "IoT Sensor",
    "Environmental Sensor",
    "GE Patient Monitor",
    "GE CARESCAPE Monitor",
    "Philips IntelliVue",
    "Philips Patient Monitor",
];

// ── Usage classes ───────────────────────────────────────────────────

/// Traffic profile of a client, inferred from its predicted device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageClass {
    Laptop,
    Desktop,
    Smartphone,
    Tablet,
    Printer,
    VoipPhone,
    IotSensor,
    Camera,
    SmartTv,
    Medical,
    Other,
}

const MB: u64 = 1_000_000;
const GB: u64 = 1_000_000_000;

impl UsageClass {
    /// First match wins, so the more specific patterns come first.
    pub fn classify(prediction: &str) -> Self {
        const RULES: &[(&[&str], UsageClass)] = &[
            (&["smart tv", "television", "tizen", "webos"], UsageClass::SmartTv),
            (
                &["medical", "patient", "healthcare", "intellivue", "carescape"],
                UsageClass::Medical,
            ),
            (&["camera", "p3245"], UsageClass::Camera),
            (&["sensor"], UsageClass::IotSensor),
            (&["printer", "laserjet", "officejet", "mfp"], UsageClass::Printer),
            (&["ip phone", "voip"], UsageClass::VoipPhone),
            (&["iphone", "galaxy", "pixel"], UsageClass::Smartphone),
            (&["ipad", "tablet"], UsageClass::Tablet),
            (&["desktop", "imac", "nuc"], UsageClass::Desktop),
            (
                &["laptop", "macbook", "thinkpad", "surface", "chromebook", "windows pc"],
                UsageClass::Laptop,
            ),
        ];
        let lower = prediction.to_lowercase();
        RULES
            .iter()
            .find(|(patterns, _)| patterns.iter().any(|p| lower.contains(p)))
            .map_or(Self::Other, |(_, class)| *class)
    }

    /// Bytes sent and received over the reporting window.
    pub fn ranges(self) -> (RangeInclusive<u64>, RangeInclusive<u64>) {
        match self {
            Self::Laptop => (500 * MB..=5 * GB, GB..=10 * GB),
            Self::Desktop => (GB..=10 * GB, 2 * GB..=20 * GB),
            Self::Smartphone => (50 * MB..=500 * MB, 200 * MB..=2 * GB),
            Self::Tablet => (100 * MB..=GB, 500 * MB..=5 * GB),
            Self::Printer => (MB..=50 * MB, 10 * MB..=100 * MB),
            Self::VoipPhone => (500 * MB..=2 * GB, 500 * MB..=2 * GB),
            Self::IotSensor => (MB..=10 * MB, 5 * MB..=50 * MB),
            Self::Camera => (5 * GB..=50 * GB, 10 * MB..=100 * MB),
            Self::SmartTv => (100 * MB..=500 * MB, 2 * GB..=20 * GB),
            Self::Medical => (10 * MB..=100 * MB, 50 * MB..=500 * MB),
            Self::Other => (MB..=100 * MB, 5 * MB..=200 * MB),
        }
    }
}

// ── Connection policy ───────────────────────────────────────────────

/// How a client prefers to attach, before infrastructure is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPolicy {
    AlwaysWireless,
    AlwaysWired,
    /// Smart TVs: coin flip.
    Either,
    /// Laptops and everything else: 40% wired.
    MostlyWireless,
}

const WIRELESS_HOSTS: &[&str] = &["IPHONE", "IPAD", "GALAXY", "PIXEL", "SAMSUNG-TAB", "TABLET"];
const WIRELESS_TYPES: &[&str] = &["iphone", "ipad", "galaxy", "pixel", "tablet", "android"];
const WIRED_HOSTS: &[&str] = &[
    "DESKTOP", "PRINTER", "SCANNER", "VOIP", "SENSOR", "CAMERA", "NUC", "GE-", "PHILIPS-",
    "PATIENT", "MEDICAL", "CISCO-PHONE", "HP-PRINTER", "HP-MFP", "EPSON-", "CANON-", "AXIS-",
    "HON-", "ZEBRA-",
];
const WIRED_TYPES: &[&str] = &[
    "desktop", "printer", "scanner", "ip phone", "voip", "sensor", "camera", "nuc", "medical",
    "patient", "healthcare", "laserjet", "officejet", "intellivue", "carescape",
];
const TV_HOSTS: &[&str] = &["SAMSUNG-TV", "LG-TV", "SMARTTV", "LGTV"];
const TV_TYPES: &[&str] = &["smart tv", "television", "tizen", "webos"];
const IOT_HOSTS: &[&str] = &[
    "PRINTER", "SCANNER", "SENSOR", "CAMERA", "VOIP", "NUC", "SMARTTV", "TV", "GE-", "PHILIPS-",
    "PATIENT", "MEDICAL", "MONITOR", "DEVICE",
];
const IOT_TYPES: &[&str] = &[
    "printer", "scanner", "sensor", "camera", "ip phone", "iot", "intel nuc", "smart tv",
    "television", "medical", "patient", "healthcare",
];

/// Classified view of a client's hostname and predicted type.
///
/// Hostname patterns are matched against the stem (`HP-PRINTER` of
/// `HP-PRINTER-X7TV`), not the random suffix. Generic `DEVICE-*` hosts,
/// the Windows PC and unknown-vendor fallback, count as IoT.
#[derive(Debug, Clone, Copy)]
pub struct ClientTraits<'a> {
    stem: &'a str,
    prediction: &'a str,
}

impl<'a> ClientTraits<'a> {
    pub fn new(hostname: &'a str, prediction: &'a str) -> Self {
        let stem = hostname.rsplit_once('-').map_or(hostname, |(stem, _)| stem);
        Self { stem, prediction }
    }

    fn matches(&self, hosts: &[&str], types: &[&str]) -> bool {
        let stem = self.stem.to_uppercase();
        let prediction = self.prediction.to_lowercase();
        hosts.iter().any(|p| stem.contains(p)) || types.iter().any(|p| prediction.contains(p))
    }

    pub fn is_iot(&self) -> bool {
        self.matches(IOT_HOSTS, IOT_TYPES)
    }

    pub fn connection_policy(&self) -> ConnectionPolicy {
        if self.matches(WIRELESS_HOSTS, WIRELESS_TYPES) {
            ConnectionPolicy::AlwaysWireless
        } else if self.matches(WIRED_HOSTS, WIRED_TYPES) {
            ConnectionPolicy::AlwaysWired
        } else if self.matches(TV_HOSTS, TV_TYPES) {
            ConnectionPolicy::Either
        } else {
            ConnectionPolicy::MostlyWireless
        }
    }
}

// ── VLAN names ──────────────────────────────────────────────────────

/// Descriptive name for a VLAN id the topology did not name itself.
pub fn vlan_name_for_id(vlan_id: &str) -> String {
    let Ok(id) = vlan_id.parse::<u32>() else {
        return format!("VLAN {vlan_id}");
    };
    let name = match id {
        1 => "Default",
        10..=13 | 20 | 21 => "Corporate",
        30 | 31 => "Guest",
        40 | 41 => "Voice",
        50 => "Servers",
        60 => "IoT",
        70 | 99 => "Management",
        80 => "Wireless",
        90 => "Security",
        100 => "Data",
        0..20 => "Corporate",
        20..40 => "Guest",
        40..60 => "Voice",
        60..80 => "IoT",
        80..100 => "Management",
        _ => "Data",
    };
    name.to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves() {
        for (key, oui) in DEVICE_TYPE_KEYS {
            let maker = manufacturer_for_key(key).unwrap();
            assert_eq!(maker.oui, *oui);
        }
        assert!(manufacturer_for_key("Toaster").is_none());
    }

    #[test]
    fn every_manufacturer_has_profiles() {
        for maker in MANUFACTURERS {
            let profiles = host_profiles(maker.oui);
            assert_ne!(profiles[0], UNKNOWN_HOST, "{}", maker.oui);
        }
        assert_eq!(host_profiles("AA:BB:CC"), &[UNKNOWN_HOST]);
    }

    #[test]
    fn bare_predictions_match_templates() {
        let bare: Vec<_> = HOST_PROFILES
            .iter()
            .flat_map(|(_, profiles)| profiles.iter())
            .filter(|p| !p.prediction.contains("{os}"))
            .map(|p| p.prediction)
            .collect();
        assert_eq!(bare.len(), BARE_PREDICTIONS.len());
        assert!(bare.iter().all(|p| BARE_PREDICTIONS.contains(p)));
    }

    #[test]
    fn prediction_template_renders_os() {
        assert_eq!(host("IPHONE", "iPhone, {os}").render_prediction("iOS 17"), "iPhone, iOS 17");
        assert_eq!(host("VOIP", "Cisco IP Phone").render_prediction("x"), "Cisco IP Phone");
    }

    #[test]
    fn usage_classes() {
        assert_eq!(UsageClass::classify("Samsung Smart TV, Tizen OS"), UsageClass::SmartTv);
        assert_eq!(UsageClass::classify("Philips Patient Monitor"), UsageClass::Medical);
        assert_eq!(UsageClass::classify("Axis P3245-V"), UsageClass::Camera);
        assert_eq!(UsageClass::classify("IoT Sensor"), UsageClass::IotSensor);
        assert_eq!(UsageClass::classify("Cisco IP Phone 8845"), UsageClass::VoipPhone);
        assert_eq!(UsageClass::classify("iPhone, iOS 17"), UsageClass::Smartphone);
        assert_eq!(UsageClass::classify("MacBook Pro, macOS Sonoma"), UsageClass::Laptop);
        assert_eq!(UsageClass::classify("Intel NUC, Linux"), UsageClass::Desktop);
        assert_eq!(UsageClass::classify("Zebra TC52"), UsageClass::Other);
    }

    #[test]
    fn connection_policies() {
        let policy = |host: &str, prediction: &str| ClientTraits::new(host, prediction).connection_policy();
        assert_eq!(policy("IPHONE-AB12", "iPhone, iOS 17"), ConnectionPolicy::AlwaysWireless);
        assert_eq!(policy("HP-PRINTER-X7TV", "HP LaserJet Printer"), ConnectionPolicy::AlwaysWired);
        assert_eq!(policy("GE-MEDICAL-0000", "GE Patient Monitor"), ConnectionPolicy::AlwaysWired);
        assert_eq!(policy("LGTV-1234", "LG Smart TV, webOS"), ConnectionPolicy::Either);
        assert_eq!(policy("MACBOOK-NUC1", "MacBook Pro, macOS Sonoma"), ConnectionPolicy::MostlyWireless);
        // Zebra handhelds run Android.
        assert_eq!(policy("ZEBRA-SCANNER-AAAA", "Zebra Scanner"), ConnectionPolicy::AlwaysWired);
        assert_eq!(policy("SCANNER-AAAA", "Zebra TC52"), ConnectionPolicy::AlwaysWired);
    }

    #[test]
    fn iot_detection_ignores_suffix() {
        assert!(ClientTraits::new("SAMSUNG-TV-Q1W2", "Samsung Smart TV, Tizen OS").is_iot());
        assert!(!ClientTraits::new("IPHONE-XTV1", "iPhone, iOS 16").is_iot());
        assert!(ClientTraits::new("VOIP-0001", "Cisco IP Phone").is_iot());
    }

    #[test]
    fn generic_device_hosts_are_iot() {
        assert!(ClientTraits::new("DEVICE-AB12", "Windows PC, Windows 11").is_iot());
        assert!(ClientTraits::new("DEVICE-0F3C", "Unknown Device, Linux").is_iot());
        assert!(!ClientTraits::new("SURFACE-AB12", "Microsoft Surface, Windows 11").is_iot());
    }

    #[test]
    fn vlan_names_by_id() {
        assert_eq!(vlan_name_for_id("1"), "Default");
        assert_eq!(vlan_name_for_id("99"), "Management");
        assert_eq!(vlan_name_for_id("15"), "Corporate");
        assert_eq!(vlan_name_for_id("35"), "Guest");
        assert_eq!(vlan_name_for_id("65"), "IoT");
        assert_eq!(vlan_name_for_id("250"), "Data");
        assert_eq!(vlan_name_for_id("abc"), "VLAN abc");
    }
}
