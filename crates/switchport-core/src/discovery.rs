// ── Physical port discovery ──
//
// Switches expose far more interfaces than front-panel ports: VLAN SVIs,
// tunnels, loopbacks, CPU ports, port-channels. Discovery walks ifDescr
// in ifIndex order, drops everything that isn't a physical port, and
// numbers what's left 1..N the way the card draws them. SFP detection
// uses ifType first, then vendor naming conventions.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::counters::oids;
use crate::error::CoreError;

/// ifType values for fiber/optical interfaces.
const SFP_IF_TYPES: [u32; 4] = [56, 161, 171, 172];

const VIRTUAL_SUBSTRINGS: [&str; 3] = ["cpu interface", "link aggregate", "logical-int"];

const MANAGEMENT_SUBSTRINGS: [&str; 3] = ["mgmt", "management", "console"];

const PHYSICAL_HINTS: [&str; 13] = [
    "port", "eth", "ge.", "swp", "xe.", "lan", "wan", "sfp", "gigabit", "fasteth", "10g",
    "slot:", "level",
];

const SFP_NAME_HINTS: [&str; 13] = [
    "sfp", "fiber", "fibre", "optical", "1000base-x", "10gbase-", "mini-gbic", "sfp+", "sfp28",
    "25g", "40g", "100g", "qsfp",
];

const NON_VENDOR_WORDS: [&str; 5] = ["version", "software", "hardware", "release", "build"];

static VIRTUAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:vlan|tun|gre|imq|ifb|erspan|ip_vti|ip6_vti|ip6tnl|ip6gre|wds|loopback|po\d+)",
    )
    .expect("valid regex")
});

static VIRTUAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:lo|br|dummy|wlan|ath|wifi|wl|bond|veth|bridge|virtual|null|sit|ipip|bcmsw|spu)\b",
    )
    .expect("valid regex")
});

static MGMT_ZERO_SLOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ethernet0/0$").expect("valid regex"));

static SHORT_PORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[pg]\d+$").expect("valid regex"));

static CISCO_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"gigabitethernet(\d+)/(\d+)/(\d+)").expect("valid regex")
});

static SLOT_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"port:\s*(\d+)").expect("valid regex"));

static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)$").expect("valid regex"));

static PAREN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("valid regex"));

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("valid regex"));

static DUMP_STANDARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9:.\-]+)\s*=\s*(\w+):\s*(.*)$").expect("valid regex")
});

static DUMP_KEYED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^OID=([\d.\-]+),\s*Type=(\w+),\s*Value=(.*)$").expect("valid regex")
});

/// How an interface was identified as SFP or copper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SfpDetection {
    NetgearTenGig,
    CiscoModule,
    CiscoFixedCopper,
    IfType,
    NameKeyword,
    DefaultCopper,
}

/// A physical port found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredPort {
    /// 1-based position on the card.
    pub logical_port: u32,
    pub if_index: u32,
    pub name: String,
    pub if_descr: String,
    pub is_sfp: bool,
    pub detection: SfpDetection,
}

/// Discovery result for one switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub manufacturer: String,
    pub ports: Vec<DiscoveredPort>,
}

impl Discovery {
    pub fn copper_count(&self) -> usize {
        self.ports.iter().filter(|p| !p.is_sfp).count()
    }

    pub fn sfp_count(&self) -> usize {
        self.ports.len() - self.copper_count()
    }

    /// First logical port of the trailing SFP block, if the SFP ports are
    /// all at the end.
    pub fn sfp_start_port(&self) -> Option<u32> {
        let first = self.ports.iter().position(|p| p.is_sfp)?;
        self.ports[first..]
            .iter()
            .all(|p| p.is_sfp)
            .then(|| self.ports[first].logical_port)
    }
}

/// Vendor name from sysDescr: its first word, unless that's obviously not one.
pub fn extract_manufacturer(sys_descr: &str) -> String {
    let trimmed = sys_descr.trim();
    let first = trimmed.split_whitespace().next().unwrap_or_default();
    if first.is_empty()
        || trimmed.eq_ignore_ascii_case("unknown")
        || NON_VENDOR_WORDS.contains(&first.to_ascii_lowercase().as_str())
    {
        return "Unknown".into();
    }
    first.trim_end_matches(',').to_owned()
}

/// Tunnels, bridges, VLAN interfaces and the like.
pub fn is_virtual_interface(descr_lower: &str) -> bool {
    VIRTUAL_SUBSTRINGS.iter().any(|s| descr_lower.contains(s))
        || VIRTUAL_PREFIX.is_match(descr_lower)
        || VIRTUAL_WORD.is_match(descr_lower)
}

/// Front-panel data ports; management and console ports don't count.
///
/// A purely numeric description is physical unless its ifIndex is in the
/// range switches use for virtual interfaces (1000+).
pub fn is_physical_interface(descr_lower: &str, descr_clean: &str, if_index: u32) -> bool {
    if MANAGEMENT_SUBSTRINGS.iter().any(|s| descr_lower.contains(s))
        || MGMT_ZERO_SLOT.is_match(descr_lower)
    {
        return false;
    }

    if is_all_digits(descr_clean) {
        return if_index < 1000;
    }

    PHYSICAL_HINTS.iter().any(|s| descr_lower.contains(s))
        || SHORT_PORT_NAME.is_match(descr_lower)
        || (descr_lower.starts_with("slot:") && descr_lower.contains("port:"))
}

/// ifType from a raw value such as `"6"` or `"ethernetCsmacd(6)"`. 0 if absent.
pub fn parse_if_type(raw: &str) -> u32 {
    PAREN_NUMBER
        .captures(raw)
        .or_else(|| FIRST_NUMBER.captures(raw))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

pub fn detect_sfp(if_type: u32, descr_lower: &str) -> (bool, SfpDetection) {
    if descr_lower.contains("10g - level") {
        return (true, SfpDetection::NetgearTenGig);
    }

    // GigabitEthernet<switch>/<module>/<port>: module 0 is the fixed copper block
    if let Some(caps) = CISCO_SLOT.captures(descr_lower) {
        let module: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        return if module > 0 {
            (true, SfpDetection::CiscoModule)
        } else {
            (false, SfpDetection::CiscoFixedCopper)
        };
    }

    if SFP_IF_TYPES.contains(&if_type) {
        return (true, SfpDetection::IfType);
    }

    if SFP_NAME_HINTS.iter().any(|s| descr_lower.contains(s))
        || descr_lower.contains("fortygigabit")
    {
        return (true, SfpDetection::NameKeyword);
    }

    (false, SfpDetection::DefaultCopper)
}

/// Short display name for a discovered port.
pub fn friendly_port_name(descr_clean: &str, descr_lower: &str, logical_port: u32) -> String {
    if descr_lower.contains("slot:") && descr_lower.contains("port:") {
        if let Some(num) = SLOT_PORT.captures(descr_lower).and_then(|c| c.get(1)) {
            return format!("Port {}", num.as_str());
        }
    }

    if is_all_digits(descr_clean) {
        return format!("Port {descr_clean}");
    }

    if descr_lower.contains("gigabitethernet") {
        return TRAILING_DIGITS
            .captures(descr_lower)
            .and_then(|c| c.get(1))
            .map_or_else(|| descr_clean.to_owned(), |num| format!("Port {}", num.as_str()));
    }

    if descr_lower.contains("port ") {
        return descr_clean.to_owned();
    }

    if ["eth", "ge.", "swp", "xe."]
        .iter()
        .any(|prefix| descr_lower.starts_with(prefix))
    {
        return descr_clean.to_owned();
    }

    format!("Port {logical_port}")
}

/// Physical ports from ifDescr and ifType tables, both keyed by ifIndex.
pub fn discover_physical_ports(
    sys_descr: &str,
    descr: &BTreeMap<u32, String>,
    types: &BTreeMap<u32, u32>,
) -> Discovery {
    let mut ports = Vec::new();
    let mut logical_port = 1;

    for (&if_index, raw) in descr {
        let descr_clean = raw.trim();
        let descr_lower = descr_clean.to_lowercase();

        if is_virtual_interface(&descr_lower)
            || !is_physical_interface(&descr_lower, descr_clean, if_index)
        {
            tracing::trace!(if_index, descr = descr_clean, "skipping interface");
            continue;
        }

        let if_type = types.get(&if_index).copied().unwrap_or(0);
        let (is_sfp, detection) = detect_sfp(if_type, &descr_lower);

        ports.push(DiscoveredPort {
            logical_port,
            if_index,
            name: friendly_port_name(descr_clean, &descr_lower, logical_port),
            if_descr: descr_clean.to_owned(),
            is_sfp,
            detection,
        });
        logical_port += 1;
    }

    tracing::debug!(
        interfaces = descr.len(),
        physical = ports.len(),
        "port discovery finished"
    );

    Discovery {
        manufacturer: extract_manufacturer(sys_descr),
        ports,
    }
}

/// Tables pulled out of a text SNMP dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnmpDump {
    pub sys_descr: Option<String>,
    pub descr: BTreeMap<u32, String>,
    pub types: BTreeMap<u32, u32>,
}

/// Parse `snmpwalk`-style output.
///
/// Accepts `OID = TYPE: value` and `OID=..., Type=..., Value=...` lines,
/// symbolic `IF-MIB::` names and `iso.` prefixes. Other lines are ignored.
pub fn parse_snmp_dump(text: &str) -> SnmpDump {
    let descr_prefix = format!("{}.", oids::IF_DESCR);
    let type_prefix = format!("{}.", oids::IF_TYPE);
    let mut dump = SnmpDump::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some((oid, value)) = split_dump_line(line) else {
            continue;
        };
        let oid = normalize_oid(oid);
        let value = value.trim().trim_matches('"').trim();

        if oid == oids::SYS_DESCR || oid.contains("sysDescr") {
            dump.sys_descr = Some(value.to_owned());
        } else if let Some(index) = oid.strip_prefix(&descr_prefix).and_then(|i| i.parse().ok()) {
            dump.descr.insert(index, value.to_owned());
        } else if let Some(index) = oid.strip_prefix(&type_prefix).and_then(|i| i.parse().ok()) {
            dump.types.insert(index, parse_if_type(value));
        }
    }

    dump
}

/// Discovery straight from dump text.
pub fn discover_from_dump(text: &str) -> Result<Discovery, CoreError> {
    let dump = parse_snmp_dump(text);
    if dump.descr.is_empty() {
        return Err(CoreError::NoInterfaces);
    }
    Ok(discover_physical_ports(
        dump.sys_descr.as_deref().unwrap_or("Unknown"),
        &dump.descr,
        &dump.types,
    ))
}

fn split_dump_line(line: &str) -> Option<(&str, &str)> {
    DUMP_STANDARD
        .captures(line)
        .or_else(|| DUMP_KEYED.captures(line))
        .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(3)?.as_str())))
}

fn normalize_oid(oid: &str) -> String {
    let oid = if let Some(index) = oid.strip_prefix("IF-MIB::ifDescr.") {
        format!("{}.{index}", oids::IF_DESCR)
    } else if let Some(index) = oid.strip_prefix("IF-MIB::ifType.") {
        format!("{}.{index}", oids::IF_TYPE)
    } else if let Some(rest) = oid.strip_prefix("iso.") {
        format!("1.{rest}")
    } else {
        oid.to_owned()
    };
    oid.trim_start_matches('.').to_owned()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn manufacturer_from_sys_descr() {
        assert_eq!(extract_manufacturer("H3C S3100-26C, Software Version 5.20"), "H3C");
        assert_eq!(extract_manufacturer("Version 1.2"), "Unknown");
        assert_eq!(extract_manufacturer("Unknown"), "Unknown");
        assert_eq!(extract_manufacturer(""), "Unknown");
    }

    #[test]
    fn virtual_interfaces() {
        for descr in [
            "vlan1",
            "loopback0",
            "po1",
            "cpu interface",
            "bridge",
            "veth pair",
            "link aggregate 1",
            "tunnel0",
        ] {
            assert!(is_virtual_interface(descr), "{descr} should be virtual");
        }
        for descr in ["port 1", "gigabitethernet1/0/1", "eth0", "slot: 0 port: 3", "sfp 25"] {
            assert!(!is_virtual_interface(descr), "{descr} should not be virtual");
        }
    }

    #[test]
    fn physical_interfaces() {
        assert!(is_physical_interface("port 1", "Port 1", 1));
        assert!(is_physical_interface("g12", "g12", 12));
        assert!(is_physical_interface("7", "7", 7));
        assert!(!is_physical_interface("7", "7", 1007));
        assert!(!is_physical_interface("mgmt0", "mgmt0", 100));
        assert!(!is_physical_interface("gigabitethernet0/0", "GigabitEthernet0/0", 1));
        assert!(is_physical_interface("gigabitethernet1/0/1", "GigabitEthernet1/0/1", 10101));
        assert!(!is_physical_interface("null0", "Null0", 3));
    }

    #[test]
    fn if_type_shapes() {
        assert_eq!(parse_if_type("6"), 6);
        assert_eq!(parse_if_type("ethernetCsmacd(6)"), 6);
        assert_eq!(parse_if_type("INTEGER: fibreChannel(56)"), 56);
        assert_eq!(parse_if_type("garbage"), 0);
    }

    #[test]
    fn sfp_detection_order() {
        assert_eq!(detect_sfp(6, "10g - level"), (true, SfpDetection::NetgearTenGig));
        assert_eq!(
            detect_sfp(6, "gigabitethernet1/1/2"),
            (true, SfpDetection::CiscoModule)
        );
        assert_eq!(
            detect_sfp(56, "gigabitethernet1/0/2"),
            (false, SfpDetection::CiscoFixedCopper)
        );
        assert_eq!(detect_sfp(161, "port 25"), (true, SfpDetection::IfType));
        assert_eq!(detect_sfp(6, "sfp+ 26"), (true, SfpDetection::NameKeyword));
        assert_eq!(detect_sfp(6, "port 3"), (false, SfpDetection::DefaultCopper));
    }

    #[test]
    fn friendly_names() {
        assert_eq!(friendly_port_name("Slot: 0 Port: 7", "slot: 0 port: 7", 1), "Port 7");
        assert_eq!(friendly_port_name("12", "12", 1), "Port 12");
        assert_eq!(
            friendly_port_name("GigabitEthernet1/0/5", "gigabitethernet1/0/5", 1),
            "Port 5"
        );
        assert_eq!(friendly_port_name("Port 3 Uplink", "port 3 uplink", 9), "Port 3 Uplink");
        assert_eq!(friendly_port_name("swp4", "swp4", 4), "swp4");
        assert_eq!(friendly_port_name("LAN", "lan", 6), "Port 6");
    }

    const DUMP: &str = r#"
SNMPv2-MIB::sysDescr.0 = STRING: "H3C S3100-26C, Software Version 5.20"
IF-MIB::ifDescr.1 = STRING: Ethernet1/0/1
IF-MIB::ifDescr.2 = STRING: Ethernet1/0/2
IF-MIB::ifDescr.25 = STRING: GigabitEthernet1/1/1
IF-MIB::ifDescr.100 = STRING: Vlan-interface1
iso.3.6.1.2.1.2.2.1.2.200 = STRING: "NULL0"
IF-MIB::ifType.1 = INTEGER: ethernetCsmacd(6)
IF-MIB::ifType.2 = INTEGER: ethernetCsmacd(6)
IF-MIB::ifType.25 = INTEGER: ethernetCsmacd(6)
OID=.1.3.6.1.2.1.2.2.1.2.26, Type=OctetString, Value=SFP 26
OID=.1.3.6.1.2.1.2.2.1.3.26, Type=Integer, Value=56
this line is noise
"#;

    #[test]
    fn dump_parsing() {
        let dump = parse_snmp_dump(DUMP);
        assert_eq!(
            dump.sys_descr.as_deref(),
            Some("H3C S3100-26C, Software Version 5.20")
        );
        assert_eq!(dump.descr.len(), 6);
        assert_eq!(dump.descr.get(&200).map(String::as_str), Some("NULL0"));
        assert_eq!(dump.types.get(&26), Some(&56));
    }

    #[test]
    fn discovery_from_dump() {
        let discovery = discover_from_dump(DUMP).expect("dump has interfaces");
        assert_eq!(discovery.manufacturer, "H3C");

        let names: Vec<&str> = discovery.ports.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ethernet1/0/1", "Ethernet1/0/2", "Port 1", "Port 4"]);

        let logical: Vec<u32> = discovery.ports.iter().map(|p| p.logical_port).collect();
        assert_eq!(logical, vec![1, 2, 3, 4]);

        assert_eq!(discovery.copper_count(), 2);
        assert_eq!(discovery.sfp_count(), 2);
        assert_eq!(discovery.sfp_start_port(), Some(3));
    }

    #[test]
    fn empty_dump_is_an_error() {
        assert!(matches!(
            discover_from_dump("nothing here"),
            Err(CoreError::NoInterfaces)
        ));
    }
}
