//! Raw frame representation.

/// Link-layer header type, as declared by the capture.
///
/// Only Ethernet frames are decoded further; the other variants exist so
/// skipped traffic can be reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    /// BSD loopback (0)
    Null,
    /// IEEE 802.3 Ethernet (1)
    Ethernet,
    /// Raw IP, no link header (101)
    Raw,
    /// Linux "cooked" capture v1 (113)
    LinuxSll,
    /// Raw IPv4 (228)
    Ipv4,
    /// Raw IPv6 (229)
    Ipv6,
    /// Linux "cooked" capture v2 (276)
    LinuxSll2,
    /// Anything else
    Other(u32),
}

impl LinkType {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => LinkType::Null,
            1 => LinkType::Ethernet,
            101 => LinkType::Raw,
            113 => LinkType::LinuxSll,
            228 => LinkType::Ipv4,
            229 => LinkType::Ipv6,
            276 => LinkType::LinuxSll2,
            other => LinkType::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            LinkType::Null => 0,
            LinkType::Ethernet => 1,
            LinkType::Raw => 101,
            LinkType::LinuxSll => 113,
            LinkType::Ipv4 => 228,
            LinkType::Ipv6 => 229,
            LinkType::LinuxSll2 => 276,
            LinkType::Other(code) => *code,
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Null => write!(f, "NULL"),
            LinkType::Ethernet => write!(f, "EN10MB"),
            LinkType::Raw => write!(f, "RAW"),
            LinkType::LinuxSll => write!(f, "LINUX_SLL"),
            LinkType::Ipv4 => write!(f, "IPV4"),
            LinkType::Ipv6 => write!(f, "IPV6"),
            LinkType::LinuxSll2 => write!(f, "LINUX_SLL2"),
            LinkType::Other(code) => write!(f, "LINKTYPE({code})"),
        }
    }
}

/// Capture timestamp split into whole seconds and sub-second units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub seconds: u64,
    /// Sub-second part, in `1 / units_per_second` steps.
    pub fraction: u64,
    /// Resolution of `fraction` (1_000_000 for microseconds).
    pub units_per_second: u64,
}

impl Timestamp {
    pub const MICROS: u64 = 1_000_000;
    pub const NANOS: u64 = 1_000_000_000;

    /// Build from a raw tick count at the given resolution.
    pub fn from_ticks(ticks: u64, units_per_second: u64) -> Self {
        let units = units_per_second.max(1);
        Self {
            seconds: ticks / units,
            fraction: ticks % units,
            units_per_second: units,
        }
    }
}

/// One captured frame, borrowing its bytes from the capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame<'a> {
    /// Frame number (1-indexed, matching Wireshark).
    pub frame_number: u64,

    /// Capture timestamp.
    pub timestamp: Timestamp,

    /// Captured length (may be less than original).
    pub captured_length: u32,

    /// Original length on the wire.
    pub original_length: u32,

    /// Link layer type of the interface the frame was captured on.
    pub link_type: LinkType,

    /// Captured bytes; exactly `captured_length` long.
    pub data: &'a [u8],
}

impl RawFrame<'_> {
    /// Check if the packet was truncated during capture.
    pub fn is_truncated(&self) -> bool {
        self.captured_length < self.original_length
    }
}
