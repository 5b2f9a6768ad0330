//! Capture format detection from magic bytes.

use crate::error::PcapError;
use crate::io::Endian;

/// PCAPNG Section Header Block type. Palindromic, so it reads the same in
/// either byte order.
pub const PCAPNG_MAGIC: u32 = 0x0a0d0d0a;

/// Format of the capture file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcapFormat {
    /// Classic PCAP (little-endian, microseconds)
    LegacyLeMicro,
    /// Classic PCAP (big-endian, microseconds)
    LegacyBeMicro,
    /// Classic PCAP (little-endian, nanoseconds)
    LegacyLeNano,
    /// Classic PCAP (big-endian, nanoseconds)
    LegacyBeNano,
    /// PCAPNG format
    PcapNg,
}

impl PcapFormat {
    /// Detect the capture format from the first four bytes of a file.
    ///
    /// Magic bytes are stored as written by the capturing host, so a file
    /// written on a little-endian machine starts with `d4 c3 b2 a1`.
    pub fn detect(data: &[u8]) -> Result<Self, PcapError> {
        if data.len() < 4 {
            return Err(PcapError::TruncatedCapture {
                offset: 0,
                needed: 4,
                available: data.len(),
            });
        }

        let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);

        match magic {
            0xa1b2c3d4 => Ok(PcapFormat::LegacyLeMicro),
            0xd4c3b2a1 => Ok(PcapFormat::LegacyBeMicro),
            0xa1b23c4d => Ok(PcapFormat::LegacyLeNano),
            0x4d3cb2a1 => Ok(PcapFormat::LegacyBeNano),
            PCAPNG_MAGIC => Ok(PcapFormat::PcapNg),
            _ => Err(PcapError::UnsupportedFormat { magic }),
        }
    }

    /// Whether this is a PCAPNG format.
    pub fn is_pcapng(&self) -> bool {
        matches!(self, PcapFormat::PcapNg)
    }

    /// Whether this is a legacy PCAP format.
    pub fn is_legacy(&self) -> bool {
        !self.is_pcapng()
    }

    /// Byte order of a legacy file. PCAPNG declares byte order per section,
    /// so `None` is returned for it.
    pub fn legacy_endian(&self) -> Option<Endian> {
        match self {
            PcapFormat::LegacyLeMicro | PcapFormat::LegacyLeNano => Some(Endian::Little),
            PcapFormat::LegacyBeMicro | PcapFormat::LegacyBeNano => Some(Endian::Big),
            PcapFormat::PcapNg => None,
        }
    }

    /// Whether legacy record timestamps carry nanoseconds.
    pub fn is_nanosecond(&self) -> bool {
        matches!(self, PcapFormat::LegacyLeNano | PcapFormat::LegacyBeNano)
    }
}

impl std::fmt::Display for PcapFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PcapFormat::LegacyLeMicro => "pcap (little-endian, usec)",
            PcapFormat::LegacyBeMicro => "pcap (big-endian, usec)",
            PcapFormat::LegacyLeNano => "pcap (little-endian, nsec)",
            PcapFormat::LegacyBeNano => "pcap (big-endian, nsec)",
            PcapFormat::PcapNg => "pcapng",
        };
        f.write_str(name)
    }
}
