//! Shared builders for integration tests: synthetic frames and capture
//! files in every supported container flavour.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::GzEncoder;
use tempfile::NamedTempFile;

/// Encode a dotted name as DNS labels.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Build a DNS message with one question using pre-encoded name bytes.
pub fn dns_message(flags: u16, qdcount: u16, name: &[u8]) -> Vec<u8> {
    let mut msg = Vec::new();
    msg.extend_from_slice(&[0x12, 0x34]); // Transaction ID
    msg.extend_from_slice(&flags.to_be_bytes()); // Flags
    msg.extend_from_slice(&qdcount.to_be_bytes()); // Questions
    msg.extend_from_slice(&[0x00, 0x00]); // Answer RRs
    msg.extend_from_slice(&[0x00, 0x00]); // Authority RRs
    msg.extend_from_slice(&[0x00, 0x00]); // Additional RRs
    msg.extend_from_slice(name);
    msg.extend_from_slice(&[0x00, 0x01]); // Type: A
    msg.extend_from_slice(&[0x00, 0x01]); // Class: IN
    msg
}

/// Standard query (RD set) for `name`.
pub fn dns_query(name: &str) -> Vec<u8> {
    dns_message(0x0100, 1, &encode_name(name))
}

/// Wrap a UDP payload in Ethernet/IPv4/UDP.
pub fn ipv4_udp_frame(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::new();

    // Ethernet header
    packet.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]); // dst MAC
    packet.extend_from_slice(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]); // src MAC
    packet.extend_from_slice(&[0x08, 0x00]); // ethertype: IPv4

    // IPv4 header
    let total_len = (20 + 8 + payload.len()) as u16;
    packet.push(0x45); // Version 4, IHL 5
    packet.push(0x00);
    packet.extend_from_slice(&total_len.to_be_bytes()); // Total length
    packet.extend_from_slice(&[0x12, 0x34]); // Identification
    packet.extend_from_slice(&[0x00, 0x00]); // No fragmentation
    packet.push(0x40); // TTL: 64
    packet.push(0x11); // Protocol: UDP
    packet.extend_from_slice(&[0x00, 0x00]); // Checksum
    packet.extend_from_slice(&[10, 0, 0, 1]); // Src IP
    packet.extend_from_slice(&[8, 8, 8, 8]); // Dst IP

    // UDP header
    packet.extend_from_slice(&src_port.to_be_bytes());
    packet.extend_from_slice(&dst_port.to_be_bytes());
    packet.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes()); // Length
    packet.extend_from_slice(&[0x00, 0x00]); // Checksum

    packet.extend_from_slice(payload);
    packet
}

/// Wrap a UDP payload in Ethernet/IPv6/UDP.
pub fn ipv6_udp_frame(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::new();

    // Ethernet header
    packet.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]); // dst MAC
    packet.extend_from_slice(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]); // src MAC
    packet.extend_from_slice(&[0x86, 0xdd]); // ethertype: IPv6

    // IPv6 header
    packet.extend_from_slice(&[0x60, 0x00, 0x00, 0x00]); // Version 6
    packet.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes()); // Payload length
    packet.push(0x11); // Next header: UDP
    packet.push(0x40); // Hop limit
    packet.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]); // Src
    packet.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2]); // Dst

    // UDP header
    packet.extend_from_slice(&src_port.to_be_bytes());
    packet.extend_from_slice(&dst_port.to_be_bytes());
    packet.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    packet.extend_from_slice(&[0x00, 0x00]);

    packet.extend_from_slice(payload);
    packet
}

/// Ethernet/IPv4/UDP frame carrying a query for `name`.
pub fn query_frame(name: &str) -> Vec<u8> {
    ipv4_udp_frame(49152, 53, &dns_query(name))
}

/// Ethernet/IPv4/TCP SYN to port 53.
pub fn tcp_frame() -> Vec<u8> {
    let mut packet = Vec::new();
    packet.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff]); // dst MAC
    packet.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]); // src MAC
    packet.extend_from_slice(&[0x08, 0x00]); // ethertype: IPv4
    packet.push(0x45); // Version 4, IHL 5
    packet.push(0x00);
    packet.extend_from_slice(&[0x00, 0x28]); // Total length: 40
    packet.extend_from_slice(&[0x00, 0x01]); // Identification
    packet.extend_from_slice(&[0x40, 0x00]); // Don't fragment
    packet.push(0x40); // TTL: 64
    packet.push(0x06); // Protocol: TCP
    packet.extend_from_slice(&[0x00, 0x00]); // Checksum
    packet.extend_from_slice(&[192, 168, 1, 100]); // Src IP
    packet.extend_from_slice(&[192, 168, 1, 200]); // Dst IP
    packet.extend_from_slice(&[0x30, 0x39]); // Src port: 12345
    packet.extend_from_slice(&[0x00, 0x35]); // Dst port: 53
    packet.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]); // Seq: 1
    packet.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Ack: 0
    packet.push(0x50); // Data offset: 5
    packet.push(0x02); // Flags: SYN
    packet.extend_from_slice(&[0xff, 0xff]); // Window
    packet.extend_from_slice(&[0x00, 0x00]); // Checksum
    packet.extend_from_slice(&[0x00, 0x00]); // Urgent pointer
    packet
}

/// Legacy PCAP flavour.
#[derive(Debug, Clone, Copy)]
pub struct LegacyFlavour {
    pub big_endian: bool,
    pub nanos: bool,
}

impl LegacyFlavour {
    pub const LE_MICRO: Self = Self {
        big_endian: false,
        nanos: false,
    };

    fn u16(&self, v: u16) -> [u8; 2] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    fn u32(&self, v: u32) -> [u8; 4] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }
}

/// Build a legacy PCAP file with the given link type.
pub fn legacy_pcap(flavour: LegacyFlavour, link_type: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let magic = if flavour.nanos { 0xa1b23c4d } else { 0xa1b2c3d4 };
    let mut data = Vec::new();
    data.extend_from_slice(&flavour.u32(magic));
    data.extend_from_slice(&flavour.u16(2)); // version major
    data.extend_from_slice(&flavour.u16(4)); // version minor
    data.extend_from_slice(&flavour.u32(0)); // thiszone
    data.extend_from_slice(&flavour.u32(0)); // sigfigs
    data.extend_from_slice(&flavour.u32(65535)); // snaplen
    data.extend_from_slice(&flavour.u32(link_type));

    for (i, frame) in frames.iter().enumerate() {
        data.extend_from_slice(&flavour.u32(1_700_000_000 + i as u32)); // ts_sec
        data.extend_from_slice(&flavour.u32(1000)); // ts_frac
        data.extend_from_slice(&flavour.u32(frame.len() as u32)); // incl_len
        data.extend_from_slice(&flavour.u32(frame.len() as u32)); // orig_len
        data.extend_from_slice(frame);
    }
    data
}

/// Little-endian Ethernet microsecond PCAP.
pub fn ethernet_pcap(frames: &[Vec<u8>]) -> Vec<u8> {
    legacy_pcap(LegacyFlavour::LE_MICRO, 1, frames)
}

fn pcapng_block(block_type: u32, body: &[u8]) -> Vec<u8> {
    let padded = (body.len() + 3) & !3;
    let total = (12 + padded) as u32;
    let mut block = Vec::new();
    block.extend_from_slice(&block_type.to_le_bytes());
    block.extend_from_slice(&total.to_le_bytes());
    block.extend_from_slice(body);
    block.resize(8 + padded, 0);
    block.extend_from_slice(&total.to_le_bytes());
    block
}

/// Little-endian PCAPNG: SHB, one Ethernet IDB, then one packet block per
/// frame. Every third frame uses a Simple Packet Block, and an unknown block
/// is inserted before the first packet.
pub fn ethernet_pcapng(frames: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();

    // Section Header Block
    let mut shb = Vec::new();
    shb.extend_from_slice(&0x1a2b3c4du32.to_le_bytes()); // byte-order magic
    shb.extend_from_slice(&1u16.to_le_bytes()); // major
    shb.extend_from_slice(&0u16.to_le_bytes()); // minor
    shb.extend_from_slice(&(-1i64).to_le_bytes()); // section length
    data.extend(pcapng_block(0x0a0d0d0a, &shb));

    // Interface Description Block
    let mut idb = Vec::new();
    idb.extend_from_slice(&1u16.to_le_bytes()); // LINKTYPE_ETHERNET
    idb.extend_from_slice(&0u16.to_le_bytes()); // reserved
    idb.extend_from_slice(&0u32.to_le_bytes()); // snaplen: unlimited
    data.extend(pcapng_block(1, &idb));

    // Unknown (custom) block
    data.extend(pcapng_block(0x0000_0bad, &[0xde, 0xad, 0xbe, 0xef, 0x01]));

    for (i, frame) in frames.iter().enumerate() {
        if i % 3 == 2 {
            let mut spb = Vec::new();
            spb.extend_from_slice(&(frame.len() as u32).to_le_bytes()); // original length
            spb.extend_from_slice(frame);
            data.extend(pcapng_block(3, &spb));
        } else {
            let ts: u64 = 1_700_000_000_000_000 + i as u64;
            let mut epb = Vec::new();
            epb.extend_from_slice(&0u32.to_le_bytes()); // interface id
            epb.extend_from_slice(&((ts >> 32) as u32).to_le_bytes());
            epb.extend_from_slice(&(ts as u32).to_le_bytes());
            epb.extend_from_slice(&(frame.len() as u32).to_le_bytes()); // captured
            epb.extend_from_slice(&(frame.len() as u32).to_le_bytes()); // original
            epb.extend_from_slice(frame);
            data.extend(pcapng_block(6, &epb));
        }
    }
    data
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Write bytes to a temp file with the given suffix.
pub fn write_temp(suffix: &str, data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}
