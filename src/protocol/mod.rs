//! Protocol parsing module.
//!
//! This module provides:
//! - [`peel`], which walks Ethernet/VLAN/IP/UDP framing down to a DNS
//!   candidate payload
//! - The DNS message decoder ([`decode_query`])
//!
//! Peeling never fails: traffic that is not UDP on a DNS port, or is too
//! short to tell, is simply skipped.

pub mod dns;
pub mod ethernet;
pub mod ipv4;
pub mod ipv6;
pub mod udp;
pub mod vlan;

// Test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

pub use dns::{decode_query, DnsHeader, DnsQuestion, DNS_PORT};
pub use udp::UdpDatagram;

use crate::pcap::LinkType;
use ethernet::ethertype;

/// UDP payload of a frame sent to or from a DNS port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsPayload<'a> {
    pub data: &'a [u8],
    pub src_port: u16,
    pub dst_port: u16,
}

/// Whether frames of this link type can be peeled.
pub fn is_supported_link(link_type: LinkType) -> bool {
    link_type == LinkType::Ethernet
}

/// Locate the DNS candidate payload of a frame.
pub fn peel<'a>(link_type: LinkType, frame: &'a [u8], dns_ports: &[u16]) -> Option<DnsPayload<'a>> {
    if !is_supported_link(link_type) {
        return None;
    }

    let (ethertype, network) = ethernet::strip_ethernet(frame)?;
    let segment = match ethertype {
        ethertype::IPV4 => ipv4::udp_segment(network)?,
        ethertype::IPV6 => ipv6::udp_segment(network)?,
        _ => return None,
    };

    let udp = UdpDatagram::parse(segment)?;
    if !udp.uses_port(dns_ports) {
        return None;
    }

    Some(DnsPayload {
        data: udp.payload,
        src_port: udp.src_port,
        dst_port: udp.dst_port,
    })
}
