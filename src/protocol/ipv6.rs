//! IPv6 header and extension header handling.

use etherparse::Ipv6HeaderSlice;

use super::udp::IP_PROTO_UDP;

/// IPv6 extension header types that are walked over.
pub mod ext {
    pub const HOP_BY_HOP: u8 = 0;
    pub const ROUTING: u8 = 43;
    pub const FRAGMENT: u8 = 44;
    pub const AUTHENTICATION: u8 = 51;
    pub const DESTINATION_OPTIONS: u8 = 60;
}

const FIXED_HEADER_LEN: usize = 40;

/// Return the UDP segment carried by an IPv6 packet.
///
/// Extension headers are skipped best effort. Fragments other than the
/// first are skipped. A non-zero payload length bounds the result.
pub fn udp_segment(data: &[u8]) -> Option<&[u8]> {
    let ipv6 = Ipv6HeaderSlice::from_slice(data).ok()?;

    let payload_len = ipv6.payload_length() as usize;
    let mut payload = &data[FIXED_HEADER_LEN..];
    if payload_len != 0 && payload_len < payload.len() {
        payload = &payload[..payload_len];
    }

    let mut next_header = ipv6.next_header().0;
    loop {
        let ext_len = match next_header {
            ext::HOP_BY_HOP | ext::ROUTING | ext::DESTINATION_OPTIONS => {
                (*payload.get(1)? as usize + 1) * 8
            }
            ext::FRAGMENT => {
                let field = u16::from_be_bytes([*payload.get(2)?, *payload.get(3)?]);
                if field >> 3 != 0 {
                    return None;
                }
                8
            }
            ext::AUTHENTICATION => (*payload.get(1)? as usize + 2) * 4,
            _ => break,
        };
        if payload.len() < ext_len {
            return None;
        }
        next_header = payload[0];
        payload = &payload[ext_len..];
    }

    (next_header == IP_PROTO_UDP).then_some(payload)
}
