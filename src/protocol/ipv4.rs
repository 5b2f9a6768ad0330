//! IPv4 header handling.

use etherparse::Ipv4HeaderSlice;

use super::udp::IP_PROTO_UDP;

/// Return the UDP segment carried by an IPv4 packet.
///
/// Non-UDP packets and fragments other than the first are skipped. The
/// total length field bounds the result so Ethernet padding is dropped;
/// if the packet was cut short by the snapshot length, whatever was
/// captured is returned.
pub fn udp_segment(data: &[u8]) -> Option<&[u8]> {
    let ipv4 = Ipv4HeaderSlice::from_slice(data).ok()?;

    if ipv4.protocol().0 != IP_PROTO_UDP {
        return None;
    }
    if ipv4.fragments_offset().value() != 0 {
        return None;
    }

    let header_len = ipv4.slice().len();
    let total_len = ipv4.total_len() as usize;
    if total_len < header_len {
        return None;
    }

    let end = total_len.min(data.len());
    Some(&data[header_len..end])
}
