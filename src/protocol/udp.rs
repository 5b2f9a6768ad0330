//! UDP header handling.

use etherparse::UdpHeaderSlice;

/// IP protocol number for UDP.
pub const IP_PROTO_UDP: u8 = 17;

const HEADER_LEN: usize = 8;

/// A UDP datagram split into ports and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpDatagram<'a> {
    pub src_port: u16,
    pub dst_port: u16,
    pub payload: &'a [u8],
}

impl<'a> UdpDatagram<'a> {
    /// Parse the 8-byte header. The length field bounds the payload when it
    /// is consistent with the captured bytes.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let udp = UdpHeaderSlice::from_slice(data).ok()?;

        let length = udp.length() as usize;
        let end = if (HEADER_LEN..=data.len()).contains(&length) {
            length
        } else {
            data.len()
        };

        Some(Self {
            src_port: udp.source_port(),
            dst_port: udp.destination_port(),
            payload: &data[HEADER_LEN..end],
        })
    }

    /// Whether either port is in `ports`.
    pub fn uses_port(&self, ports: &[u16]) -> bool {
        ports.contains(&self.src_port) || ports.contains(&self.dst_port)
    }
}
