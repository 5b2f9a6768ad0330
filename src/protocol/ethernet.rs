//! Ethernet II framing.

use etherparse::Ethernet2HeaderSlice;

use super::vlan;

/// Well-known EtherTypes.
pub mod ethertype {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const VLAN: u16 = 0x8100;
    pub const QINQ: u16 = 0x88A8;
    pub const QINQ_LEGACY: u16 = 0x9100;
    pub const IPV6: u16 = 0x86DD;
}

/// Strip the Ethernet header and any VLAN tags.
///
/// Returns the innermost EtherType and the bytes following it, or `None`
/// if the frame is too short.
pub fn strip_ethernet(frame: &[u8]) -> Option<(u16, &[u8])> {
    let eth = Ethernet2HeaderSlice::from_slice(frame).ok()?;
    let header_len = eth.slice().len();
    vlan::strip_vlan_tags(eth.ether_type().0, &frame[header_len..])
}
