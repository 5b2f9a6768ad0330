//! IEEE 802.1Q / 802.1ad VLAN tags.

use super::ethernet::ethertype;

/// Maximum number of stacked tags that are skipped (QinQ).
pub const MAX_VLAN_TAGS: usize = 2;

/// Length of one tag after the TPID: TCI (2) + inner EtherType (2).
const TAG_LEN: usize = 4;

/// Whether `ethertype` is a VLAN tag protocol identifier.
pub fn is_vlan_tpid(ethertype: u16) -> bool {
    matches!(
        ethertype,
        ethertype::VLAN | ethertype::QINQ | ethertype::QINQ_LEGACY
    )
}

/// Skip up to [`MAX_VLAN_TAGS`] tags.
///
/// `ethertype` is the type field already read from the Ethernet header and
/// `data` the bytes after it. Returns the real EtherType and its payload.
/// A frame with more stacked tags than allowed, or a truncated tag, is
/// rejected.
pub fn strip_vlan_tags(mut ethertype: u16, mut data: &[u8]) -> Option<(u16, &[u8])> {
    let mut tags = 0;
    while is_vlan_tpid(ethertype) {
        if tags == MAX_VLAN_TAGS || data.len() < TAG_LEN {
            return None;
        }
        // TCI (priority, DEI, VLAN id) is not needed
        ethertype = u16::from_be_bytes([data[2], data[3]]);
        data = &data[TAG_LEN..];
        tags += 1;
    }
    Some((ethertype, data))
}
