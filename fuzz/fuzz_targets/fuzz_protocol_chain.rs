//! Fuzz target for Ethernet/VLAN/IP/UDP peeling.
//!
//! Arbitrary frames are peeled with every link type the peeler knows about;
//! only Ethernet should ever yield a payload.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pcapdns::pcap::LinkType;
use pcapdns::protocol::{decode_query, peel};

fuzz_target!(|data: &[u8]| {
    let ports = [53, 5353];

    if let Some(payload) = peel(LinkType::Ethernet, data, &ports) {
        assert!(payload.data.len() <= data.len());
        let _ = decode_query(payload.data);
    }

    for link_type in [LinkType::LinuxSll, LinkType::Raw, LinkType::Null] {
        assert!(peel(link_type, data, &ports).is_none());
    }
});
