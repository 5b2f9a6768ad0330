//! Fuzz target for the DNS message decoder.
//!
//! Exercises header parsing, label decoding, and compression pointers
//! (out-of-range targets, loops, reserved label types).

#![no_main]

use libfuzzer_sys::fuzz_target;
use pcapdns::protocol::{decode_query, DnsHeader};

fuzz_target!(|data: &[u8]| {
    let header = DnsHeader::parse(data);

    match decode_query(data) {
        Ok(Some(question)) => {
            assert!(!question.name.is_empty());
            assert!(header.map(|h| h.is_query()).unwrap_or(false));
        }
        Ok(None) => assert!(header.is_ok()),
        Err(_) => {}
    }
});
