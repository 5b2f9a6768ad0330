//! Test utilities for protocol parsing.
//!
//! Provides builders for constructing DNS-over-UDP test frames layer by
//! layer.

use super::dns::record_type;
use super::ethernet::ethertype;
use super::udp::IP_PROTO_UDP;

/// Builder for constructing Ethernet frames, optionally VLAN tagged.
#[derive(Debug, Clone)]
pub struct EthernetBuilder {
    src_mac: [u8; 6],
    dst_mac: [u8; 6],
    vlan_tags: Vec<(u16, u16)>,
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for EthernetBuilder {
    fn default() -> Self {
        Self {
            src_mac: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            dst_mac: [0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            vlan_tags: Vec::new(),
            ethertype: ethertype::IPV4,
            payload: Vec::new(),
        }
    }
}

impl EthernetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(ethertype::IPV4)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(ethertype::IPV6)
    }

    /// Push a tag with the given TPID (outermost first).
    pub fn vlan(mut self, tpid: u16, vlan_id: u16) -> Self {
        self.vlan_tags.push((tpid, vlan_id));
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(14 + 4 * self.vlan_tags.len() + self.payload.len());
        frame.extend_from_slice(&self.dst_mac);
        frame.extend_from_slice(&self.src_mac);
        for (tpid, vlan_id) in &self.vlan_tags {
            frame.extend_from_slice(&tpid.to_be_bytes());
            frame.extend_from_slice(&(vlan_id & 0x0fff).to_be_bytes());
        }
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for constructing IPv4 packets.
#[derive(Debug, Clone)]
pub struct Ipv4Builder {
    protocol: u8,
    flags_fragment: u16,
    options: Vec<u8>,
    src_ip: [u8; 4],
    dst_ip: [u8; 4],
    payload: Vec<u8>,
}

impl Default for Ipv4Builder {
    fn default() -> Self {
        Self {
            protocol: IP_PROTO_UDP,
            flags_fragment: 0x0000,
            options: Vec::new(),
            src_ip: [192, 168, 1, 1],
            dst_ip: [192, 168, 1, 2],
            payload: Vec::new(),
        }
    }
}

impl Ipv4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the fragment offset (in 8-byte units) and the MF flag.
    pub fn fragment(mut self, offset: u16, more_fragments: bool) -> Self {
        self.flags_fragment = (offset & 0x1fff) | if more_fragments { 0x2000 } else { 0 };
        self
    }

    /// Options, padded to a multiple of four bytes on build.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut options = self.options;
        options.resize((options.len() + 3) & !3, 0);
        let header_len = 20 + options.len();
        let total_length = (header_len + self.payload.len()) as u16;

        let mut packet = Vec::with_capacity(total_length as usize);
        packet.push(0x40 | (header_len / 4) as u8);
        packet.push(0x00);
        packet.extend_from_slice(&total_length.to_be_bytes());
        packet.extend_from_slice(&0x1234u16.to_be_bytes());
        packet.extend_from_slice(&self.flags_fragment.to_be_bytes());
        packet.push(64);
        packet.push(self.protocol);
        packet.extend_from_slice(&[0x00, 0x00]); // Checksum (not calculated)
        packet.extend_from_slice(&self.src_ip);
        packet.extend_from_slice(&self.dst_ip);
        packet.extend_from_slice(&options);
        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Builder for constructing IPv6 packets with optional extension headers.
#[derive(Debug, Clone)]
pub struct Ipv6Builder {
    next_header: u8,
    extensions: Vec<(u8, Vec<u8>)>,
    payload: Vec<u8>,
}

impl Default for Ipv6Builder {
    fn default() -> Self {
        Self {
            next_header: IP_PROTO_UDP,
            extensions: Vec::new(),
            payload: Vec::new(),
        }
    }
}

impl Ipv6Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_header(mut self, next_header: u8) -> Self {
        self.next_header = next_header;
        self
    }

    /// Append an extension header. `body` excludes the next-header byte and
    /// for most types is the already length-encoded remainder.
    pub fn extension(mut self, header_type: u8, body: Vec<u8>) -> Self {
        self.extensions.push((header_type, body));
        self
    }

    /// Append an 8-byte Hop-by-Hop options header of PadN.
    pub fn hop_by_hop(self) -> Self {
        self.extension(0, vec![0, 1, 4, 0, 0, 0, 0])
    }

    /// Append a Fragment header.
    pub fn fragment(self, offset: u16, more_fragments: bool) -> Self {
        let field = (offset << 3) | u16::from(more_fragments);
        let mut body = vec![0];
        body.extend_from_slice(&field.to_be_bytes());
        body.extend_from_slice(&0xdead_beefu32.to_be_bytes());
        self.extension(44, body)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        // Chain: fixed header -> extensions in order -> payload
        let first = self
            .extensions
            .first()
            .map_or(self.next_header, |(t, _)| *t);

        let mut ext_bytes = Vec::new();
        for (i, (_, body)) in self.extensions.iter().enumerate() {
            let next = self
                .extensions
                .get(i + 1)
                .map_or(self.next_header, |(t, _)| *t);
            ext_bytes.push(next);
            ext_bytes.extend_from_slice(body);
        }

        let payload_length = (ext_bytes.len() + self.payload.len()) as u16;
        let mut packet = Vec::with_capacity(40 + payload_length as usize);
        packet.extend_from_slice(&[0x60, 0x00, 0x00, 0x00]);
        packet.extend_from_slice(&payload_length.to_be_bytes());
        packet.push(first);
        packet.push(64);
        packet.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8]);
        packet.extend_from_slice(&[0; 11]);
        packet.push(1);
        packet.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8]);
        packet.extend_from_slice(&[0; 11]);
        packet.push(2);
        packet.extend_from_slice(&ext_bytes);
        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Builder for constructing UDP datagrams.
#[derive(Debug, Clone)]
pub struct UdpBuilder {
    src_port: u16,
    dst_port: u16,
    payload: Vec<u8>,
}

impl Default for UdpBuilder {
    fn default() -> Self {
        Self {
            src_port: 12345,
            dst_port: 53,
            payload: Vec::new(),
        }
    }
}

impl UdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let length = 8 + self.payload.len() as u16;
        let mut datagram = Vec::with_capacity(length as usize);
        datagram.extend_from_slice(&self.src_port.to_be_bytes());
        datagram.extend_from_slice(&self.dst_port.to_be_bytes());
        datagram.extend_from_slice(&length.to_be_bytes());
        datagram.extend_from_slice(&[0x00, 0x00]); // Checksum
        datagram.extend_from_slice(&self.payload);
        datagram
    }
}

/// Builder for constructing single-question DNS messages.
#[derive(Debug, Clone)]
pub struct DnsMessageBuilder {
    id: u16,
    flags: u16,
    qdcount: Option<u16>,
    name: Vec<u8>,
    qtype: u16,
    qclass: u16,
}

impl Default for DnsMessageBuilder {
    fn default() -> Self {
        Self {
            id: 0xbeef,
            flags: 0x0100, // standard query, RD
            qdcount: None,
            name: encode_domain_name("example.com"),
            qtype: record_type::A,
            qclass: 1,
        }
    }
}

impl DnsMessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(name: &str) -> Self {
        Self::default().name(name)
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = encode_domain_name(name);
        self
    }

    /// Use pre-encoded name bytes as-is.
    pub fn raw_name(mut self, name: Vec<u8>) -> Self {
        self.name = name;
        self
    }

    pub fn response(mut self) -> Self {
        self.flags |= 0x8000;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn qdcount(mut self, count: u16) -> Self {
        self.qdcount = Some(count);
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut msg = Vec::with_capacity(12 + self.name.len() + 4);
        msg.extend_from_slice(&self.id.to_be_bytes());
        msg.extend_from_slice(&self.flags.to_be_bytes());
        msg.extend_from_slice(&self.qdcount.unwrap_or(1).to_be_bytes());
        msg.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        msg.extend_from_slice(&self.name);
        msg.extend_from_slice(&self.qtype.to_be_bytes());
        msg.extend_from_slice(&self.qclass.to_be_bytes());
        msg
    }
}

/// Encode a dotted name as DNS labels. `"."` and `""` encode the root.
pub fn encode_domain_name(name: &str) -> Vec<u8> {
    let mut result = Vec::new();
    for part in name.split('.') {
        if !part.is_empty() {
            result.push(part.len() as u8);
            result.extend_from_slice(part.as_bytes());
        }
    }
    result.push(0);
    result
}

/// Build a complete Ethernet/IPv4/UDP frame carrying `dns`.
pub fn build_ipv4_dns_frame(src_port: u16, dst_port: u16, dns: Vec<u8>) -> Vec<u8> {
    let udp = UdpBuilder::new()
        .src_port(src_port)
        .dst_port(dst_port)
        .payload(dns)
        .build();
    let ipv4 = Ipv4Builder::new().payload(udp).build();
    EthernetBuilder::new().ipv4().payload(ipv4).build()
}

/// Build a complete Ethernet/IPv4/UDP frame carrying a query for `name`.
pub fn build_dns_query_frame(name: &str) -> Vec<u8> {
    build_ipv4_dns_frame(40000, 53, DnsMessageBuilder::query(name).build())
}
