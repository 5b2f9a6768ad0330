//! DNS message decoding.
//!
//! Only the header and the first question are decoded. Answers and the
//! remaining sections are never looked at.

use smallvec::SmallVec;

use crate::error::DnsError;
use crate::io::{ByteCursor, Endian};

/// Standard DNS port.
pub const DNS_PORT: u16 = 53;

/// Fixed header length.
pub const HEADER_LEN: usize = 12;

const POINTER_MASK: u8 = 0xC0;

/// The 12-byte DNS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl DnsHeader {
    pub fn parse(msg: &[u8]) -> Result<Self, DnsError> {
        if msg.len() < HEADER_LEN {
            return Err(DnsError::MalformedMessage {
                reason: format!("{} bytes is too short for a DNS header", msg.len()),
            });
        }

        let mut cursor = ByteCursor::new(msg);
        Ok(Self {
            id: cursor.read_u16(Endian::Big)?,
            flags: cursor.read_u16(Endian::Big)?,
            question_count: cursor.read_u16(Endian::Big)?,
            answer_count: cursor.read_u16(Endian::Big)?,
            authority_count: cursor.read_u16(Endian::Big)?,
            additional_count: cursor.read_u16(Endian::Big)?,
        })
    }

    /// QR bit (bit 15) clear.
    pub fn is_query(&self) -> bool {
        self.flags & 0x8000 == 0
    }

    /// Opcode (bits 11-14).
    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    pub fn is_authoritative(&self) -> bool {
        self.flags & 0x0400 != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & 0x0200 != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & 0x0100 != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & 0x0080 != 0
    }

    /// Response code (bits 0-3).
    pub fn rcode(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }
}

/// One entry of the question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    /// Dotted name, case preserved. The root name is `"."`.
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl DnsQuestion {
    /// Read a question at the cursor position. `cursor` must cover the
    /// whole message so compression pointers can be followed.
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, DnsError> {
        let name = read_name(cursor)?;
        let qtype = cursor.read_u16(Endian::Big)?;
        let qclass = cursor.read_u16(Endian::Big)?;
        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }
}

/// Decode the first question of a query message.
///
/// Returns `Ok(None)` for responses and for messages without questions.
pub fn decode_query(msg: &[u8]) -> Result<Option<DnsQuestion>, DnsError> {
    let header = DnsHeader::parse(msg)?;
    if !header.is_query() || header.question_count == 0 {
        return Ok(None);
    }

    let mut cursor = ByteCursor::new(msg);
    cursor.seek(HEADER_LEN)?;
    DnsQuestion::read(&mut cursor).map(Some)
}

/// Read a possibly compressed name, leaving the cursor after the name as it
/// appears at the original position (after the first pointer, if any).
fn read_name(cursor: &mut ByteCursor<'_>) -> Result<String, DnsError> {
    let msg = cursor.data();
    // Typical domain has 2-4 labels (e.g., www.example.com)
    let mut labels: SmallVec<[&str; 4]> = SmallVec::new();
    let mut pos = cursor.position();
    let mut resume_at = None;
    let mut hops = 0usize;

    loop {
        let len = *msg.get(pos).ok_or_else(|| DnsError::MalformedMessage {
            reason: format!("name runs past end of message at offset {pos}"),
        })?;

        match len & POINTER_MASK {
            0x00 if len == 0 => {
                pos += 1;
                break;
            }
            0x00 => {
                let start = pos + 1;
                let end = start + len as usize;
                let label = msg.get(start..end).ok_or_else(|| DnsError::MalformedMessage {
                    reason: format!("label at offset {pos} extends beyond message"),
                })?;
                let label = std::str::from_utf8(label).map_err(|_| DnsError::MalformedName {
                    reason: format!("label at offset {pos} is not valid UTF-8"),
                })?;
                labels.push(label);
                pos = end;
            }
            POINTER_MASK => {
                let low = *msg.get(pos + 1).ok_or_else(|| DnsError::MalformedMessage {
                    reason: format!("pointer at offset {pos} is cut short"),
                })?;
                let target = (((len & !POINTER_MASK) as usize) << 8) | low as usize;
                if target >= msg.len() {
                    return Err(DnsError::MalformedName {
                        reason: format!("pointer target {target} is outside the message"),
                    });
                }

                hops += 1;
                if hops > msg.len() {
                    return Err(DnsError::MalformedName {
                        reason: "compression pointer loop".to_string(),
                    });
                }

                resume_at.get_or_insert(pos + 2);
                pos = target;
            }
            other => {
                return Err(DnsError::MalformedName {
                    reason: format!("unsupported label type 0x{other:02x} at offset {pos}"),
                });
            }
        }
    }

    cursor.seek(resume_at.unwrap_or(pos))?;

    if labels.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(labels.join("."))
    }
}

/// DNS record types.
pub mod record_type {
    pub const A: u16 = 1;
    pub const NS: u16 = 2;
    pub const CNAME: u16 = 5;
    pub const SOA: u16 = 6;
    pub const PTR: u16 = 12;
    pub const MX: u16 = 15;
    pub const TXT: u16 = 16;
    pub const AAAA: u16 = 28;
    pub const SRV: u16 = 33;
    pub const HTTPS: u16 = 65;
    pub const ANY: u16 = 255;
}
