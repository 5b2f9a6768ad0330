//! Whole-file capture buffers.
//!
//! The analyzer works on one contiguous byte slice per capture. Plain files
//! are memory mapped so the OS handles paging; compressed files are
//! decompressed into an owned buffer up front.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use super::decompress::Compression;
use crate::error::{Error, PcapError};

/// Bytes of a capture file, valid for the lifetime of the value.
pub enum CaptureBuffer {
    /// Memory-mapped uncompressed file
    Mapped(Mmap),
    /// Decompressed or caller-provided bytes
    Owned(Vec<u8>),
}

impl CaptureBuffer {
    /// Load a capture file, decompressing it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::Pcap(PcapError::FileNotFound {
                path: path.display().to_string(),
            }),
            _ => Error::Io(e),
        })?;

        // Mapping an empty file fails on some platforms
        if file.metadata()?.len() == 0 {
            return Ok(CaptureBuffer::Owned(Vec::new()));
        }

        // SAFETY: the mapping is read-only; concurrent truncation of the file by
        // another process is outside what this tool guards against.
        let mmap = unsafe { Mmap::map(&file).map_err(Error::Io)? };

        let compression = Compression::detect(&mmap);
        if compression.is_compressed() {
            tracing::debug!(
                path = %path.display(),
                %compression,
                compressed_bytes = mmap.len(),
                "decompressing capture"
            );
            let data = compression.decompress(&mmap)?;
            return Ok(CaptureBuffer::Owned(data));
        }

        Ok(CaptureBuffer::Mapped(mmap))
    }

    /// Whether the bytes came from a memory mapping.
    pub fn is_mapped(&self) -> bool {
        matches!(self, CaptureBuffer::Mapped(_))
    }
}

impl Deref for CaptureBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            CaptureBuffer::Mapped(mmap) => &mmap[..],
            CaptureBuffer::Owned(data) => &data[..],
        }
    }
}

impl From<Vec<u8>> for CaptureBuffer {
    fn from(data: Vec<u8>) -> Self {
        CaptureBuffer::Owned(data)
    }
}

impl std::fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_mapped() { "Mapped" } else { "Owned" };
        f.debug_struct("CaptureBuffer")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}
