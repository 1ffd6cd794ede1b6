//! Single-packet libpcap capture files
//!
//! Layout (all fields little-endian):
//!
//! ```text
//! 0x00  global header   24 bytes
//! 0x18  record header   16 bytes
//! 0x28  payload         incl_len bytes
//! ```
//!
//! The payload always starts at [`PAYLOAD_OFFSET`], so a marker placed at the front
//! of the payload can be asserted at exactly 0x28.

use crate::error::{CorpusError, Result};
use std::io::{Read, Write};

/// Microsecond-resolution pcap magic, written little-endian as `D4 C3 B2 A1`
pub const PCAP_MAGIC: u32 = 0xA1B2_C3D4;

pub const PCAP_VERSION_MAJOR: u16 = 2;
pub const PCAP_VERSION_MINOR: u16 = 4;

/// Snapshot length advertised in the global header
pub const SNAPLEN: u32 = 65535;

/// LINKTYPE_ETHERNET
pub const LINKTYPE_ETHERNET: u32 = 1;

pub const GLOBAL_HEADER_SIZE: usize = 24;
pub const RECORD_HEADER_SIZE: usize = 16;

/// Absolute offset of the first payload byte
pub const PAYLOAD_OFFSET: usize = GLOBAL_HEADER_SIZE + RECORD_HEADER_SIZE;

/// Minimum Ethernet frame size fixtures pad their payloads to
pub const MIN_FRAME_SIZE: usize = 64;

/// Capture file global header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalHeader {
    pub magic: u32,
    pub version_major: u16,
    pub version_minor: u16,
    pub thiszone: i32,
    pub sigfigs: u32,
    pub snaplen: u32,
    pub network: u32,
}

impl GlobalHeader {
    pub fn new() -> Self {
        Self {
            magic: PCAP_MAGIC,
            version_major: PCAP_VERSION_MAJOR,
            version_minor: PCAP_VERSION_MINOR,
            thiszone: 0,
            sigfigs: 0,
            snaplen: SNAPLEN,
            network: LINKTYPE_ETHERNET,
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.magic.to_le_bytes())?;
        writer.write_all(&self.version_major.to_le_bytes())?;
        writer.write_all(&self.version_minor.to_le_bytes())?;
        writer.write_all(&self.thiszone.to_le_bytes())?;
        writer.write_all(&self.sigfigs.to_le_bytes())?;
        writer.write_all(&self.snaplen.to_le_bytes())?;
        writer.write_all(&self.network.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let magic = read_u32(&mut reader)?;
        if magic != PCAP_MAGIC {
            return Err(CorpusError::InvalidMagic(magic));
        }

        Ok(Self {
            magic,
            version_major: read_u16(&mut reader)?,
            version_minor: read_u16(&mut reader)?,
            thiszone: read_u32(&mut reader)? as i32,
            sigfigs: read_u32(&mut reader)?,
            snaplen: read_u32(&mut reader)?,
            network: read_u32(&mut reader)?,
        })
    }
}

impl Default for GlobalHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-packet record header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub ts_sec: u32,
    pub ts_usec: u32,
    pub incl_len: u32,
    pub orig_len: u32,
}

impl RecordHeader {
    /// Zero-timestamp header for an untruncated packet of `len` bytes
    pub fn for_len(len: u32) -> Self {
        Self {
            ts_sec: 0,
            ts_usec: 0,
            incl_len: len,
            orig_len: len,
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.ts_sec.to_le_bytes())?;
        writer.write_all(&self.ts_usec.to_le_bytes())?;
        writer.write_all(&self.incl_len.to_le_bytes())?;
        writer.write_all(&self.orig_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(Self {
            ts_sec: read_u32(&mut reader)?,
            ts_usec: read_u32(&mut reader)?,
            incl_len: read_u32(&mut reader)?,
            orig_len: read_u32(&mut reader)?,
        })
    }
}

/// Build a capture file holding `payload` as its only packet
///
/// The payload is written verbatim; padding it to a minimum frame size is up to
/// the caller (see [`pad_payload`]).
pub fn build(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > SNAPLEN as usize {
        return Err(CorpusError::LengthTooLarge {
            len: payload.len(),
            max: SNAPLEN as usize,
        });
    }

    let mut out = Vec::with_capacity(PAYLOAD_OFFSET + payload.len());
    GlobalHeader::new().write_to(&mut out)?;
    RecordHeader::for_len(payload.len() as u32).write_to(&mut out)?;
    out.extend_from_slice(payload);

    tracing::debug!(payload_len = payload.len(), "built single-packet capture");
    Ok(out)
}

/// Copy of `payload` zero-extended to at least `min_len` bytes
pub fn pad_payload(payload: &[u8], min_len: usize) -> Vec<u8> {
    let mut padded = payload.to_vec();
    if padded.len() < min_len {
        padded.resize(min_len, 0);
    }
    padded
}

/// Split a single-packet capture back into its headers and payload
pub fn parse(data: &[u8]) -> Result<(GlobalHeader, RecordHeader, &[u8])> {
    if data.len() < PAYLOAD_OFFSET {
        return Err(CorpusError::Truncated(format!(
            "capture needs {} header bytes, got {}",
            PAYLOAD_OFFSET,
            data.len()
        )));
    }

    let global = GlobalHeader::read_from(&data[..GLOBAL_HEADER_SIZE])?;
    let record = RecordHeader::read_from(&data[GLOBAL_HEADER_SIZE..PAYLOAD_OFFSET])?;

    let end = PAYLOAD_OFFSET + record.incl_len as usize;
    if data.len() < end {
        return Err(CorpusError::Truncated(format!(
            "packet declares {} bytes, {} available",
            record.incl_len,
            data.len() - PAYLOAD_OFFSET
        )));
    }

    Ok((global, record, &data[PAYLOAD_OFFSET..end]))
}

fn read_u16<R: Read>(mut reader: R) -> Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(mut reader: R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}
