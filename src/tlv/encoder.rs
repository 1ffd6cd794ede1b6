use crate::error::{CorpusError, Result};
use std::io::Write;

/// Largest value length the encoder emits (two-byte long form)
pub const MAX_VALUE_LENGTH: usize = 0xFFFF;

/// Encode a value length
///
/// - `< 128`: one byte holding the length (short form)
/// - `128..=255`: `0x81 nn`
/// - `256..=65535`: `0x82 hh ll`
pub fn encode_length(len: usize) -> Result<Vec<u8>> {
    match len {
        0..=0x7F => Ok(vec![len as u8]),
        0x80..=0xFF => Ok(vec![0x81, len as u8]),
        0x100..=MAX_VALUE_LENGTH => Ok(vec![0x82, (len >> 8) as u8, (len & 0xFF) as u8]),
        _ => Err(CorpusError::LengthTooLarge {
            len,
            max: MAX_VALUE_LENGTH,
        }),
    }
}

/// Encode a single TLV record: tag, length, then `value` verbatim
pub fn encode(tag: u8, value: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(value.len() + 4);
    write_tlv(&mut out, tag, value)?;
    Ok(out)
}

/// Encode a record whose value is the concatenation of already-encoded children
pub fn encode_constructed(tag: u8, children: &[Vec<u8>]) -> Result<Vec<u8>> {
    encode(tag, &children.concat())
}

/// Write a TLV record to a writer, returning the number of bytes written
pub fn write_tlv<W: Write>(mut writer: W, tag: u8, value: &[u8]) -> Result<usize> {
    let length = encode_length(value.len())?;

    writer.write_all(&[tag])?;
    writer.write_all(&length)?;
    writer.write_all(value)?;

    Ok(1 + length.len() + value.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::tags;

    #[test]
    fn test_short_form_boundary() {
        assert_eq!(encode_length(0).unwrap(), vec![0x00]);
        assert_eq!(encode_length(127).unwrap(), vec![0x7F]);
    }

    #[test]
    fn test_long_form_one_byte() {
        assert_eq!(encode_length(128).unwrap(), vec![0x81, 0x80]);
        assert_eq!(encode_length(255).unwrap(), vec![0x81, 0xFF]);
    }

    #[test]
    fn test_long_form_two_bytes() {
        assert_eq!(encode_length(256).unwrap(), vec![0x82, 0x01, 0x00]);
        assert_eq!(encode_length(1000).unwrap(), vec![0x82, 0x03, 0xE8]);
        assert_eq!(encode_length(65535).unwrap(), vec![0x82, 0xFF, 0xFF]);
    }

    #[test]
    fn test_length_too_large() {
        match encode_length(65536) {
            Err(CorpusError::LengthTooLarge { len, max }) => {
                assert_eq!(len, 65536);
                assert_eq!(max, MAX_VALUE_LENGTH);
            }
            other => panic!("Expected LengthTooLarge, got: {:?}", other),
        }
        assert!(encode(tags::OCTET_STRING, &vec![0u8; 70000]).is_err());
    }

    #[test]
    fn test_encode_layout() {
        let record = encode(tags::INTEGER, &[0x01]).unwrap();
        assert_eq!(record, vec![0x02, 0x01, 0x01]);

        let empty = encode(tags::NULL, &[]).unwrap();
        assert_eq!(empty, vec![0x05, 0x00]);
    }

    #[test]
    fn test_encode_constructed_concatenates_children() {
        let a = encode(tags::INTEGER, &[0x01]).unwrap();
        let b = encode(tags::INTEGER, &[0x02]).unwrap();
        let seq = encode_constructed(tags::SEQUENCE, &[a, b]).unwrap();
        assert_eq!(seq, vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn test_write_tlv_reports_size() {
        let mut buf = Vec::new();
        let written = write_tlv(&mut buf, tags::OCTET_STRING, &[0xAB; 300]).unwrap();
        assert_eq!(written, 1 + 3 + 300);
        assert_eq!(buf.len(), written);
        assert_eq!(&buf[..4], &[0x04, 0x82, 0x01, 0x2C]);
    }
}
