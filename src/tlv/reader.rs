use crate::error::{CorpusError, Result};
use crate::tlv::tags::CONSTRUCTED_FLAG;

/// Recursion limit when descending into constructed records
pub const MAX_NESTING_DEPTH: usize = 32;

/// Decoded TLV record with its absolute position in the parsed buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvNode {
    pub tag: u8,
    /// Offset of the tag byte
    pub offset: usize,
    /// Tag byte plus length field
    pub header_len: usize,
    pub value: Vec<u8>,
    /// Children, populated for constructed tags only
    pub children: Vec<TlvNode>,
}

impl TlvNode {
    /// Whether the tag has the constructed bit set
    pub fn is_constructed(&self) -> bool {
        self.tag & CONSTRUCTED_FLAG != 0
    }

    /// Offset of the first value byte
    pub fn value_offset(&self) -> usize {
        self.offset + self.header_len
    }

    /// Total encoded size of this record
    pub fn encoded_len(&self) -> usize {
        self.header_len + self.value.len()
    }

    /// Depth-first list of primitive leaves
    pub fn leaves(&self) -> Vec<&TlvNode> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(|c| c.leaves()).collect()
    }

    /// Number of levels from this node to its deepest leaf (a leaf is depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// Decode a BER length field
///
/// Returns `(length, bytes consumed)`. Accepts short form and definite long form
/// with up to four length octets.
pub fn decode_length(data: &[u8]) -> Result<(usize, usize)> {
    let first = *data
        .first()
        .ok_or_else(|| CorpusError::Truncated("missing length byte".to_string()))?;

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let count = (first & 0x7F) as usize;
    if count == 0 {
        return Err(CorpusError::InvalidTlv(
            "indefinite length form is not supported".to_string(),
        ));
    }
    if count > 4 {
        return Err(CorpusError::InvalidTlv(format!(
            "length field of {} octets exceeds supported width",
            count
        )));
    }
    if data.len() < 1 + count {
        return Err(CorpusError::Truncated(format!(
            "long-form length needs {} octets, got {}",
            count,
            data.len() - 1
        )));
    }

    let length = data[1..=count]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);

    Ok((length, 1 + count))
}

/// Decode one record from the front of `data`
///
/// Returns `(tag, value, total bytes consumed)`.
pub fn decode(data: &[u8]) -> Result<(u8, &[u8], usize)> {
    let tag = *data
        .first()
        .ok_or_else(|| CorpusError::Truncated("missing tag byte".to_string()))?;

    let (length, length_size) = decode_length(&data[1..])?;
    let header_len = 1 + length_size;
    let end = header_len
        .checked_add(length)
        .ok_or_else(|| CorpusError::InvalidTlv("length overflow".to_string()))?;

    if data.len() < end {
        return Err(CorpusError::Truncated(format!(
            "tag 0x{:02X} declares {} value bytes, {} available",
            tag,
            length,
            data.len() - header_len
        )));
    }

    Ok((tag, &data[header_len..end], end))
}

/// Parse a buffer of concatenated records into trees, descending into constructed tags
pub fn parse_all(data: &[u8]) -> Result<Vec<TlvNode>> {
    parse_at(data, 0, 0)
}

fn parse_at(data: &[u8], base_offset: usize, depth: usize) -> Result<Vec<TlvNode>> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CorpusError::InvalidTlv(format!(
            "nesting deeper than {} levels",
            MAX_NESTING_DEPTH
        )));
    }

    let mut nodes = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let (tag, value, consumed) = decode(&data[pos..])?;
        let header_len = consumed - value.len();
        let offset = base_offset + pos;

        let children = if tag & CONSTRUCTED_FLAG != 0 {
            parse_at(value, offset + header_len, depth + 1)?
        } else {
            Vec::new()
        };

        nodes.push(TlvNode {
            tag,
            offset,
            header_len,
            value: value.to_vec(),
            children,
        });
        pos += consumed;
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::{encode, tags};

    #[test]
    fn test_decode_short_form() {
        let record = encode(tags::OCTET_STRING, b"abc").unwrap();
        let (tag, value, consumed) = decode(&record).unwrap();
        assert_eq!(tag, tags::OCTET_STRING);
        assert_eq!(value, b"abc");
        assert_eq!(consumed, 5);
    }

    #[test]
    fn test_decode_length_forms() {
        assert_eq!(decode_length(&[0x05]).unwrap(), (5, 1));
        assert_eq!(decode_length(&[0x81, 0xC8]).unwrap(), (200, 2));
        assert_eq!(decode_length(&[0x82, 0x03, 0xE8]).unwrap(), (1000, 3));
        assert_eq!(decode_length(&[0x83, 0x01, 0x00, 0x00]).unwrap(), (65536, 4));
    }

    #[test]
    fn test_rejects_indefinite_length() {
        assert!(matches!(
            decode_length(&[0x80]),
            Err(CorpusError::InvalidTlv(_))
        ));
    }

    #[test]
    fn test_truncated_value() {
        let mut record = encode(tags::OCTET_STRING, &[0u8; 200]).unwrap();
        record.truncate(100);
        assert!(matches!(decode(&record), Err(CorpusError::Truncated(_))));
    }

    #[test]
    fn test_truncated_long_form_length() {
        assert!(matches!(
            decode_length(&[0x82, 0x01]),
            Err(CorpusError::Truncated(_))
        ));
    }

    #[test]
    fn test_parse_offsets() {
        let inner = encode(tags::INTEGER, &[0x2A]).unwrap();
        let outer = encode(tags::SEQUENCE, &inner).unwrap();
        let nodes = parse_all(&outer).unwrap();

        assert_eq!(nodes.len(), 1);
        let seq = &nodes[0];
        assert!(seq.is_constructed());
        assert_eq!(seq.offset, 0);
        assert_eq!(seq.value_offset(), 2);

        let int = &seq.children[0];
        assert!(!int.is_constructed());
        assert_eq!(int.offset, 2);
        assert_eq!(int.value, vec![0x2A]);
        assert_eq!(seq.depth(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let mut record = encode(tags::NULL, &[]).unwrap();
        for _ in 0..=MAX_NESTING_DEPTH + 1 {
            record = encode(tags::SEQUENCE, &record).unwrap();
        }
        assert!(matches!(parse_all(&record), Err(CorpusError::InvalidTlv(_))));
    }
}
