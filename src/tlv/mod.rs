//! ASN.1 BER/DER-style Tag-Length-Value records
//!
//! Records are built bottom-up: encode each child, concatenate the results and
//! pass the concatenation as the parent's value. The encoder itself has no
//! notion of nesting depth.
//!
//! ```
//! use corpus_forge::tlv::{self, tags};
//!
//! let lat = tlv::encode(tags::INTEGER, &[0x01, 0x02, 0x03, 0x04])?;
//! let lon = tlv::encode(tags::INTEGER, &[0x05, 0x06, 0x07, 0x08])?;
//! let location = tlv::encode(tags::SEQUENCE, &[lat, lon].concat())?;
//!
//! let nodes = tlv::parse_all(&location)?;
//! assert_eq!(nodes[0].children.len(), 2);
//! # Ok::<(), corpus_forge::CorpusError>(())
//! ```

mod encoder;
mod reader;

pub use encoder::{encode, encode_constructed, encode_length, write_tlv, MAX_VALUE_LENGTH};
pub use reader::{decode, decode_length, parse_all, TlvNode, MAX_NESTING_DEPTH};

/// Tag bytes used by the generated structures
pub mod tags {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const UTF8_STRING: u8 = 0x0C;
    pub const PRINTABLE_STRING: u8 = 0x13;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;

    /// Context-specific primitive [0]..[2]
    pub const CONTEXT_0: u8 = 0x80;
    pub const CONTEXT_1: u8 = 0x81;
    pub const CONTEXT_2: u8 = 0x82;

    /// Context-specific constructed [1], [2]
    pub const CONSTRUCTED_1: u8 = 0xA1;
    pub const CONSTRUCTED_2: u8 = 0xA2;

    /// Bit 6 of the identifier octet marks a constructed encoding
    pub const CONSTRUCTED_FLAG: u8 = 0x20;
}
