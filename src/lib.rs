//! corpus-forge: synthetic binary corpora with byte-exact ground truth
//!
//! Builds test files for forensic analysis tooling where every property the tool
//! should report is known in advance:
//! - Nested ASN.1 BER/DER TLV structures (short and long-form lengths)
//! - Entropy zones (random, text, metadata counters, zero padding) at known offsets
//! - Periodic data with an autocorrelation peak at a chosen lag
//! - Single-packet pcap files with a marker at offset 0x28
//!
//! # Example
//!
//! ```no_run
//! use corpus_forge::{CorpusBuilder, FileSink, ZoneSpec};
//!
//! let mut builder = CorpusBuilder::with_seed(7);
//! builder.add_zone(&ZoneSpec::Text { size: 4096 })?;
//! let random_at = builder.add_zone(&ZoneSpec::Random { size: 4096 })?;
//! builder.add_zone(&ZoneSpec::Padding { size: 1024 })?;
//! let corpus = builder.build();
//! assert_eq!(random_at, 4096);
//!
//! let sink = FileSink::create("test_files")?;
//! sink.write("zones.bin", &corpus.bytes)?;
//! # Ok::<(), corpus_forge::CorpusError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod manifest;
pub mod pcap;
pub mod scenarios;
pub mod sink;
pub mod tlv;
pub mod zone;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use corpus::{Corpus, CorpusBuilder, Marker, Segment, SegmentKind};
pub use error::{CorpusError, Result};
pub use manifest::{FileEntry, Manifest};
pub use scenarios::{generate_all, Artifact, Scenario, SCENARIOS};
pub use sink::FileSink;
pub use tlv::TlvNode;
pub use zone::{Signature, Zone, ZoneKind, ZoneSpec};
