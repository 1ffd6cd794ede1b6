//! Ground-truth manifest for a generated corpus
//!
//! `manifest.json` records, for every written file, its SHA-256, the exact offset
//! and length of each segment, the entropy measured over each segment, marker
//! offsets and the detected signature. The consuming analysis tool is expected to
//! report the same numbers.
//!
//! ```text
//! test_files/
//! ├── manifest.json
//! ├── test_etsi_strict.bin
//! ├── test_capture.pcap
//! └── ...
//! ```

use crate::analysis::{autocorrelation_peak, detect_signature, shannon_entropy};
use crate::corpus::{Corpus, Marker, SegmentKind};
use crate::error::{CorpusError, Result};
use crate::zone::Signature;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Manifest format version
pub const MANIFEST_VERSION: &str = "1.0";

/// File name the manifest is written under
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,

    /// Crate name and version that produced the corpus
    pub generator: String,

    /// Seed used for random zones, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One generated file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub sha256: String,

    /// Whole-file entropy in bits/byte
    pub entropy: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,

    /// Strongest non-zero autocorrelation lag over the first 4 KiB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocorrelation_peak: Option<usize>,

    #[serde(default)]
    pub segments: Vec<SegmentEntry>,

    #[serde(default)]
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentEntry {
    pub kind: SegmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub offset: u64,
    pub len: u64,
    pub entropy: f64,
}

impl Manifest {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            seed,
            files: Vec::new(),
        }
    }

    /// Measure `corpus` and add it under `name`
    pub fn add_file(&mut self, name: &str, corpus: &Corpus) {
        self.files.push(FileEntry::measure(name, corpus));
    }

    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(CorpusError::from)
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(CorpusError::from)
    }
}

impl FileEntry {
    pub fn measure(name: &str, corpus: &Corpus) -> Self {
        let bytes = &corpus.bytes;
        let segments = corpus
            .segments
            .iter()
            .map(|s| SegmentEntry {
                kind: s.kind,
                label: s.label.clone(),
                offset: s.offset as u64,
                len: s.len as u64,
                entropy: shannon_entropy(&bytes[s.offset..s.end()]),
            })
            .collect();

        Self {
            name: name.to_string(),
            size: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(bytes)),
            entropy: shannon_entropy(bytes),
            signature: detect_signature(bytes),
            autocorrelation_peak: autocorrelation_peak(bytes),
            segments,
            markers: corpus.markers.clone(),
        }
    }

    /// Whether `data` is the exact content this entry describes
    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() as u64 == self.size && hex::encode(Sha256::digest(data)) == self.sha256
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusBuilder;
    use crate::zone::ZoneSpec;

    fn sample_corpus() -> Corpus {
        let mut builder = CorpusBuilder::with_seed(11);
        builder
            .add_zone(&ZoneSpec::Signature {
                signature: Signature::Png,
                filler: 56,
            })
            .unwrap();
        builder.add_marker("[MARK]");
        builder.add_zone(&ZoneSpec::Padding { size: 100 }).unwrap();
        builder.build()
    }

    #[test]
    fn test_entry_records_layout() {
        let corpus = sample_corpus();
        let entry = FileEntry::measure("sample.png", &corpus);

        assert_eq!(entry.size, 170);
        assert_eq!(entry.signature, Some(Signature::Png));
        assert_eq!(entry.segments.len(), 3);
        assert_eq!(entry.segments[1].offset, 64);
        assert_eq!(entry.segments[2].entropy, 0.0);
        assert_eq!(entry.markers[0].offset, 64);
        assert_eq!(entry.segments[1].label.as_deref(), Some("[MARK]"));
        assert_eq!(entry.segments[2].label, None);
        assert!(entry.matches(&corpus.bytes));
        assert!(!entry.matches(&corpus.bytes[1..]));
    }

    #[test]
    fn test_sha256_hex() {
        let mut builder = CorpusBuilder::with_seed(0);
        builder.add_bytes(b"Hello, World!");
        let entry = FileEntry::measure("hello.txt", &builder.build());
        assert_eq!(
            entry.sha256,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let mut manifest = Manifest::new(Some(5));
        manifest.add_file("sample.png", &sample_corpus());

        let json = manifest.to_json().unwrap();
        let parsed = Manifest::from_json(&json).unwrap();

        assert_eq!(parsed.version, MANIFEST_VERSION);
        assert_eq!(parsed.seed, Some(5));
        let file = parsed.file("sample.png").unwrap();
        assert_eq!(file.sha256, manifest.files[0].sha256);
        assert_eq!(file.segments[0].kind, SegmentKind::Signature);
    }
}
