//! Corpus composer
//!
//! Concatenates zones, encoded TLV records and raw byte runs in the order they are
//! added. Every segment's starting offset is the exact sum of the lengths before
//! it, and the layout is reported alongside the bytes so tests can assert against
//! it. Markers are located after the fact rather than padded into place.

use crate::error::Result;
use crate::zone::{ZoneKind, ZoneSpec};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// What a segment of the corpus holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Random,
    Text,
    Periodic,
    Metadata,
    Padding,
    Signature,
    Tlv,
    Marker,
    Raw,
}

impl From<ZoneKind> for SegmentKind {
    fn from(kind: ZoneKind) -> Self {
        match kind {
            ZoneKind::Random => Self::Random,
            ZoneKind::Text => Self::Text,
            ZoneKind::Periodic => Self::Periodic,
            ZoneKind::Metadata => Self::Metadata,
            ZoneKind::Padding => Self::Padding,
            ZoneKind::Signature => Self::Signature,
        }
    }
}

/// Position of one segment within the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Caller-supplied name, e.g. to tell a literal header from a generated zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub offset: usize,
    pub len: usize,
}

impl Segment {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// A marker string and where it landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub text: String,
    pub offset: usize,
}

/// Finished corpus: bytes plus the layout that produced them
#[derive(Debug, Clone)]
pub struct Corpus {
    pub bytes: Vec<u8>,
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Starting offset of every segment, in order
    pub fn offsets(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.offset).collect()
    }

    /// Bytes of segment `index`
    pub fn segment_bytes(&self, index: usize) -> Option<&[u8]> {
        self.segments
            .get(index)
            .map(|s| &self.bytes[s.offset..s.end()])
    }

    /// First occurrence of `needle` in the corpus
    pub fn find_marker(&self, needle: &[u8]) -> Option<usize> {
        memchr::memmem::find(&self.bytes, needle)
    }

    /// Whether the segments tile the corpus without gaps or overlap
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 0;
        for segment in &self.segments {
            if segment.offset != expected {
                return false;
            }
            expected = segment.end();
        }
        expected == self.bytes.len()
    }
}

/// Builds a [`Corpus`] segment by segment
///
/// Randomness for random and text zones comes from the injected source; use
/// [`CorpusBuilder::with_seed`] for reproducible output.
pub struct CorpusBuilder<R: RngCore = StdRng> {
    rng: R,
    bytes: Vec<u8>,
    segments: Vec<Segment>,
    markers: Vec<Marker>,
}

impl CorpusBuilder<StdRng> {
    /// Builder seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Builder with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Builder seeded from `seed` when present, OS entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for CorpusBuilder<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> CorpusBuilder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            bytes: Vec::new(),
            segments: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Current length, i.e. the offset the next segment will start at
    pub fn offset(&self) -> usize {
        self.bytes.len()
    }

    /// Generate and append a zone, returning its starting offset
    pub fn add_zone(&mut self, spec: &ZoneSpec) -> Result<usize> {
        let zone = spec.generate(&mut self.rng)?;
        Ok(self.push(zone.kind.into(), None, &zone.payload))
    }

    /// Generate and append a zone under `label`
    pub fn add_labeled_zone(&mut self, label: &str, spec: &ZoneSpec) -> Result<usize> {
        let zone = spec.generate(&mut self.rng)?;
        Ok(self.push(zone.kind.into(), Some(label), &zone.payload))
    }

    /// Append every spec in order and finish the corpus
    ///
    /// Stops at the first spec that fails to generate.
    pub fn compose(mut self, specs: &[ZoneSpec]) -> Result<Corpus> {
        for spec in specs {
            self.add_zone(spec)?;
        }
        Ok(self.build())
    }

    /// Append an already-encoded TLV record, returning its starting offset
    pub fn add_tlv(&mut self, record: &[u8]) -> usize {
        self.push(SegmentKind::Tlv, None, record)
    }

    /// Append a marker string and record where it landed
    pub fn add_marker(&mut self, marker: &str) -> usize {
        let offset = self.push(SegmentKind::Marker, Some(marker), marker.as_bytes());
        self.markers.push(Marker {
            text: marker.to_string(),
            offset,
        });
        offset
    }

    /// Append bytes verbatim, returning their starting offset
    pub fn add_bytes(&mut self, data: &[u8]) -> usize {
        self.push(SegmentKind::Raw, None, data)
    }

    /// Append fixed bytes under an explicit kind and label, e.g. a literal text header
    pub fn add_segment(&mut self, kind: SegmentKind, label: &str, data: &[u8]) -> usize {
        self.push(kind, Some(label), data)
    }

    pub fn build(self) -> Corpus {
        tracing::debug!(
            len = self.bytes.len(),
            segments = self.segments.len(),
            "corpus built"
        );
        Corpus {
            bytes: self.bytes,
            segments: self.segments,
            markers: self.markers,
        }
    }

    fn push(&mut self, kind: SegmentKind, label: Option<&str>, data: &[u8]) -> usize {
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(data);
        self.segments.push(Segment {
            kind,
            label: label.map(str::to_string),
            offset,
            len: data.len(),
        });
        tracing::debug!(?kind, offset, len = data.len(), "segment appended");
        offset
    }
}
