//! Zone generators with engineered statistical profiles
//!
//! Each generator is a pure function from size/shape parameters to bytes. The
//! targets are chosen so an entropy classifier lands in well-separated buckets:
//!
//! | kind      | bits/byte     | size guarantee                  |
//! |-----------|---------------|---------------------------------|
//! | random    | ~8.0          | exact                           |
//! | text      | ~4.4          | exact                           |
//! | periodic  | low           | `period * (total / period)`     |
//! | metadata  | low           | `4 * (size / 4)`                |
//! | padding   | 0.0           | exact                           |
//! | signature | low           | `magic.len() + filler`          |

mod generators;
mod signature;

pub use generators::{
    metadata_zone, padding_zone, periodic_zone, random_zone, random_zone_seeded, signature_zone,
    text_zone, MAX_METADATA_SIZE, TEXT_ALPHABET,
};
pub use signature::{Signature, DEFAULT_SIGNATURE_FILLER, GIF_MAGIC, PDF_MAGIC, PNG_MAGIC};

use crate::error::Result;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Statistical profile of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Random,
    Text,
    Periodic,
    Metadata,
    Padding,
    Signature,
}

impl ZoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Text => "text",
            Self::Periodic => "periodic",
            Self::Metadata => "metadata",
            Self::Padding => "padding",
            Self::Signature => "signature",
        }
    }
}

/// Parameters for one zone, generated on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSpec {
    Random { size: usize },
    Text { size: usize },
    Periodic { header: Vec<u8>, period: usize, total_size: usize },
    Metadata { size: usize },
    Padding { size: usize },
    Signature { signature: Signature, filler: usize },
}

impl ZoneSpec {
    pub fn kind(&self) -> ZoneKind {
        match self {
            Self::Random { .. } => ZoneKind::Random,
            Self::Text { .. } => ZoneKind::Text,
            Self::Periodic { .. } => ZoneKind::Periodic,
            Self::Metadata { .. } => ZoneKind::Metadata,
            Self::Padding { .. } => ZoneKind::Padding,
            Self::Signature { .. } => ZoneKind::Signature,
        }
    }

    /// Size the caller asked for; periodic and metadata zones may come out shorter
    pub fn requested_size(&self) -> usize {
        match self {
            Self::Random { size }
            | Self::Text { size }
            | Self::Metadata { size }
            | Self::Padding { size } => *size,
            Self::Periodic { total_size, .. } => *total_size,
            Self::Signature { signature, filler } => signature.magic().len() + filler,
        }
    }

    /// Produce the zone's bytes, drawing randomness from `rng`
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<Zone> {
        let payload = match self {
            Self::Random { size } => random_zone(rng, *size),
            Self::Text { size } => text_zone(rng, *size),
            Self::Periodic {
                header,
                period,
                total_size,
            } => periodic_zone(header, *period, *total_size)?,
            Self::Metadata { size } => metadata_zone(*size)?,
            Self::Padding { size } => padding_zone(*size),
            Self::Signature { signature, filler } => signature_zone(*signature, *filler),
        };

        Ok(Zone {
            kind: self.kind(),
            payload,
        })
    }
}

/// A generated zone; its size is always `payload.len()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub payload: Vec<u8>,
}

impl Zone {
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spec_generates_declared_kind() {
        let mut rng = StdRng::seed_from_u64(0);
        let specs = [
            ZoneSpec::Random { size: 32 },
            ZoneSpec::Text { size: 32 },
            ZoneSpec::Periodic {
                header: vec![1, 2, 3, 4],
                period: 16,
                total_size: 32,
            },
            ZoneSpec::Metadata { size: 32 },
            ZoneSpec::Padding { size: 32 },
            ZoneSpec::Signature {
                signature: Signature::Png,
                filler: 24,
            },
        ];

        for spec in &specs {
            let zone = spec.generate(&mut rng).unwrap();
            assert_eq!(zone.kind, spec.kind());
            assert_eq!(zone.size(), 32, "{:?}", spec.kind());
            assert_eq!(spec.requested_size(), 32);
        }
    }

    #[test]
    fn test_truncating_specs() {
        let mut rng = StdRng::seed_from_u64(0);
        let periodic = ZoneSpec::Periodic {
            header: vec![0xFF],
            period: 64,
            total_size: 200,
        };
        assert_eq!(periodic.generate(&mut rng).unwrap().size(), 192);
        assert_eq!(periodic.requested_size(), 200);

        let metadata = ZoneSpec::Metadata { size: 403 };
        assert_eq!(metadata.generate(&mut rng).unwrap().size(), 400);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ZoneKind::Metadata).unwrap();
        assert_eq!(json, "\"metadata\"");
    }
}
