//! Generator configuration
//!
//! Every size, period and seed used by the built-in scenarios. `Default` reproduces
//! the documented ground-truth constants; a TOML file can override any subset.
//!
//! ```toml
//! seed = 1234
//!
//! [periodic]
//! period = 32
//! ```

use crate::error::{CorpusError, Result};
use crate::pcap::{MIN_FRAME_SIZE, SNAPLEN};
use crate::zone::DEFAULT_SIGNATURE_FILLER;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for random and text zones; OS entropy when absent.
    /// Limited to `0..=i64::MAX`, the range of a TOML integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub heatmap: HeatmapConfig,
    pub periodic: PeriodicConfig,
    pub entropy_zones: EntropyZonesConfig,
    pub signature: SignatureConfig,
    pub capture: CaptureConfig,
}

/// Text, random, padding gradient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub header_text: String,
    pub header_repeat: usize,
    pub random_size: usize,
    pub padding_size: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            header_text: "HEADER_INFO_SECTION_START".to_string(),
            header_repeat: 50,
            random_size: 4096,
            padding_size: 1024,
        }
    }
}

/// Periodic fixtures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicConfig {
    /// Pattern repeated back to back in the signal fixture
    pub pattern: Vec<u8>,
    pub pattern_repeat: usize,
    /// Header opening every period of the autocorrelation fixture
    pub header: Vec<u8>,
    pub period: usize,
    pub total_size: usize,
}

impl Default for PeriodicConfig {
    fn default() -> Self {
        Self {
            pattern: vec![
                0xAA, 0xBB, 0xCC, 0xDD, 0x00, 0x11, 0x22, 0x33, 0xFF, 0xEE, 0xDD, 0xCC, 0x44,
                0x55, 0x66, 0x77,
            ],
            pattern_repeat: 512,
            header: vec![0xDE, 0xAD, 0xBE, 0xEF],
            period: 64,
            total_size: 512 * 1024,
        }
    }
}

/// Metadata, text, random, padding sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyZonesConfig {
    pub metadata_size: usize,
    pub text_size: usize,
    pub random_size: usize,
    pub padding_size: usize,
}

impl Default for EntropyZonesConfig {
    fn default() -> Self {
        Self {
            metadata_size: 400,
            text_size: 4096,
            random_size: 1024 * 1024,
            padding_size: 4096,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub filler: usize,
    pub random_tail: usize,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            filler: DEFAULT_SIGNATURE_FILLER,
            random_tail: 4096,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub marker: String,
    pub min_payload: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            marker: "[START_PAYLOAD]".to_string(),
            min_payload: MIN_FRAME_SIZE,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            heatmap: HeatmapConfig::default(),
            periodic: PeriodicConfig::default(),
            entropy_zones: EntropyZonesConfig::default(),
            signature: SignatureConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters the generators cannot honor
    pub fn validate(&self) -> Result<()> {
        if let Some(seed) = self.seed {
            if seed > i64::MAX as u64 {
                return Err(CorpusError::Config(format!(
                    "seed {} exceeds the TOML integer range (max {})",
                    seed,
                    i64::MAX
                )));
            }
        }

        let periodic = &self.periodic;
        if periodic.period == 0 {
            return Err(CorpusError::Config("periodic.period must be non-zero".to_string()));
        }
        if periodic.header.len() > periodic.period {
            return Err(CorpusError::Config(format!(
                "periodic.header is {} bytes, longer than the {}-byte period",
                periodic.header.len(),
                periodic.period
            )));
        }
        if periodic.pattern.is_empty() {
            return Err(CorpusError::Config("periodic.pattern must not be empty".to_string()));
        }

        let capture = &self.capture;
        let payload = capture.marker.len().max(capture.min_payload);
        if payload > SNAPLEN as usize {
            return Err(CorpusError::Config(format!(
                "capture payload of {} bytes exceeds snaplen {}",
                payload, SNAPLEN
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.periodic.period, 64);
        assert_eq!(config.periodic.total_size, 524288);
        assert_eq!(config.entropy_zones.metadata_size, 400);
        assert_eq!(config.capture.marker, "[START_PAYLOAD]");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            seed = 99

            [periodic]
            period = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.periodic.period, 32);
        assert_eq!(config.periodic.header, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(config.heatmap, HeatmapConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = GeneratorConfig::default().with_seed(7);
        let text = config.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_period() {
        let result = GeneratorConfig::from_toml_str("[periodic]\nperiod = 0\n");
        assert!(matches!(result, Err(CorpusError::Config(_))));
    }

    #[test]
    fn test_rejects_header_longer_than_period() {
        let result = GeneratorConfig::from_toml_str("[periodic]\nperiod = 2\n");
        assert!(matches!(result, Err(CorpusError::Config(_))));
    }

    #[test]
    fn test_seed_range_matches_toml() {
        let largest = GeneratorConfig::default().with_seed(i64::MAX as u64);
        largest.validate().unwrap();
        let text = largest.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), largest);

        let too_large = GeneratorConfig::default().with_seed(u64::MAX);
        assert!(matches!(too_large.validate(), Err(CorpusError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = GeneratorConfig::from_toml_str("seed = \"not a number\"");
        assert!(matches!(result, Err(CorpusError::Toml(_))));
    }
}
