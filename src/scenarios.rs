//! Built-in generation scenarios
//!
//! Each scenario fills a [`CorpusBuilder`] for one output file. [`generate_all`]
//! runs every scenario, writes the files through a [`FileSink`] and finishes with
//! the ground-truth manifest.

use crate::config::GeneratorConfig;
use crate::corpus::{Corpus, CorpusBuilder, SegmentKind};
use crate::error::Result;
use crate::manifest::{Manifest, MANIFEST_FILE_NAME};
use crate::pcap::{self, PAYLOAD_OFFSET};
use crate::sink::FileSink;
use crate::tlv::{self, tags};
use crate::zone::{self, Signature, ZoneSpec};

/// Marker embedded by the mixed-content scenario
pub const EMBEDDED_MARKER: &str = "[MARKER]";

/// One generated output file
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: &'static str,
    pub corpus: Corpus,
}

type BuildFn = fn(&GeneratorConfig, &mut CorpusBuilder) -> Result<()>;

/// A named file and the recipe that fills it
pub struct Scenario {
    pub file_name: &'static str,
    pub description: &'static str,
    /// Mixed into the configured seed so scenarios draw independent streams
    salt: u64,
    build: BuildFn,
}

impl Scenario {
    pub fn generate(&self, config: &GeneratorConfig) -> Result<Artifact> {
        let seed = config.seed.map(|s| s ^ self.salt);
        let mut builder = CorpusBuilder::from_optional_seed(seed);
        (self.build)(config, &mut builder)?;

        Ok(Artifact {
            file_name: self.file_name,
            corpus: builder.build(),
        })
    }
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        file_name: "test_etsi_strict.bin",
        description: "Nested TLV mimicking an ETSI TS 101 671 handover record",
        salt: 0x01,
        build: build_etsi_strict,
    },
    Scenario {
        file_name: "test_heatmap_gradient.bin",
        description: "Text, random and zero-padding entropy zones",
        salt: 0x02,
        build: build_heatmap_gradient,
    },
    Scenario {
        file_name: "test_periodic_signal.bin",
        description: "16-byte pattern repeated back to back",
        salt: 0x03,
        build: build_periodic_signal,
    },
    Scenario {
        file_name: "test_autocorrelation.bin",
        description: "Header every 64 bytes for an autocorrelation peak at lag 64",
        salt: 0x04,
        build: build_autocorrelation,
    },
    Scenario {
        file_name: "test_entropy_zones.bin",
        description: "Metadata counters, text, random and padding zones",
        salt: 0x05,
        build: build_entropy_zones,
    },
    Scenario {
        file_name: "test_signature.png",
        description: "PNG signature preamble followed by random data",
        salt: 0x06,
        build: build_signature,
    },
    Scenario {
        file_name: "test_long_form_tlv.bin",
        description: "TLV values exercising 0x81 and 0x82 long-form lengths",
        salt: 0x07,
        build: build_long_form_tlv,
    },
    Scenario {
        file_name: "test_capture.pcap",
        description: "Single-packet capture with a marker at offset 0x28",
        salt: 0x08,
        build: build_capture,
    },
    Scenario {
        file_name: "test_embedded_marker.bin",
        description: "Mixed zones with a TLV record and a marker at a reported offset",
        salt: 0x09,
        build: build_embedded_marker,
    },
];

/// Look up a scenario by output file name
pub fn find(file_name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.file_name == file_name)
}

/// Generate every scenario into `sink`, then write the manifest
pub fn generate_all(config: &GeneratorConfig, sink: &FileSink) -> Result<Manifest> {
    config.validate()?;
    let mut manifest = Manifest::new(config.seed);

    for scenario in SCENARIOS {
        tracing::debug!(file = scenario.file_name, "{}", scenario.description);
        let artifact = scenario.generate(config)?;
        sink.write(artifact.file_name, &artifact.corpus.bytes)?;
        manifest.add_file(artifact.file_name, &artifact.corpus);
    }

    sink.write(MANIFEST_FILE_NAME, &manifest.to_json()?)?;
    tracing::info!(
        files = manifest.files.len(),
        dir = %sink.dir().display(),
        "corpus generation complete"
    );
    Ok(manifest)
}

/// `30{ 02{01}, A1{ 81{"Target_User_007"}, 30{ 02{lat}, 02{lon} } } }`
pub fn etsi_record() -> Result<Vec<u8>> {
    let target_id = tlv::encode(tags::CONTEXT_1, b"Target_User_007")?;

    let lat = tlv::encode(tags::INTEGER, &[0x01, 0x02, 0x03, 0x04])?;
    let lon = tlv::encode(tags::INTEGER, &[0x05, 0x06, 0x07, 0x08])?;
    let location = tlv::encode_constructed(tags::SEQUENCE, &[lat, lon])?;

    let iri_content = tlv::encode_constructed(tags::CONSTRUCTED_1, &[target_id, location])?;

    let version = tlv::encode(tags::INTEGER, &[0x01])?;
    tlv::encode_constructed(tags::SEQUENCE, &[version, iri_content])
}

fn build_etsi_strict(_config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    builder.add_tlv(&etsi_record()?);
    Ok(())
}

fn build_heatmap_gradient(config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    let heatmap = &config.heatmap;
    let header = heatmap.header_text.repeat(heatmap.header_repeat);

    builder.add_segment(SegmentKind::Text, "header_text", header.as_bytes());
    builder.add_labeled_zone(
        "encrypted_payload",
        &ZoneSpec::Random {
            size: heatmap.random_size,
        },
    )?;
    builder.add_labeled_zone(
        "null_padding",
        &ZoneSpec::Padding {
            size: heatmap.padding_size,
        },
    )?;
    Ok(())
}

fn build_periodic_signal(config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    let periodic = &config.periodic;
    let data = periodic.pattern.repeat(periodic.pattern_repeat);
    builder.add_segment(SegmentKind::Periodic, "repeated_pattern", &data);
    Ok(())
}

fn build_autocorrelation(config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    let periodic = &config.periodic;
    builder.add_zone(&ZoneSpec::Periodic {
        header: periodic.header.clone(),
        period: periodic.period,
        total_size: periodic.total_size,
    })?;
    Ok(())
}

fn build_entropy_zones(config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    let zones = &config.entropy_zones;
    builder.add_zone(&ZoneSpec::Metadata {
        size: zones.metadata_size,
    })?;
    builder.add_zone(&ZoneSpec::Text {
        size: zones.text_size,
    })?;
    builder.add_zone(&ZoneSpec::Random {
        size: zones.random_size,
    })?;
    builder.add_zone(&ZoneSpec::Padding {
        size: zones.padding_size,
    })?;
    Ok(())
}

fn build_signature(config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    builder.add_zone(&ZoneSpec::Signature {
        signature: Signature::Png,
        filler: config.signature.filler,
    })?;
    builder.add_zone(&ZoneSpec::Random {
        size: config.signature.random_tail,
    })?;
    Ok(())
}

/// SEQUENCE holding a 200-byte and a 1000-byte value plus a short INTEGER
pub fn long_form_record() -> Result<Vec<u8>> {
    let counters = tlv::encode(tags::OCTET_STRING, &zone::metadata_zone(200)?)?;
    let text = tlv::encode(tags::PRINTABLE_STRING, &b"LONG_FORM_VALUE_".repeat(63)[..1000])?;
    let version = tlv::encode(tags::INTEGER, &[0x02])?;
    tlv::encode_constructed(tags::SEQUENCE, &[counters, text, version])
}

fn build_long_form_tlv(_config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    builder.add_tlv(&long_form_record()?);
    Ok(())
}

fn build_capture(config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    let marker = &config.capture.marker;
    let payload = pcap::pad_payload(marker.as_bytes(), config.capture.min_payload);
    let file = pcap::build(&payload)?;

    let payload_start = builder.offset() + PAYLOAD_OFFSET;
    builder.add_segment(SegmentKind::Raw, "pcap_headers", &file[..PAYLOAD_OFFSET]);
    let marker_offset = builder.add_marker(marker);
    builder.add_segment(
        SegmentKind::Padding,
        "frame_padding",
        &file[PAYLOAD_OFFSET + marker.len()..],
    );

    debug_assert_eq!(marker_offset, payload_start);
    Ok(())
}

fn build_embedded_marker(_config: &GeneratorConfig, builder: &mut CorpusBuilder) -> Result<()> {
    builder.add_zone(&ZoneSpec::Random { size: 1000 })?;
    builder.add_zone(&ZoneSpec::Text { size: 500 })?;
    builder.add_tlv(&etsi_record()?);
    builder.add_marker(EMBEDDED_MARKER);
    builder.add_zone(&ZoneSpec::Random { size: 777 })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etsi_record_bytes() {
        let record = etsi_record().unwrap();
        assert_eq!(&record[..5], &[0x30, 0x24, 0x02, 0x01, 0x01]);
        assert_eq!(&record[5..9], &[0xA1, 0x1F, 0x81, 0x0F]);
        assert_eq!(&record[9..24], b"Target_User_007");
        assert_eq!(
            &record[24..],
            &[0x30, 0x0C, 0x02, 0x04, 0x01, 0x02, 0x03, 0x04, 0x02, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn test_long_form_record_header() {
        let record = long_form_record().unwrap();
        // 203 + 1004 + 3 value bytes
        assert_eq!(&record[..4], &[0x30, 0x82, 0x04, 0xBA]);
        assert_eq!(&record[4..6], &[0x04, 0x81]);
        assert_eq!(record[6], 200);
        assert_eq!(&record[207..211], &[0x13, 0x82, 0x03, 0xE8]);
        assert_eq!(record.len(), 4 + 1210);
    }

    #[test]
    fn test_scenario_file_names_unique() {
        let mut names: Vec<_> = SCENARIOS.iter().map(|s| s.file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SCENARIOS.len());
        assert!(!names.contains(&MANIFEST_FILE_NAME));
    }

    #[test]
    fn test_seeded_scenarios_reproducible() {
        let config = GeneratorConfig::default().with_seed(42);
        let scenario = find("test_heatmap_gradient.bin").unwrap();

        let a = scenario.generate(&config).unwrap();
        let b = scenario.generate(&config).unwrap();
        assert_eq!(a.corpus.bytes, b.corpus.bytes);
    }

    #[test]
    fn test_capture_layout() {
        let artifact = find("test_capture.pcap")
            .unwrap()
            .generate(&GeneratorConfig::default())
            .unwrap();

        let corpus = &artifact.corpus;
        assert_eq!(corpus.len(), PAYLOAD_OFFSET + 64);
        assert_eq!(corpus.markers[0].offset, 0x28);
        assert!(corpus.is_contiguous());
    }
}
