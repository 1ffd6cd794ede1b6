//! Generate seed corpus for fuzzing

use corpus_forge::{pcap, scenarios, tlv};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tlv_dir = "fuzz/corpus/fuzz_tlv_parse";
    let pcap_dir = "fuzz/corpus/fuzz_pcap_parse";
    fs::create_dir_all(tlv_dir)?;
    fs::create_dir_all(pcap_dir)?;

    println!("Generating seed corpus...");

    let tlv_seeds = [
        ("seed_etsi.bin", scenarios::etsi_record()?),
        ("seed_long_form.bin", scenarios::long_form_record()?),
        ("seed_empty_value.bin", tlv::encode(tlv::tags::NULL, &[])?),
    ];
    for (name, data) in &tlv_seeds {
        let path = format!("{}/{}", tlv_dir, name);
        fs::write(&path, data)?;
        println!("✓ Generated: {}", path);
    }

    let pcap_seeds = [
        ("seed_marker.pcap", pcap::build(&pcap::pad_payload(b"[START_PAYLOAD]", 64))?),
        ("seed_empty.pcap", pcap::build(&[])?),
    ];
    for (name, data) in &pcap_seeds {
        let path = format!("{}/{}", pcap_dir, name);
        fs::write(&path, data)?;
        println!("✓ Generated: {}", path);
    }

    println!(
        "\nGenerated {} seed files",
        tlv_seeds.len() + pcap_seeds.len()
    );
    Ok(())
}
