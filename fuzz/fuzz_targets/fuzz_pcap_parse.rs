#![no_main]

use corpus_forge::pcap;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Skip too-small inputs (headers are 40 bytes minimum)
    if data.len() < pcap::PAYLOAD_OFFSET {
        return;
    }

    let (_, record, payload) = match pcap::parse(data) {
        Ok(parsed) => parsed,
        Err(_) => return, // Expected for invalid data
    };

    assert_eq!(payload.len(), record.incl_len as usize);

    // Rebuilding from the parsed payload must put it back at the same offset
    if let Ok(rebuilt) = pcap::build(payload) {
        assert_eq!(&rebuilt[pcap::PAYLOAD_OFFSET..], payload);
    }
});
