#![no_main]

use corpus_forge::tlv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic the reader
    let nodes = match tlv::parse_all(data) {
        Ok(nodes) => nodes,
        Err(_) => return,
    };

    // Anything that parsed must re-encode to the same bytes when it used
    // the encoder's minimal length form
    for node in &nodes {
        if node.value.len() > tlv::MAX_VALUE_LENGTH {
            continue;
        }
        let encoded = tlv::encode(node.tag, &node.value).unwrap();
        if encoded.len() == node.encoded_len() {
            assert_eq!(&data[node.offset..node.offset + node.encoded_len()], &encoded[..]);
        }

        let _ = node.depth();
        let _ = node.leaves();
    }
});
