//! Capture-file layout and marker offset guarantees

use corpus_forge::pcap::{
    self, GlobalHeader, RecordHeader, LINKTYPE_ETHERNET, MIN_FRAME_SIZE, PAYLOAD_OFFSET,
    PCAP_MAGIC, SNAPLEN,
};

const MARKER: &[u8] = b"[START_PAYLOAD]";

/// Helper: marker followed by `filler` bytes of 0x41
fn marker_payload(filler: usize) -> Vec<u8> {
    let mut payload = MARKER.to_vec();
    payload.extend(std::iter::repeat(0x41).take(filler));
    payload
}

#[test]
fn test_marker_at_0x28() {
    for filler in [0, 1, 49, 200, 1500] {
        let file = pcap::build(&marker_payload(filler)).unwrap();
        assert_eq!(&file[0x28..0x28 + MARKER.len()], MARKER, "filler {}", filler);
        assert_eq!(memchr::memmem::find(&file, MARKER), Some(0x28));
    }
}

#[test]
fn test_lengths_equal_payload_len() {
    let payload = marker_payload(85);
    let file = pcap::build(&payload).unwrap();

    let (global, record, parsed) = pcap::parse(&file).unwrap();
    assert_eq!(global, GlobalHeader::new());
    assert_eq!(record.incl_len as usize, payload.len());
    assert_eq!(record.orig_len as usize, payload.len());
    assert_eq!(record.ts_sec, 0);
    assert_eq!(record.ts_usec, 0);
    assert_eq!(parsed, payload.as_slice());
    assert_eq!(file.len(), PAYLOAD_OFFSET + payload.len());
}

#[test]
fn test_global_header_constants() {
    let file = pcap::build(b"x").unwrap();
    let global = GlobalHeader::read_from(&file[..24]).unwrap();

    assert_eq!(global.magic, PCAP_MAGIC);
    assert_eq!((global.version_major, global.version_minor), (2, 4));
    assert_eq!(global.thiszone, 0);
    assert_eq!(global.sigfigs, 0);
    assert_eq!(global.snaplen, SNAPLEN);
    assert_eq!(global.network, LINKTYPE_ETHERNET);
}

#[test]
fn test_caller_padding_to_minimum_frame() {
    let payload = pcap::pad_payload(MARKER, MIN_FRAME_SIZE);
    assert_eq!(payload.len(), 64);

    let file = pcap::build(&payload).unwrap();
    let record = RecordHeader::read_from(&file[24..40]).unwrap();
    assert_eq!(record, RecordHeader::for_len(64));
    assert!(file[PAYLOAD_OFFSET + MARKER.len()..].iter().all(|&b| b == 0));
}
