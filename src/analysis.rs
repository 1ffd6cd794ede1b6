//! Ground-truth measurements
//!
//! These mirror what the consuming analysis tool computes so generated files can be
//! checked against the numbers that tool is expected to report.

use crate::zone::Signature;

/// Bytes of the sample examined by [`autocorrelation`]
pub const AUTOCORRELATION_SAMPLE: usize = 4096;

/// Lags examined by [`autocorrelation`] (`0..AUTOCORRELATION_MAX_LAG`)
pub const AUTOCORRELATION_MAX_LAG: usize = 128;

/// Shannon entropy in bits/byte (0.0 for empty input)
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0usize; 256];
    for &b in data {
        counts[b as usize] += 1;
    }

    let len = data.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Fraction of bytes in the printable ASCII range (0x20..=0x7E, tab, CR, LF)
pub fn printable_ratio(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let printable = data
        .iter()
        .filter(|&&b| (0x20..=0x7E).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r'))
        .count();
    printable as f64 / data.len() as f64
}

/// Byte-match ratio of the first 4 KiB against itself shifted by each lag in `0..128`
pub fn autocorrelation(data: &[u8]) -> Vec<f64> {
    let sample = &data[..data.len().min(AUTOCORRELATION_SAMPLE)];

    (0..AUTOCORRELATION_MAX_LAG)
        .map(|lag| {
            if lag >= sample.len() {
                return 0.0;
            }
            let comparisons = sample.len() - lag;
            let matches = sample
                .iter()
                .zip(&sample[lag..])
                .filter(|(a, b)| a == b)
                .count();
            matches as f64 / comparisons as f64
        })
        .collect()
}

/// Lag (excluding 0) with the highest autocorrelation; the smallest such lag on ties
pub fn autocorrelation_peak(data: &[u8]) -> Option<usize> {
    let graph = autocorrelation(data);
    let mut best: Option<(usize, f64)> = None;

    for (lag, &score) in graph.iter().enumerate().skip(1) {
        if score > 0.0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((lag, score));
        }
    }

    best.map(|(lag, _)| lag)
}

/// Signatures whose magic bytes open `data`
pub fn detect_signature(data: &[u8]) -> Option<Signature> {
    Signature::ALL.into_iter().find(|sig| sig.matches(data))
}
