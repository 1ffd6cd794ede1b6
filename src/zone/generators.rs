use crate::error::{CorpusError, Result};
use crate::zone::signature::Signature;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Characters drawn by the text generator (22 symbols, at most ~4.46 bits/byte)
pub const TEXT_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNO0123 _.";

/// Uniform random bytes (~8 bits/byte) from the supplied source
pub fn random_zone<R: RngCore + ?Sized>(rng: &mut R, size: usize) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    rng.fill_bytes(&mut buf);
    buf
}

/// Uniform random bytes from a fixed seed, reproducible across runs
pub fn random_zone_seeded(size: usize, seed: u64) -> Vec<u8> {
    random_zone(&mut StdRng::seed_from_u64(seed), size)
}

/// Printable text drawn uniformly from [`TEXT_ALPHABET`]
pub fn text_zone<R: RngCore + ?Sized>(rng: &mut R, size: usize) -> Vec<u8> {
    (0..size)
        .map(|_| TEXT_ALPHABET[rng.gen_range(0..TEXT_ALPHABET.len())])
        .collect()
}

/// `header` zero-padded to `period` bytes, repeated `total_size / period` times
///
/// Only whole periods are emitted, so the result can be shorter than `total_size`.
pub fn periodic_zone(header: &[u8], period: usize, total_size: usize) -> Result<Vec<u8>> {
    if period == 0 {
        return Err(CorpusError::ZeroPeriod);
    }
    if header.len() > period {
        return Err(CorpusError::HeaderExceedsPeriod {
            header: header.len(),
            period,
        });
    }

    let mut block = vec![0u8; period];
    block[..header.len()].copy_from_slice(header);

    let repeats = total_size / period;
    let data = block.repeat(repeats);

    if data.len() < total_size {
        tracing::warn!(
            requested = total_size,
            emitted = data.len(),
            period,
            "periodic zone truncated to whole periods"
        );
    }

    Ok(data)
}

/// Metadata zones hold at most one counter per `u32` value
pub const MAX_METADATA_SIZE: u64 = (u32::MAX as u64 + 1) * 4;

/// Big-endian u32 counters `0, 1, 2, ...`, `size / 4` of them
pub fn metadata_zone(size: usize) -> Result<Vec<u8>> {
    let count = size / 4;
    if count * 4 < size {
        tracing::warn!(
            requested = size,
            emitted = count * 4,
            "metadata zone truncated to whole counters"
        );
    }

    let count = u32::try_from(count).map_err(|_| CorpusError::LengthTooLarge {
        len: size,
        max: (MAX_METADATA_SIZE - 1) as usize,
    })?;
    Ok((0..count).flat_map(|i| i.to_be_bytes()).collect())
}

/// All-zero bytes (0 bits/byte)
pub fn padding_zone(size: usize) -> Vec<u8> {
    vec![0u8; size]
}

/// Magic preamble followed by `filler` zero bytes
pub fn signature_zone(signature: Signature, filler: usize) -> Vec<u8> {
    let magic = signature.magic();
    let mut data = Vec::with_capacity(magic.len() + filler);
    data.extend_from_slice(magic);
    data.resize(magic.len() + filler, 0);
    data
}
