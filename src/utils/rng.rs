use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Deterministic RNG for one chunk of trials.
///
/// The chunk index is mixed into the master seed with the SplitMix64
/// finaliser so neighbouring chunks get unrelated streams.
pub fn chunk_rng(master: u64, chunk: u64) -> ChaCha20Rng {
    let mut x = master ^ chunk.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    ChaCha20Rng::seed_from_u64(x)
}

/// Fresh master seed from the OS, for runs without a configured seed.
pub fn entropy_seed() -> u64 {
    rand::random()
}
