//! Seeding the scheduler's random stream from a shareable string.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Generator fully determined by `seed`.
///
/// The SHA-256 digest of the UTF-8 seed is used as the 32-byte ChaCha seed,
/// so any string, including an empty one, is a valid seed.
pub fn seeded_rng(seed: &str) -> ChaCha8Rng {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    ChaCha8Rng::from_seed(bytes)
}

/// Generator seeded from the operating system.
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}
