//! Per-deal shuffle seed derivation.

use crate::errors::domain::DomainError;

/// Validate that a seed is exactly 32 bytes and return a fixed-size array.
pub fn require_seed_32(seed: &[u8]) -> Result<[u8; 32], DomainError> {
    seed.try_into().map_err(|_| {
        DomainError::Other(format!(
            "seed must be exactly 32 bytes, got {}",
            seed.len()
        ))
    })
}

/// Derive the shuffle seed for one deal of a match.
///
/// Same room seed + deal number = same shuffle, so a deal is reproducible
/// after a crash report; different deals of the same room never share a
/// permutation.
pub fn derive_deal_seed(room_seed: &[u8; 32], deal_no: u32) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"guandan/deal/v1");
    hasher.update(room_seed);
    hasher.update(&deal_no.to_le_bytes());
    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[..8]
        .try_into()
        .expect("blake3 output is 32 bytes");
    u64::from_le_bytes(bytes)
}
