//! Blake2b hashing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use zkid_types::Hash256;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// [`blake2b_256`] wrapped as a `Hash256`.
pub fn hash256(data: &[u8]) -> Hash256 {
    Hash256::new(blake2b_256(data))
}

/// [`blake2b_256_multi`] wrapped as a `Hash256`.
pub fn hash256_multi(parts: &[&[u8]]) -> Hash256 {
    Hash256::new(blake2b_256_multi(parts))
}
