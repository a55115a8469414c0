//! Deterministic stand-ins for prover output, for demos and tests.

use zkid_types::{AccountAddress, FieldElement, Hash256, Proof};

/// Low 320 bits of the seed integer, little-endian.
type LowBits = [u8; 40];

/// Read the seed as an integer: the hex codes of its UTF-16 code units,
/// concatenated, parsed as one big-endian number.
fn seed_integer(seed: &str) -> LowBits {
    let mut digits: String = seed.encode_utf16().map(|u| format!("{u:x}")).collect();
    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }
    // Every digit is valid hex, so decoding cannot fail.
    let be = hex::decode(&digits).unwrap_or_default();

    let mut low = [0u8; 40];
    for (dst, src) in low.iter_mut().zip(be.iter().rev()) {
        *dst = *src;
    }
    low
}

/// `(n >> shift) mod 2^width` for byte-aligned `shift` and `width <= 128`.
fn window(n: &LowBits, shift: usize, width: usize) -> u128 {
    let mut bytes = [0u8; 16];
    let start = shift / 8;
    let len = width / 8;
    bytes[..len].copy_from_slice(&n[start..start + len]);
    u128::from_le_bytes(bytes)
}

/// A proof derived from `seed`.
///
/// The coordinates are fixed slices of the seed integer, so short seeds
/// leave the high slices zero: seeds under nine ASCII characters yield an
/// all-zero `c` and fail the shape check.
pub fn create_mock_zk_proof(seed: &str) -> Proof {
    let n = seed_integer(seed);
    let fe = FieldElement::from_u128;
    Proof {
        a: [fe(window(&n, 0, 128)), fe(window(&n, 128, 128))],
        b: [
            [fe(window(&n, 0, 64)), fe(window(&n, 64, 64))],
            [fe(window(&n, 128, 64)), fe(window(&n, 192, 64))],
        ],
        c: [fe(window(&n, 64, 128)), fe(window(&n, 192, 128))],
        public_inputs: vec![fe(window(&n, 0, 32)), fe(window(&n, 32, 32))],
    }
}

/// A commitment binding `personal_data` to `account`.
pub fn create_mock_identity_commitment(personal_data: &str, account: &AccountAddress) -> Hash256 {
    zkid_crypto::derive_identity_commitment(personal_data.as_bytes(), account)
}

/// A nullifier for `secret` and `account`, salted with `salt` (the caller
/// passes wall-clock milliseconds to get a fresh one per attempt).
pub fn create_mock_nullifier(secret: &str, account: &AccountAddress, salt: u64) -> Hash256 {
    zkid_crypto::derive_nullifier(secret.as_bytes(), account, salt)
}
