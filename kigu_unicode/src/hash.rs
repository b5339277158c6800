//! FNV-1a hashing over raw bytes.
//!
//! Every byte is xored into the state before the multiply. All functions
//! are `const`, so hashes of literals can be computed at compile time.

pub const FNV32_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV32_PRIME: u32 = 16_777_619;
pub const FNV64_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
pub const FNV64_PRIME: u64 = 1_099_511_628_211;

/// 32-bit FNV-1a of `bytes` continuing from `seed`.
///
/// The state is truncated to 32 bits after every multiply, as standard
/// FNV-1a 32 requires. A hash kept in a 64-bit state with the 32-bit prime
/// agrees with this one only in its low 32 bits.
#[must_use]
pub const fn hash32_seeded(bytes: &[u8], seed: u32) -> u32 {
    let mut hash = seed;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV32_PRIME);
        i += 1;
    }
    hash
}

/// 32-bit FNV-1a of `bytes`. See [`hash32_seeded`] for the state width.
#[must_use]
pub const fn hash32(bytes: &[u8]) -> u32 {
    hash32_seeded(bytes, FNV32_OFFSET_BASIS)
}

/// 64-bit FNV-1a of `bytes` continuing from `seed`.
#[must_use]
pub const fn hash64_seeded(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = seed;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV64_PRIME);
        i += 1;
    }
    hash
}

/// 64-bit FNV-1a of `bytes`.
#[must_use]
pub const fn hash64(bytes: &[u8]) -> u64 {
    hash64_seeded(bytes, FNV64_OFFSET_BASIS)
}
