//! MurmurHash3 x64 128-bit engine.
//!
//! Original algorithm by Austin Appleby, placed in the public domain.
//! Three rotation schedules are provided:
//!
//! - [`Variant::FastHash`] (default) - the schedule used by fasthash digests.
//!   The `k2` and `h2` rotations run in the opposite direction to the published
//!   algorithm and `h2` always starts at zero.
//! - [`Variant::Standard`] - the published `MurmurHash3_x64_128`, binary
//!   compatible with other implementations on little-endian data.
//! - [`Variant::Legacy`] - `FastHash` with `k1` also rotated right. Reproduces
//!   digests stored by earlier Xrd.FastHash deployments.
//!
//! `FastHash` and `Standard` agree on inputs of at most 8 bytes hashed with seed 0.
//!
//! # Example
//! ```
//! let digest = murmur3::hash128_bytes(b"hello", None);
//! assert_eq!(digest.len(), 16);
//!
//! let (h1, _h2) = murmur3::hash128(b"hello", None);
//! assert_eq!(h1, 0xcbd8a7b341bd9b02);
//! ```

const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

/// Bytes consumed per body round.
pub const BLOCK_SIZE: usize = 16;

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = 16;

/// Rotation schedule and seeding rule of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// `k1 rotl 31`, `h1 rotl 27`, `k2 rotr 33`, `h2 rotr 31`; `h2` starts at 0.
    #[default]
    FastHash,
    /// Published MurmurHash3_x64_128: `k1 rotl 31`, `h1 rotl 27`,
    /// `k2 rotl 33`, `h2 rotl 31`; both lanes start at the seed.
    Standard,
    /// `k1 rotr 31`, `h1 rotl 27`, `k2 rotr 33`, `h2 rotr 31`; `h2` starts at 0.
    Legacy,
}

impl Variant {
    /// Short lowercase name, as used in config files and the CLI.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::FastHash => "fasthash",
            Variant::Standard => "standard",
            Variant::Legacy => "legacy",
        }
    }

    #[inline(always)]
    fn mix_k1(self, k: u64) -> u64 {
        let k = k.wrapping_mul(C1);
        let k = match self {
            Variant::Legacy => k.rotate_right(31),
            Variant::FastHash | Variant::Standard => k.rotate_left(31),
        };
        k.wrapping_mul(C2)
    }

    #[inline(always)]
    fn mix_k2(self, k: u64) -> u64 {
        let k = k.wrapping_mul(C2);
        let k = match self {
            Variant::FastHash | Variant::Legacy => k.rotate_right(33),
            Variant::Standard => k.rotate_left(33),
        };
        k.wrapping_mul(C1)
    }

    #[inline(always)]
    fn rotate_h2(self, h: u64) -> u64 {
        match self {
            Variant::FastHash | Variant::Legacy => h.rotate_right(31),
            Variant::Standard => h.rotate_left(31),
        }
    }
}

/// Per-call hash state. Created for one computation and consumed by
/// [`Accumulator::finish`].
#[derive(Debug)]
struct Accumulator {
    h1: u64,
    h2: u64,
    length: u64,
    variant: Variant,
}

impl Accumulator {
    #[inline]
    fn new(seed: u32, variant: Variant) -> Self {
        let seed = seed as u64;
        let h2 = match variant {
            Variant::FastHash | Variant::Legacy => 0,
            Variant::Standard => seed,
        };
        Self { h1: seed, h2, length: 0, variant }
    }

    /// One full 16-byte round.
    #[inline(always)]
    fn mix_block(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), BLOCK_SIZE);
        let k1 = le_u64(&block[..8]);
        let k2 = le_u64(&block[8..]);
        let v = self.variant;

        self.length = self.length.wrapping_add(BLOCK_SIZE as u64);

        self.h1 ^= v.mix_k1(k1);
        self.h1 = self.h1.rotate_left(27);
        self.h1 = self.h1.wrapping_add(self.h2);
        self.h1 = self.h1.wrapping_mul(5).wrapping_add(0x52dce729);

        self.h2 ^= v.mix_k2(k2);
        self.h2 = v.rotate_h2(self.h2);
        self.h2 = self.h2.wrapping_add(self.h1);
        self.h2 = self.h2.wrapping_mul(5).wrapping_add(0x38495ab5);
    }

    /// Trailing 1..=15 bytes. Keys are mixed into the lanes without a round.
    ///
    /// # Panics
    /// If `tail` is empty or holds a whole block.
    #[inline]
    fn mix_tail(&mut self, tail: &[u8]) {
        assert!(
            (1..BLOCK_SIZE).contains(&tail.len()),
            "murmur3: tail length {} outside 1..=15",
            tail.len()
        );

        let mut k1: u64 = 0;
        let mut k2: u64 = 0;

        // Highest offset first, each byte lands at its little-endian position.
        for (offset, &byte) in tail.iter().enumerate().rev() {
            if offset >= 8 {
                k2 ^= (byte as u64) << ((offset - 8) * 8);
            } else {
                k1 ^= (byte as u64) << (offset * 8);
            }
        }

        self.length = self.length.wrapping_add(tail.len() as u64);

        self.h1 ^= self.variant.mix_k1(k1);
        self.h2 ^= self.variant.mix_k2(k2);
    }

    #[inline]
    fn finish(self) -> (u64, u64) {
        let Self { mut h1, mut h2, length, .. } = self;

        h1 ^= length;
        h2 ^= length;

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        h1 = fmix64(h1);
        h2 = fmix64(h2);

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        (h1, h2)
    }
}

#[inline(always)]
fn le_u64(bytes: &[u8]) -> u64 {
    let mut tmp = [0u8; 8];
    tmp.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(tmp)
}

/// Final avalanche mix for 64-bit values.
#[inline]
pub const fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}

/// Compute the 128-bit hash of `data` with the given variant.
///
/// Returns the two lanes `(h1, h2)`. A missing seed is the same as seed 0.
pub fn hash128_with(data: &[u8], seed: Option<u32>, variant: Variant) -> (u64, u64) {
    let mut acc = Accumulator::new(seed.unwrap_or(0), variant);

    let blocks = data.chunks_exact(BLOCK_SIZE);
    let tail = blocks.remainder();
    for block in blocks {
        acc.mix_block(block);
    }
    if !tail.is_empty() {
        acc.mix_tail(tail);
    }

    acc.finish()
}

/// Compute the fasthash 128-bit hash of `data`, returned as `(h1, h2)`.
#[inline]
pub fn hash128(data: &[u8], seed: Option<u32>) -> (u64, u64) {
    hash128_with(data, seed, Variant::FastHash)
}

/// Compute the hash and return it as 16 bytes: `h1` then `h2`, both little-endian.
#[inline]
pub fn hash128_bytes_with(data: &[u8], seed: Option<u32>, variant: Variant) -> [u8; DIGEST_SIZE] {
    let (h1, h2) = hash128_with(data, seed, variant);
    let mut result = [0u8; DIGEST_SIZE];
    result[0..8].copy_from_slice(&h1.to_le_bytes());
    result[8..16].copy_from_slice(&h2.to_le_bytes());
    result
}

/// Compute the fasthash digest of `data` as 16 bytes.
#[inline]
pub fn hash128_bytes(data: &[u8], seed: Option<u32>) -> [u8; DIGEST_SIZE] {
    hash128_bytes_with(data, seed, Variant::FastHash)
}
