//! # fasthash
//!
//! Deterministic, non-cryptographic 128-bit digests for change detection and
//! content fingerprinting, built on a MurmurHash3 x64 128-bit engine.
//!
//! Not a cryptographic hash: digests offer no collision or preimage resistance.
//!
//! ## Modules
//!
//! - [`hash`] - Facade: `hash_bytes`, `hash_text`, identifiers, [`FastHash`] trait
//! - [`digest`] - The 16-byte [`Digest`] and its UUID layouts
//! - [`options`] - [`HashOptions`] and the JSON config file
//! - [`files`] - File and parallel batch hashing
//! - [`error`] - [`Error`] / [`Result`]
//!
//! The engine itself lives in the `murmur3` crate and is re-exported as [`engine`].
//!
//! ## Example
//!
//! ```
//! use fasthash::prelude::*;
//!
//! let d = hash_bytes(Some(&b"some blob"[..]), Some(100));
//! assert_ne!(d, Digest::EMPTY);
//! assert_eq!(d, b"some blob".fast_hash(Some(100)));
//!
//! let id = hash_to_identifier(d);
//! assert_eq!(Digest::from_uuid(id, IdLayout::Guid), d);
//! ```

pub mod digest;
pub mod error;
pub mod files;
pub mod hash;
pub mod options;

pub use murmur3 as engine;
pub use murmur3::Variant;

// Re-export commonly used types
pub use digest::{Digest, IdLayout, DIGEST_SIZE};
pub use error::{Error, Result};
pub use files::{hash_file, hash_files, verify_file, FileDigest};
pub use hash::{
    hash_bytes, hash_bytes_uuid, hash_bytes_with, hash_text, hash_text_uuid, hash_text_with,
    hash_to_identifier, FastHash, TextEncoding,
};
pub use options::HashOptions;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::digest::{Digest, IdLayout};
    pub use crate::error::{Error, Result};
    pub use crate::hash::{hash_bytes, hash_text, hash_to_identifier, FastHash, TextEncoding};
    pub use crate::options::HashOptions;
    pub use murmur3::Variant;
}
