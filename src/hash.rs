//! Hashing facade over the murmur3 engine.
//!
//! Missing or empty input never reaches the engine: it maps to [`Digest::EMPTY`],
//! so fingerprints of "nothing" compare equal to the nil identifier.
//!
//! ```
//! use fasthash::{hash_bytes, hash_text, Digest, FastHash};
//!
//! assert_eq!(hash_bytes(None, None), Digest::EMPTY);
//! assert_eq!(hash_text(Some("   "), None), Digest::EMPTY);
//! assert_eq!("hello".fast_hash(None), b"hello".fast_hash(None));
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::digest::{Digest, IdLayout};
use crate::options::HashOptions;

/// How text is turned into bytes before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// UTF-16 code units, little-endian, no BOM.
    Utf16Le,
}

impl TextEncoding {
    pub const fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Utf16Le => "utf16le",
        }
    }

    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self {
            TextEncoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            TextEncoding::Utf16Le => {
                Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
        }
    }
}

/// Digest of `data`. Absent or zero-length input returns [`Digest::EMPTY`].
pub fn hash_bytes(data: Option<&[u8]>, seed: Option<u32>) -> Digest {
    hash_bytes_with(data, &HashOptions::default().with_seed(seed))
}

/// Digest of `data` using the variant and seed from `opts`.
pub fn hash_bytes_with(data: Option<&[u8]>, opts: &HashOptions) -> Digest {
    match data {
        Some(bytes) if !bytes.is_empty() => {
            let (h1, h2) = murmur3::hash128_with(bytes, opts.seed, opts.variant);
            Digest::from_lanes(h1, h2)
        }
        _ => Digest::EMPTY,
    }
}

/// Digest of the UTF-8 bytes of `text`.
/// Absent, empty or all-whitespace text returns [`Digest::EMPTY`].
pub fn hash_text(text: Option<&str>, seed: Option<u32>) -> Digest {
    hash_text_with(text, &HashOptions::default().with_seed(seed))
}

/// Digest of `text` encoded with `opts.encoding`.
pub fn hash_text_with(text: Option<&str>, opts: &HashOptions) -> Digest {
    match text {
        Some(t) if !t.trim().is_empty() => {
            let bytes = opts.encoding.encode(t);
            hash_bytes_with(Some(&*bytes), opts)
        }
        _ => Digest::EMPTY,
    }
}

/// Reinterpret a digest as a 128-bit identifier in the default [`IdLayout::Guid`] layout.
pub fn hash_to_identifier(digest: Digest) -> Uuid {
    digest.to_uuid(IdLayout::default())
}

/// Identifier of `data`; nil for absent or empty input.
pub fn hash_bytes_uuid(data: Option<&[u8]>, seed: Option<u32>) -> Uuid {
    hash_to_identifier(hash_bytes(data, seed))
}

/// Identifier of `text`; nil for absent, empty or blank text.
pub fn hash_text_uuid(text: Option<&str>, seed: Option<u32>) -> Uuid {
    hash_to_identifier(hash_text(text, seed))
}

/// Fast-hash extension for byte buffers and strings.
pub trait FastHash {
    /// Digest with the default variant and encoding.
    fn fast_hash(&self, seed: Option<u32>) -> Digest {
        self.fast_hash_with(&HashOptions::default().with_seed(seed))
    }

    fn fast_hash_with(&self, opts: &HashOptions) -> Digest;

    /// Identifier form of [`FastHash::fast_hash`].
    fn hash_guid(&self, seed: Option<u32>) -> Uuid {
        hash_to_identifier(self.fast_hash(seed))
    }
}

impl FastHash for [u8] {
    fn fast_hash_with(&self, opts: &HashOptions) -> Digest {
        hash_bytes_with(Some(self), opts)
    }
}

impl<const N: usize> FastHash for [u8; N] {
    fn fast_hash_with(&self, opts: &HashOptions) -> Digest {
        hash_bytes_with(Some(self.as_slice()), opts)
    }
}

impl FastHash for Vec<u8> {
    fn fast_hash_with(&self, opts: &HashOptions) -> Digest {
        hash_bytes_with(Some(self.as_slice()), opts)
    }
}

impl FastHash for str {
    fn fast_hash_with(&self, opts: &HashOptions) -> Digest {
        hash_text_with(Some(self), opts)
    }
}

impl FastHash for String {
    fn fast_hash_with(&self, opts: &HashOptions) -> Digest {
        hash_text_with(Some(self.as_str()), opts)
    }
}

impl<T: FastHash + ?Sized> FastHash for Option<&T> {
    fn fast_hash_with(&self, opts: &HashOptions) -> Digest {
        self.map_or(Digest::EMPTY, |v| v.fast_hash_with(opts))
    }
}
