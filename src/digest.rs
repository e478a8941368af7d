//! 16-byte digest value and its identifier forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = murmur3::DIGEST_SIZE;

/// Byte-order convention used when a digest becomes a [`Uuid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdLayout {
    /// Microsoft GUID layout: the first three fields are little-endian,
    /// so `uuid.to_bytes_le()` gives back the digest bytes.
    #[default]
    Guid,
    /// Digest bytes used verbatim as the RFC 4122 byte sequence.
    Rfc4122,
}

impl IdLayout {
    pub const fn name(self) -> &'static str {
        match self {
            IdLayout::Guid => "guid",
            IdLayout::Rfc4122 => "rfc4122",
        }
    }
}

/// A 128-bit fast-hash digest: lane `h1` then lane `h2`, each little-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// All-zero sentinel returned for missing or empty input.
    /// Maps to [`Uuid::nil`] in every layout.
    pub const EMPTY: Digest = Digest([0; DIGEST_SIZE]);

    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build from the two engine lanes.
    pub fn from_lanes(h1: u64, h2: u64) -> Self {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes[..8].copy_from_slice(&h1.to_le_bytes());
        bytes[8..].copy_from_slice(&h2.to_le_bytes());
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Split back into `(h1, h2)`.
    pub fn lanes(&self) -> (u64, u64) {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&self.0[..8]);
        hi.copy_from_slice(&self.0[8..]);
        (u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    /// True for the all-zero sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Lowercase hex, 32 digits, in byte order.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    pub fn to_uuid(&self, layout: IdLayout) -> Uuid {
        match layout {
            IdLayout::Guid => Uuid::from_bytes_le(self.0),
            IdLayout::Rfc4122 => Uuid::from_bytes(self.0),
        }
    }

    pub fn from_uuid(id: Uuid, layout: IdLayout) -> Self {
        match layout {
            IdLayout::Guid => Self(id.to_bytes_le()),
            IdLayout::Rfc4122 => Self(*id.as_bytes()),
        }
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(d: Digest) -> Self {
        d.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({:x})", self)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != DIGEST_SIZE * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidDigest(format!(
                "expected {} hex digits, got {:?}",
                DIGEST_SIZE * 2,
                s
            )));
        }

        let mut bytes = [0u8; DIGEST_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| Error::InvalidDigest(format!("bad hex pair {:?} in {:?}", pair, s)))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "029bbd41b3a7d8cb191dae486a901e5b";

    #[test]
    fn test_empty_is_nil() {
        assert!(Digest::EMPTY.is_empty());
        assert_eq!(Digest::EMPTY.to_uuid(IdLayout::Guid), Uuid::nil());
        assert_eq!(Digest::EMPTY.to_uuid(IdLayout::Rfc4122), Uuid::nil());
        assert_eq!(Digest::default(), Digest::EMPTY);
    }

    #[test]
    fn test_hex_parse_format() {
        let d: Digest = HELLO.parse().unwrap();
        assert_eq!(d.to_hex(), HELLO);
        assert_eq!(format!("{}", d), HELLO);
        assert_eq!(format!("{:?}", d), format!("Digest({})", HELLO));

        let upper: Digest = HELLO.to_uppercase().parse().unwrap();
        assert_eq!(upper, d);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        assert!(matches!("abc".parse::<Digest>(), Err(Error::InvalidDigest(_))));
        assert!("zz9bbd41b3a7d8cb191dae486a901e5b".parse::<Digest>().is_err());
        assert!("é29bbd41b3a7d8cb191dae486a901e5".parse::<Digest>().is_err());
        assert!(format!("{}00", HELLO).parse::<Digest>().is_err());
    }

    #[test]
    fn test_lanes() {
        let d: Digest = HELLO.parse().unwrap();
        assert_eq!(d.lanes(), (0xcbd8a7b341bd9b02, 0x5b1e906a48ae1d19));
        assert_eq!(Digest::from_lanes(0xcbd8a7b341bd9b02, 0x5b1e906a48ae1d19), d);
    }

    #[test]
    fn test_uuid_layouts() {
        let d: Digest = HELLO.parse().unwrap();

        let guid = d.to_uuid(IdLayout::Guid);
        assert_eq!(guid.to_string(), "41bd9b02-a7b3-cbd8-191d-ae486a901e5b");
        assert_eq!(guid.to_bytes_le(), *d.as_bytes());

        let rfc = d.to_uuid(IdLayout::Rfc4122);
        assert_eq!(rfc.to_string(), "029bbd41-b3a7-d8cb-191d-ae486a901e5b");

        assert_eq!(Digest::from_uuid(guid, IdLayout::Guid), d);
        assert_eq!(Digest::from_uuid(rfc, IdLayout::Rfc4122), d);
    }

    #[test]
    fn test_serde_as_hex() {
        let d: Digest = HELLO.parse().unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", HELLO));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);

        assert!(serde_json::from_str::<Digest>("\"nothex\"").is_err());
        assert_eq!(serde_json::to_string(&IdLayout::Rfc4122).unwrap(), "\"rfc4122\"");
    }
}
