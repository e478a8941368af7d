//! Integration tests for the hashing facade and engine through the public API.

use fasthash::engine;
use fasthash::prelude::*;
use fasthash::{hash_bytes_uuid, hash_text_uuid, hash_text_with};
use uuid::Uuid;

/// Canonical 100-byte test buffer.
fn test_array() -> Vec<u8> {
    (0..100u32).map(|i| (i.wrapping_mul(31) ^ 0x5a) as u8).collect()
}

fn test_string(len: usize) -> String {
    (0..len).map(|i| (32 + (i * 7) % 94) as u8 as char).collect()
}

#[test]
fn test_empty_array_is_nil_uuid() {
    assert_eq!(Digest::EMPTY.as_bytes(), Uuid::nil().as_bytes());
    assert_eq!(hash_to_identifier(Digest::EMPTY), Uuid::nil());
}

#[test]
fn test_empty_inputs() {
    let none: Option<&[u8]> = None;
    assert_eq!(none.fast_hash(None), Digest::EMPTY);
    assert_eq!(Vec::<u8>::new().fast_hash(None), Digest::EMPTY);

    assert_eq!(hash_bytes_uuid(None, None), Uuid::nil());
    assert_eq!(hash_bytes_uuid(Some(&[0u8; 0][..]), None), Uuid::nil());
    assert_eq!(hash_text_uuid(None, None), Uuid::nil());
    assert_eq!(hash_text_uuid(Some(""), None), Uuid::nil());
    assert_eq!(hash_text_uuid(Some("   "), None), Uuid::nil());
}

#[test]
fn test_not_empty() {
    assert_ne!(test_array().fast_hash(None), Digest::EMPTY);
    assert_ne!(test_string(100).fast_hash(None), Digest::EMPTY);
}

#[test]
fn test_same_input_same_digest() {
    let data = test_array();
    let copy = data.clone();
    assert_eq!(data.fast_hash(None), copy.fast_hash(None));

    let text = test_string(100);
    let rebuilt: String = text.chars().collect();
    assert_eq!(text.fast_hash(None), rebuilt.fast_hash(None));
}

#[test]
fn test_different_input_different_digest() {
    let data = test_array();
    let mut shifted = vec![0u8; data.len()];
    shifted[1..].copy_from_slice(&data[..data.len() - 1]);
    assert_ne!(data.fast_hash(None), shifted.fast_hash(None));

    assert_ne!(test_string(100).fast_hash(None), test_string(101).fast_hash(None));
}

#[test]
fn test_seed() {
    let data = test_array();
    let h = data.fast_hash(Some(100));
    let h1 = data.fast_hash(Some(200));
    let h2 = data.fast_hash(Some(100));
    assert_ne!(h, h1);
    assert_eq!(h, h2);
}

#[test]
fn test_hash_guid() {
    let data = test_array();
    let trimmed = data[2..].to_vec();
    let g1 = data.hash_guid(None);
    let g2 = trimmed.hash_guid(None);
    let g3 = data.hash_guid(Some(100));
    assert_ne!(g1, g2);
    assert_ne!(g1, g3);
    assert_eq!(Digest::from_uuid(g1, IdLayout::Guid), data.fast_hash(None));
}

#[test]
fn test_engine_empty_is_defined() {
    // The engine itself has no sentinel; seed 0 finalizes to zero lanes.
    assert_eq!(engine::hash128_bytes(&[], None), [0u8; 16]);
    assert_ne!(engine::hash128_bytes(&[], Some(1)), [0u8; 16]);
    assert_eq!(engine::hash128_bytes(&[], Some(1)), engine::hash128_bytes(&[], Some(1)));
}

#[test]
fn test_every_tail_length() {
    // Every length through two full blocks hashes to a distinct digest.
    let data: Vec<u8> = (0..=32u8).collect();
    let mut seen = std::collections::HashSet::new();
    for len in 1..=data.len() {
        let d = data[..len].fast_hash(None);
        assert_eq!(d, data[..len].fast_hash(None));
        assert!(seen.insert(d), "collision at len {}", len);
    }
}

#[test]
fn test_published_vector() {
    // MurmurHash3_x64_128("hello", 0); both schedules agree on short input.
    let (h1, h2) = engine::hash128_with(b"hello", None, Variant::Standard);
    assert_eq!((h1, h2), (0xcbd8a7b341bd9b02, 0x5b1e906a48ae1d19));
    assert_eq!(b"hello".fast_hash(None).lanes(), (h1, h2));
}

#[test]
fn test_threads_agree() {
    let data = test_array();
    let expected = data.fast_hash(Some(77));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let data = data.clone();
            std::thread::spawn(move || data.fast_hash(Some(77)))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

#[test]
fn test_legacy_identifier() {
    // Identifier stored by earlier Xrd.FastHash deployments for "hello".
    let opts = HashOptions::default().with_variant(Variant::Legacy);
    let d = hash_text_with(Some("hello"), &opts);
    assert_eq!(d.to_hex(), "beb453ea3e737a9776e80cb97ad89e49");
    assert_eq!(
        d.to_uuid(IdLayout::Guid).to_string(),
        "ea53b4be-733e-977a-76e8-0cb97ad89e49"
    );
    assert_eq!(hash_text_with(Some("  "), &opts), Digest::EMPTY);
}
