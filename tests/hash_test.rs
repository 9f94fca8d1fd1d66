//! Fingerprint Tests
//!
//! Known-value fixtures for the 64-bit content fingerprint, plus the
//! head/tail window arithmetic on larger inputs.

use std::io::Cursor;
use subfetch::hash::{MovieHash, CHUNK_SIZE};

const FIXTURE: &[u8] = b"subfetch fixture: the quick brown fox jumps over the lazy dog.\n";

fn hash_of(bytes: &[u8]) -> String {
    MovieHash::compute(&mut Cursor::new(bytes)).unwrap().to_string()
}

/// Reference: size + sum of head words + sum of tail words, wrapping
fn reference(bytes: &[u8]) -> u64 {
    let sum = |window: &[u8]| {
        window
            .chunks_exact(8)
            .map(|w| u64::from_le_bytes(w.try_into().unwrap()))
            .fold(0u64, u64::wrapping_add)
    };
    let chunk = CHUNK_SIZE as usize;
    let head = &bytes[..bytes.len().min(chunk)];
    let tail = &bytes[bytes.len().saturating_sub(chunk)..];
    (bytes.len() as u64).wrapping_add(sum(head)).wrapping_add(sum(tail))
}

// =============================================================================
// Known Values
// =============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(hash_of(b""), "0000000000000000");
}

#[test]
fn test_shorter_than_a_word() {
    assert_eq!(hash_of(b"abcdefg"), "0000000000000007");
}

#[test]
fn test_fixture_text() {
    assert_eq!(FIXTURE.len(), 63);
    assert_eq!(hash_of(FIXTURE), "39ceff52b9dac8a1");
}

#[test]
fn test_fixture_repeated() {
    assert_eq!(hash_of(&FIXTURE.repeat(3)), "9d77794cb98e66eb");
}

#[test]
fn test_large_patterned_input() {
    let bytes: Vec<u8> = (0..200_000u32).map(|i| ((i * 31) % 251) as u8).collect();
    assert_eq!(hash_of(&bytes), "d260cf49ba2b90ec");
}

#[test]
fn test_zero_filled_two_windows() {
    assert_eq!(hash_of(&vec![0u8; 131_072]), "0000000000020000");
}

// =============================================================================
// Window Arithmetic
// =============================================================================

#[test]
fn test_matches_reference_beyond_two_windows() {
    let bytes: Vec<u8> = (0..300_001u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
    let hash = MovieHash::compute(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(hash.as_u64(), reference(&bytes));
}

#[test]
fn test_small_input_counts_overlap_twice() {
    let bytes = 1u64.to_le_bytes().repeat(4);
    let hash = MovieHash::compute(&mut Cursor::new(&bytes)).unwrap();
    // 32 bytes, four words of 1 in both windows
    assert_eq!(hash.as_u64(), 32 + 4 + 4);
}

#[test]
fn test_overlapping_windows_match_reference() {
    // head and tail share bytes 4464..65536
    let bytes: Vec<u8> = (0..70_000u32).map(|i| (i % 7) as u8).collect();
    let a = MovieHash::compute(&mut Cursor::new(&bytes)).unwrap();
    let b = MovieHash::compute(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_u64(), reference(&bytes));
}

#[test]
fn test_display_is_16_lowercase_hex() {
    let text = MovieHash(0xABCDEF).to_string();
    assert_eq!(text, "0000000000abcdef");
    assert_eq!(text.parse::<MovieHash>().unwrap(), MovieHash(0xABCDEF));
}

// =============================================================================
// Files
// =============================================================================

#[test]
fn test_from_file_matches_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie.avi");
    let bytes = FIXTURE.repeat(3);
    std::fs::write(&path, &bytes).unwrap();

    let (hash, size) = MovieHash::from_file(&path).unwrap();
    assert_eq!(size, 189);
    assert_eq!(hash.to_string(), "9d77794cb98e66eb");
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = MovieHash::from_file(dir.path().join("missing.mkv")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
