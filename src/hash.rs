//! Content fingerprinting for video files
//!
//! The lookup service identifies a video by a 64-bit checksum instead of its
//! name: the file size plus the little-endian `u64` words of the first and
//! last 64 KiB of the file, all summed with wrapping arithmetic.
//!
//! Files smaller than two windows are read with overlapping head and tail
//! windows, so the shared bytes are counted twice. The service computes the
//! same value, so this must not be "corrected".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

/// Size of the head and tail windows in bytes
pub const CHUNK_SIZE: u64 = 65536;

const WORD_SIZE: usize = std::mem::size_of::<u64>();

/// 64-bit content fingerprint of a video file
///
/// Displays as exactly 16 lowercase hex digits, zero padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MovieHash(pub u64);

impl MovieHash {
    /// Fingerprint a seekable stream, taking its size from the end offset
    pub fn compute<R: Read + Seek>(reader: &mut R) -> io::Result<Self> {
        let size = reader.seek(SeekFrom::End(0))?;
        Self::compute_with_size(reader, size)
    }

    /// Fingerprint a seekable stream whose total size is already known
    pub fn compute_with_size<R: Read + Seek>(reader: &mut R, size: u64) -> io::Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let head = sum_window(reader)?;

        reader.seek(SeekFrom::Start(size.saturating_sub(CHUNK_SIZE)))?;
        let tail = sum_window(reader)?;

        Ok(MovieHash(size.wrapping_add(head).wrapping_add(tail)))
    }

    /// Open a file and fingerprint it, returning the hash and byte size
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<(Self, u64)> {
        let file = File::open(path.as_ref())?;
        let size = file.metadata()?.len();
        let mut reader = BufReader::new(file);
        let hash = Self::compute_with_size(&mut reader, size)?;
        Ok((hash, size))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Sum up to one window of little-endian words from the current position.
/// A trailing partial word is ignored.
fn sum_window<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = Vec::with_capacity(CHUNK_SIZE as usize);
    reader.by_ref().take(CHUNK_SIZE).read_to_end(&mut buf)?;

    let sum = buf
        .chunks_exact(WORD_SIZE)
        .map(|word| {
            let mut bytes = [0u8; WORD_SIZE];
            bytes.copy_from_slice(word);
            u64::from_le_bytes(bytes)
        })
        .fold(0u64, u64::wrapping_add);

    Ok(sum)
}

impl fmt::Display for MovieHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for MovieHash {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s.trim(), 16).map(MovieHash)
    }
}

impl From<MovieHash> for String {
    fn from(hash: MovieHash) -> String {
        hash.to_string()
    }
}

impl TryFrom<String> for MovieHash {
    type Error = std::num::ParseIntError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
