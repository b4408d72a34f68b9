//! Content fingerprints.
//!
//! A fingerprint is the 128-bit XXH3 of the whole file plus its length.
//! Equal fingerprints are treated as equal content. XXH3 is not a
//! cryptographic hash; a false match is possible in theory and accepted.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Read buffer size for streaming the file through the hasher
const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    digest: u128,
    len: u64,
}

impl Fingerprint {
    /// Hash everything readable from `reader`
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Xxh3::new();
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut len = 0u64;

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..read]);
            len += read as u64;
        }

        Ok(Self {
            digest: hasher.digest128(),
            len,
        })
    }

    /// Hash the full content of the file at `path`
    pub fn of_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.digest)
    }
}
