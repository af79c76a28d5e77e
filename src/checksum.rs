//! Content digests for stored files.

use std::io::{self, Read};

use sha2::{Digest, Sha256};

const CHUNK_SIZE: usize = 64 * 1024;

/// Computes a digest over a byte stream. The digest format is opaque to the
/// adapter.
pub trait Checksum {
    fn checksum(&self, reader: &mut dyn Read) -> io::Result<String>;
}

impl<F> Checksum for F
where
    F: Fn(&mut dyn Read) -> io::Result<String>,
{
    fn checksum(&self, reader: &mut dyn Read) -> io::Result<String> {
        self(reader)
    }
}

/// Lowercase hex-encoded SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Checksum;

impl Checksum for Sha256Checksum {
    fn checksum(&self, reader: &mut dyn Read) -> io::Result<String> {
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}
