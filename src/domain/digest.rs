//! One-way password digests.

use sha2::{Digest, Sha256};

/// Turns a plaintext password into the value stored in the `password` column.
pub trait PasswordHasher {
    fn digest(&self, password: &str) -> String;
}

/// Unsalted SHA-256, lowercase hex. Matches rows written by earlier releases.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn digest(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
