use sha2::{Digest, Sha256};

/// Derives the on-disk namespace key for a caller credential.
///
/// The credential doubles as the storage namespace; hashing it keeps raw API
/// keys out of object paths while preserving the one-namespace-per-key
/// invariant.
pub fn namespace_for(credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.as_bytes());
    format!("{:x}", hasher.finalize())
}
