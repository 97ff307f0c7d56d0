//! Synthetic identifiers derived from a truncated content hash.
//!
//! Ids are stable for identical input but only unique within the truncated
//! range (100 000 values); collisions are possible and accepted.

use sha2::{Digest, Sha256};

/// Number of distinct values an id can take.
pub const ID_SPACE: u64 = 100_000;

/// First eight bytes of the SHA-256 digest, big-endian.
pub fn stable_hash(input: &str) -> u64 {
    let digest = Sha256::digest(input.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// `workflow-NNNNN`, keyed by the workflow's display name.
pub fn instance_id(name: &str) -> String {
    format!("workflow-{:05}", stable_hash(name) % ID_SPACE)
}

/// `error-xxxxxxxx`, keyed by the serialized node list.
pub fn error_node_id(nodes_fingerprint: &str) -> String {
    format!("error-{:08x}", stable_hash(nodes_fingerprint) % ID_SPACE)
}
