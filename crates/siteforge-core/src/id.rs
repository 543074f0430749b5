//! Document identity.
//!
//! Every document is keyed by a 12-byte identifier: 4 big-endian bytes of
//! UNIX seconds, 5 process-random bytes, and a 3-byte rolling counter.
//! Identifiers sort by creation time and render as 24 lowercase hex
//! characters, which is also the only accepted text form.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SiteforgeError, SiteforgeResult};

/// Stable unique key of a document, used for upsert/delete matching.
///
/// Immutable once assigned: merges and replacements always preserve the
/// identity of the stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; 12]);

/// Random component shared by all identifiers of this process.
fn process_entropy() -> &'static [u8; 5] {
    static ENTROPY: OnceLock<[u8; 5]> = OnceLock::new();
    ENTROPY.get_or_init(|| {
        let mut rng = rand::rng();
        rand::Rng::random(&mut rng)
    })
}

/// Rolling 3-byte counter, randomly seeded per process.
fn next_counter() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| {
        let mut rng = rand::rng();
        AtomicU32::new(rand::Rng::random(&mut rng))
    });
    counter.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF
}

impl DocumentId {
    /// Generate a fresh identifier stamped with the current time.
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp().max(0) as u32;
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process_entropy());
        bytes[9..].copy_from_slice(&next_counter().to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse the 24-character hex text form.
    pub fn parse(input: &str) -> SiteforgeResult<Self> {
        if input.len() != 24 {
            return Err(SiteforgeError::Validation {
                message: format!(
                    "document id must be 24 hex characters, got {} in {input:?}",
                    input.len()
                ),
            });
        }
        let decoded = hex::decode(input).map_err(|e| SiteforgeError::Validation {
            message: format!("document id {input:?} is not valid hex: {e}"),
        })?;
        let mut bytes = [0u8; 12];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Creation time carried in the leading 4 bytes, as UNIX seconds.
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for DocumentId {
    type Err = SiteforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_roundtrips() {
        let id = DocumentId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 24);
        assert_eq!(DocumentId::parse(&text).unwrap(), id);
    }

    #[test]
    fn accepts_known_hex() {
        let id = DocumentId::parse("652f1a2b3c4d5e6f70819111").unwrap();
        assert_eq!(id.to_string(), "652f1a2b3c4d5e6f70819111");
        assert_eq!(id.timestamp_secs(), 0x652f_1a2b);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(DocumentId::parse("652f").is_err());
        assert!(DocumentId::parse("").is_err());
        assert!(DocumentId::parse("652f1a2b3c4d5e6f7081911100").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(DocumentId::parse("zzzz1a2b3c4d5e6f70819111").is_err());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn orders_by_creation_time() {
        let older = DocumentId::parse("000000010000000000000000").unwrap();
        let newer = DocumentId::parse("00000002ffffffffffffffff").unwrap();
        assert!(older < newer);
    }

    #[test]
    fn serde_uses_hex_string() {
        let id = DocumentId::parse("652f1a2b3c4d5e6f70819111").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"652f1a2b3c4d5e6f70819111\"");
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
