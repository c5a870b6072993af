use std::fmt;

use sha1::{Digest, Sha1};

use crate::{DIGEST_HEX_LEN, HEX_CHARS, PREFIX_LEN};

/// SHA1 digest of a credential, rendered as 40 uppercase hex characters.
///
/// Only [`HashDigest::prefix`] is ever sent over the network. The full digest
/// and the suffix stay in process memory.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashDigest {
    hex: [u8; DIGEST_HEX_LEN],
}

impl HashDigest {
    /// The full 40-character hex digest.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: every byte is taken from HEX_CHARS, which is ASCII.
        unsafe { std::str::from_utf8_unchecked(&self.hex) }
    }

    /// The first 5 hex characters, the only part transmitted to the service.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.as_str()[..PREFIX_LEN]
    }

    /// The remaining 35 hex characters, matched locally.
    #[inline]
    pub fn suffix(&self) -> &str {
        &self.as_str()[PREFIX_LEN..]
    }
}

// The suffix together with the public prefix identifies the credential's hash,
// so only the prefix is shown.
impl fmt::Debug for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashDigest").field("prefix", &self.prefix()).finish_non_exhaustive()
    }
}

/// Computes the SHA1 digest of `credential` as uppercase hex.
///
/// The bytes are hashed exactly as given; no trimming or case folding.
pub fn digest(credential: &[u8]) -> HashDigest {
    let mut hasher = Sha1::new();
    hasher.update(credential);
    let hash: [u8; 20] = hasher.finalize().into();

    let mut hex = [0u8; DIGEST_HEX_LEN];
    for (i, byte) in hash.iter().enumerate() {
        hex[i * 2] = HEX_CHARS[(byte >> 4) as usize];
        hex[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
    }

    HashDigest { hex }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_digest_known_vectors() {
        assert_eq!(digest(b"password").as_str(), "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        assert_eq!(digest(b"password123").as_str(), "CBFDAC6008F9CAB4083784CBD1874F76618D2A97");
        // FIPS 180 "abc" test vector
        assert_eq!(digest(b"abc").as_str(), "A9993E364706816ABA3E25717850C26C9CD0D89D");
        assert_eq!(digest(b"").as_str(), "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
    }

    #[test]
    fn test_digest_matches_raw_hash_bytes() {
        let raw = hex!("5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        let mut hasher = Sha1::new();
        hasher.update(b"password");
        let hash: [u8; 20] = hasher.finalize().into();
        assert_eq!(hash, raw);
    }

    #[test]
    fn test_prefix_and_suffix_split() {
        let d = digest(b"password");
        assert_eq!(d.prefix(), "5BAA6");
        assert_eq!(d.suffix(), "1E4C9B93F3F0682250B6CF8331B7EE68FD8");
        assert_eq!(d.prefix().len(), PREFIX_LEN);
        assert_eq!(d.suffix().len(), crate::SUFFIX_LEN);
    }

    #[test]
    fn test_digest_is_deterministic_and_byte_exact() {
        assert_eq!(digest(b"hunter2"), digest(b"hunter2"));
        assert_ne!(digest(b"hunter2"), digest(b"hunter2 "));
        assert_ne!(digest(b"Hunter2"), digest(b"hunter2"));
    }

    #[test]
    fn test_digest_debug_hides_suffix() {
        let d = digest(b"password");
        let rendered = format!("{d:?}");
        assert!(rendered.contains("5BAA6"));
        assert!(!rendered.contains(d.suffix()));
    }
}
