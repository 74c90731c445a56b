use burrow_core::base62;
use burrow_core::ShortCode;
use sha2::{Digest, Sha256};

/// A 256-bit digest of a URL and a salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The first 128 bits of the digest, read big-endian.
    pub fn prefix(&self) -> u128 {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&self.0[..16]);
        u128::from_be_bytes(buf)
    }

    /// Derives a candidate short code of exactly `width` characters.
    pub fn to_code(&self, width: usize) -> ShortCode {
        ShortCode::new_unchecked(base62::encode_fixed(self.prefix(), width))
    }
}

/// Computes fingerprints for candidate derivation.
///
/// Implementations must be pure: the same `(url, salt)` always yields the
/// same fingerprint, otherwise idempotent allocation cannot find earlier
/// records.
pub trait Fingerprinter: Send + Sync + 'static {
    fn fingerprint(&self, url: &str, salt: u32) -> Fingerprint;
}

/// SHA-256 over the URL bytes, followed by the big-endian salt when the
/// salt is non-zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, url: &str, salt: u32) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        if salt > 0 {
            hasher.update(salt.to_be_bytes());
        }
        Fingerprint(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        let a = Sha256Fingerprinter.fingerprint("https://example.com", 0);
        let b = Sha256Fingerprinter.fingerprint("https://example.com", 0);
        assert_eq!(a, b);
    }

    #[test]
    fn unsalted_fingerprint_is_plain_sha256() {
        let fp = Sha256Fingerprinter.fingerprint("abc", 0);
        // SHA-256("abc")
        assert_eq!(fp.as_bytes()[..4], [0xba_u8, 0x78, 0x16, 0xbf]);
    }

    #[test]
    fn salt_changes_fingerprint() {
        let base = Sha256Fingerprinter.fingerprint("https://example.com", 0);
        let salted = Sha256Fingerprinter.fingerprint("https://example.com", 1);
        let salted_again = Sha256Fingerprinter.fingerprint("https://example.com", 2);
        assert_ne!(base, salted);
        assert_ne!(salted, salted_again);
    }

    #[test]
    fn url_changes_fingerprint() {
        let a = Sha256Fingerprinter.fingerprint("https://example.com/a", 0);
        let b = Sha256Fingerprinter.fingerprint("https://example.com/b", 0);
        assert_ne!(a, b);
    }

    #[test]
    fn prefix_reads_leading_bytes() {
        let mut bytes = [0u8; 32];
        bytes[15] = 1;
        bytes[16] = 0xff;
        assert_eq!(Fingerprint::from_bytes(bytes).prefix(), 1);
    }

    #[test]
    fn code_has_requested_width() {
        let fp = Sha256Fingerprinter.fingerprint("https://example.com", 0);
        assert_eq!(fp.to_code(6).width(), 6);
        assert_eq!(fp.to_code(7).width(), 7);
        assert!(fp.to_code(6).as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
