//! Identifier value generation
//!
//! Produces the value for a single identifier kind. All randomness comes from
//! the generator passed by the caller so that a seeded run is reproducible.

use rand::Rng;
use sha3::{Digest, Sha3_256};
use uuid::{Builder, Uuid};

use crate::types::IdKind;

/// Number of random bytes hashed into an email surrogate
pub const EMAIL_SOURCE_BYTES: usize = 16;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Factory for identifier values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierFactory {
    ppid_count: usize,
}

impl IdentifierFactory {
    /// Create a factory producing custom identifiers of `ppid_count` hex characters
    pub fn new(ppid_count: usize) -> Self {
        Self { ppid_count }
    }

    /// Length of generated custom identifiers
    pub fn ppid_count(&self) -> usize {
        self.ppid_count
    }

    /// Generate a value for the given identifier kind
    pub fn generate<R: Rng + ?Sized>(&self, kind: IdKind, rng: &mut R) -> String {
        match kind {
            IdKind::Email => Self::email_hash(rng),
            IdKind::Idfa | IdKind::Gaid => Self::advertising_id(rng),
            IdKind::Custom(_) => self.custom_id(rng),
        }
    }

    /// SHA3-256 hex digest of 16 random bytes, standing in for a hashed email
    pub fn email_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
        let source: [u8; EMAIL_SOURCE_BYTES] = rng.gen();
        hex::encode(Sha3_256::digest(source))
    }

    /// Random version 4 UUID in uppercase hyphenated form
    pub fn advertising_id<R: Rng + ?Sized>(rng: &mut R) -> String {
        let uuid: Uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
        uuid.hyphenated().to_string().to_uppercase()
    }

    /// Lowercase hex string of the configured length
    pub fn custom_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        (0..self.ppid_count)
            .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_lower_hex(value: &str) -> bool {
        value.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_email_hash_is_64_lower_hex() {
        let mut rng = StdRng::seed_from_u64(7);
        let value = IdentifierFactory::email_hash(&mut rng);
        assert_eq!(value.len(), 64);
        assert!(is_lower_hex(&value));
    }

    #[test]
    fn test_email_hash_is_sha3_of_drawn_bytes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut replay = rng.clone();

        let value = IdentifierFactory::email_hash(&mut rng);
        let source: [u8; EMAIL_SOURCE_BYTES] = replay.gen();
        assert_eq!(value, hex::encode(Sha3_256::digest(source)));
    }

    #[test]
    fn test_sha3_digest_of_empty_input() {
        assert_eq!(
            hex::encode(Sha3_256::digest(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_advertising_id_is_upper_uuid() {
        let mut rng = StdRng::seed_from_u64(7);
        let value = IdentifierFactory::advertising_id(&mut rng);

        assert_eq!(value.len(), 36);
        assert_eq!(value, value.to_uppercase());
        let parsed = Uuid::parse_str(&value).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        for (index, c) in value.chars().enumerate() {
            if [8, 13, 18, 23].contains(&index) {
                assert_eq!(c, '-');
            } else {
                assert!(c.is_ascii_hexdigit());
            }
        }
    }

    #[test]
    fn test_custom_id_respects_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [1, 8, 32, 36, 100] {
            let value = IdentifierFactory::new(length).custom_id(&mut rng);
            assert_eq!(value.len(), length);
            assert!(is_lower_hex(&value));
        }
    }

    #[test]
    fn test_idfa_and_gaid_are_drawn_independently() {
        let mut rng = StdRng::seed_from_u64(99);
        let factory = IdentifierFactory::new(36);
        let idfa = factory.generate(IdKind::Idfa, &mut rng);
        let gaid = factory.generate(IdKind::Gaid, &mut rng);
        assert_ne!(idfa, gaid);
    }

    #[test]
    fn test_same_seed_same_values() {
        let factory = IdentifierFactory::new(36);
        let mut first = StdRng::seed_from_u64(1234);
        let mut second = StdRng::seed_from_u64(1234);

        for kind in IdKind::all() {
            assert_eq!(factory.generate(kind, &mut first), factory.generate(kind, &mut second));
        }
    }
}
