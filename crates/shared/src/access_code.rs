//! Anonymous access code generation and digest.
//!
//! Submitters are identified by a one-time access code instead of an
//! account. Only the SHA-256 digest of the code is ever persisted; lookup
//! is always digest-to-digest.

use rand::Rng;

use crate::crypto::sha256_hex;

/// Alphabet for access codes. Uppercase letters and digits minus the
/// visually ambiguous set (0/O, 1/I).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of symbols in a code, excluding delimiters.
const CODE_LENGTH: usize = 12;

/// Symbols per delimited group.
const GROUP_SIZE: usize = 4;

/// Delimiter between code groups.
const CODE_DELIMITER: char = '-';

/// Generates a new access code, e.g. `K7QP-M2XW-9RTD`.
///
/// 12 symbols over a 32-symbol alphabet give 60 bits of entropy, far
/// beyond brute-force range for an online lookup endpoint.
pub fn generate_access_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(CODE_LENGTH + CODE_LENGTH / GROUP_SIZE - 1);
    for i in 0..CODE_LENGTH {
        if i > 0 && i % GROUP_SIZE == 0 {
            code.push(CODE_DELIMITER);
        }
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

/// Computes the persisted digest of an access code.
///
/// Normalization strips delimiters so `K7QP-M2XW-9RTD` and `K7QPM2XW9RTD`
/// hash identically. The digest is deterministic and unsalted.
pub fn hash_access_code(code: &str) -> String {
    let normalized: String = code.chars().filter(|c| *c != CODE_DELIMITER).collect();
    sha256_hex(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_code_shape() {
        let code = generate_access_code();
        assert_eq!(code.len(), 14); // 12 symbols + 2 delimiters
        let groups: Vec<&str> = code.split('-').collect();
        assert_eq!(groups.len(), 3);
        for group in groups {
            assert_eq!(group.len(), 4);
        }
    }

    #[test]
    fn test_generated_code_alphabet() {
        for _ in 0..100 {
            let code = generate_access_code();
            for c in code.chars().filter(|c| *c != '-') {
                assert!(
                    CODE_ALPHABET.contains(&(c as u8)),
                    "unexpected symbol {c} in {code}"
                );
            }
        }
    }

    #[test]
    fn test_generated_code_excludes_ambiguous_symbols() {
        for _ in 0..200 {
            let code = generate_access_code();
            assert!(!code.contains('0'));
            assert!(!code.contains('O'));
            assert!(!code.contains('1'));
            assert!(!code.contains('I'));
        }
    }

    #[test]
    fn test_generated_codes_practically_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_access_code()));
        }
    }

    #[test]
    fn test_hash_is_deterministic() {
        let code = generate_access_code();
        assert_eq!(hash_access_code(&code), hash_access_code(&code));
    }

    #[test]
    fn test_hash_ignores_delimiters() {
        assert_eq!(
            hash_access_code("K7QP-M2XW-9RTD"),
            hash_access_code("K7QPM2XW9RTD")
        );
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let code = generate_access_code();
        let hash = hash_access_code(&code);
        assert_ne!(hash, code);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_different_codes_different_hashes() {
        assert_ne!(
            hash_access_code("AAAA-AAAA-AAAA"),
            hash_access_code("BBBB-BBBB-BBBB")
        );
    }
}
