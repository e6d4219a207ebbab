//! Short code generation
//!
//! Codes are fixed-length strings over a 62-character alphanumeric alphabet.
//! The generator makes no uniqueness promise; the store's unique constraint
//! is what rejects a duplicate.

/// 10 digits + 26 uppercase + 26 lowercase
pub const CODE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub const CODE_LENGTH: usize = 7;

/// Source of candidate short codes.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random codes from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        std::iter::repeat_with(|| {
            CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char
        })
        .take(CODE_LENGTH)
        .collect()
    }
}

/// Codes that collide with a fixed route and so can never be resolved
pub const RESERVED_CODES: &[&str] = &["metrics"];

/// Whether `code` could have been produced by a [`CodeGenerator`].
///
/// Anything else is known not to exist, so callers can skip the store.
#[inline]
pub fn is_valid_short_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_code_shape() {
        let generator = RandomCodeGenerator;
        for _ in 0..200 {
            let code = generator.generate();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            assert!(is_valid_short_code(&code));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let generator = RandomCodeGenerator;
        let codes: HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        // 62^7 的空间，100 次内重复几乎不可能
        assert!(codes.len() > 95);
    }

    #[test]
    fn test_alphabet_is_62_distinct_alphanumerics() {
        let distinct: HashSet<&u8> = CODE_ALPHABET.iter().collect();
        assert_eq!(distinct.len(), 62);
        assert!(CODE_ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("aB3dE9z"));
        assert!(is_valid_short_code("0000000"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("abc"));
        assert!(!is_valid_short_code("unknown1"));
        assert!(!is_valid_short_code("abc-def"));
        assert!(!is_valid_short_code("abc/def"));
        assert!(!is_valid_short_code("abcdéf"));
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved_code("metrics"));
        assert!(is_valid_short_code("metrics"));
        assert!(!is_reserved_code("Metrics"));
        assert!(!is_reserved_code("abcdefg"));
    }
}
