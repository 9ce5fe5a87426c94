//! BLAKE3 helpers for cache keys.

/// Full 32-byte BLAKE3 digest of a text, used as the embedding cache key.
#[inline]
pub fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Hex form of [`hash_text`], handy for log fields.
#[inline]
pub fn hash_text_hex(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_text_is_deterministic() {
        assert_eq!(hash_text("heureux"), hash_text("heureux"));
    }

    #[test]
    fn test_hash_text_distinguishes_case() {
        assert_ne!(hash_text("Heureux"), hash_text("heureux"));
    }

    #[test]
    fn test_hash_text_hex_matches_bytes() {
        let hex = hash_text_hex("joyeux");
        assert_eq!(hex.len(), 64);

        let bytes = hash_text("joyeux");
        let expected: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(hex, expected);
    }
}
