// ABOUTME: Shared utility functions for PRDForge
// ABOUTME: Prefixed ID generation, timestamps, and log-safe text previews

use chrono::Utc;

const ID_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];
const ID_LENGTH: usize = 12;

/// Generate a unique record ID such as `prd_4fZk81QaLm0x`
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid::nanoid!(ID_LENGTH, &ID_ALPHABET))
}

/// Milliseconds since the Unix epoch, used for export file names
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// First `max_chars` characters of `text`, safe for multi-byte input
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id1 = generate_id("prd");
        let id2 = generate_id("prd");

        assert!(id1.starts_with("prd_"));
        assert_eq!(id1.len(), "prd_".len() + ID_LENGTH);
        assert_ne!(id1, id2);
        assert!(id1["prd_".len()..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "제품 요구사항 문서";
        assert_eq!(preview(text, 2), "제품");
        assert_eq!(preview(text, 100), text);
        assert_eq!(preview("", 5), "");
    }
}
