//! Input validation shared by the endpoints

use regex::Regex;
use std::sync::OnceLock;

/// `local@domain.tld` with a TLD of two or more characters
fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern is valid")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value.trim())
}

/// Trimmed copy of an optional string field (missing → empty)
pub fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}

/// Length in characters, not bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("  A@x.pt  "));
        assert!(!is_valid_email("ana@example.c"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("ana@@x.com"));
        assert!(!is_valid_email("anaexample.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_char_len_counts_accents_once() {
        assert_eq!(char_len("Zé"), 2);
        assert_eq!(char_len("João"), 4);
    }
}
