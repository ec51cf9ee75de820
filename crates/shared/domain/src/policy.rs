//! Password policies.
//!
//! Callers hold an `Arc<dyn PasswordPolicy>` so a stricter rule can be swapped
//! in without touching them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MIN_PASSWORD_LENGTH;

/// Structural rule applied to candidate passwords.
pub trait PasswordPolicy: Send + Sync {
    /// Returns `true` if `candidate` satisfies the rule. Pure.
    fn validate(&self, candidate: &str) -> bool;

    /// Human readable summary of the rule, used in rejection messages.
    fn describe(&self) -> &str;
}

// The regex crate has no look-around, so the rule is split in three.
static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[A-Za-z0-9]{{{},}}$", MIN_PASSWORD_LENGTH)).expect("valid regex")
});
static HAS_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Za-z]").expect("valid regex"));
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]").expect("valid regex"));

/// At least eight ASCII letters or digits, with one of each.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalPasswordPolicy;

impl MinimalPasswordPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordPolicy for MinimalPasswordPolicy {
    fn validate(&self, candidate: &str) -> bool {
        ALPHANUMERIC.is_match(candidate)
            && HAS_LETTER.is_match(candidate)
            && HAS_DIGIT.is_match(candidate)
    }

    fn describe(&self) -> &str {
        "at least 8 letters or digits, including one letter and one digit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> MinimalPasswordPolicy {
        MinimalPasswordPolicy::new()
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(!policy().validate("short1"));
    }

    #[test]
    fn test_letters_and_digit_accepted() {
        assert!(policy().validate("longenough1"));
        assert!(policy().validate("Abcdefg1"));
        assert!(policy().validate("1234567A"));
    }

    #[test]
    fn test_exactly_minimum_length() {
        assert!(policy().validate("abcdefg1"));
        assert!(!policy().validate("abcdef1"));
    }

    #[test]
    fn test_requires_a_digit() {
        assert!(!policy().validate("onlyletters"));
    }

    #[test]
    fn test_requires_a_letter() {
        assert!(!policy().validate("1234567890"));
    }

    #[test]
    fn test_rejects_symbols_and_whitespace() {
        assert!(!policy().validate("Abcdefg1!"));
        assert!(!policy().validate("Abcd efg1"));
        assert!(!policy().validate("Ábcdefg1"));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let boxed: Box<dyn PasswordPolicy> = Box::new(policy());
        assert!(boxed.validate("longenough1"));
        assert!(!boxed.describe().is_empty());
    }
}
