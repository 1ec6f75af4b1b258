//! Password strength rules.
//!
//! A password must be at least 8 characters and contain an uppercase letter,
//! a lowercase letter, a digit, and a symbol. The check returns a per-rule
//! breakdown so callers can tell the user which rule failed, not just that
//! validation failed.

use serde::Serialize;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Per-rule pass/fail breakdown of a password strength check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordChecks {
    /// At least [`MIN_PASSWORD_LENGTH`] characters.
    pub min_length: bool,
    /// At least one uppercase letter.
    pub uppercase: bool,
    /// At least one lowercase letter.
    pub lowercase: bool,
    /// At least one decimal digit.
    pub digit: bool,
    /// At least one non-alphanumeric character.
    pub symbol: bool,
}

impl PasswordChecks {
    /// Evaluate every strength rule against `password`.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            uppercase: password.chars().any(char::is_uppercase),
            lowercase: password.chars().any(char::is_lowercase),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password.chars().any(|c| !c.is_alphanumeric()),
        }
    }

    /// True iff every rule passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min_length && self.uppercase && self.lowercase && self.digit && self.symbol
    }

    /// Human-readable descriptions of the rules that failed, in a fixed order.
    #[must_use]
    pub fn failed_rules(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if !self.min_length {
            failed.push("must be at least 8 characters");
        }
        if !self.uppercase {
            failed.push("must contain an uppercase letter");
        }
        if !self.lowercase {
            failed.push("must contain a lowercase letter");
        }
        if !self.digit {
            failed.push("must contain a digit");
        }
        if !self.symbol {
            failed.push("must contain a symbol");
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_passes() {
        let checks = PasswordChecks::evaluate("Str0ng!pass");
        assert!(checks.is_valid());
        assert!(checks.failed_rules().is_empty());
    }

    #[test]
    fn test_each_rule_reported_individually() {
        let checks = PasswordChecks::evaluate("nouppercase1!");
        assert!(!checks.is_valid());
        assert_eq!(
            checks.failed_rules(),
            vec!["must contain an uppercase letter"]
        );

        let checks = PasswordChecks::evaluate("NOLOWERCASE1!");
        assert_eq!(
            checks.failed_rules(),
            vec!["must contain a lowercase letter"]
        );

        let checks = PasswordChecks::evaluate("NoDigitsHere!");
        assert_eq!(checks.failed_rules(), vec!["must contain a digit"]);

        let checks = PasswordChecks::evaluate("NoSymbols123");
        assert_eq!(checks.failed_rules(), vec!["must contain a symbol"]);
    }

    #[test]
    fn test_short_password_fails_multiple_rules() {
        let checks = PasswordChecks::evaluate("a1!");
        assert!(!checks.is_valid());
        assert!(!checks.min_length);
        assert!(!checks.uppercase);
        // Length and uppercase both reported
        assert_eq!(checks.failed_rules().len(), 2);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 8 multibyte characters with every class satisfied
        let checks = PasswordChecks::evaluate("Aä1!xyzw");
        assert!(checks.min_length);
    }
}
