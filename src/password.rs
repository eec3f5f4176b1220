//! Password strength rating for sign-up and password-change forms.
//!
//! Five rules, one point each: at least 8 characters, a lowercase letter, an
//! uppercase letter, a digit, and a character outside `[A-Za-z0-9]`. Fewer
//! than 2 points is weak, fewer than 4 is medium, anything else strong.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

pub const MIN_LENGTH: usize = 8;

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]").expect("static regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").expect("static regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]").expect("static regex"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Za-z0-9]").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => PasswordStrength::Weak,
            2 | 3 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
        }
    }

    /// Class name the strength meter toggles.
    pub fn css_class(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of rules satisfied, 0..=5.
///
/// Length is measured in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts twice.
pub fn score(password: &str) -> u8 {
    let rules = [
        password.encode_utf16().count() >= MIN_LENGTH,
        LOWERCASE.is_match(password),
        UPPERCASE.is_match(password),
        DIGIT.is_match(password),
        SPECIAL.is_match(password),
    ];
    rules.iter().filter(|r| **r).count() as u8
}

/// `None` for an empty password (the meter shows nothing).
pub fn evaluate(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    Some(PasswordStrength::from_score(score(password)))
}
