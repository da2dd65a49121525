//! Digit rule - checks for at least one number.

use secrecy::{ExposeSecret, SecretString};

/// Passes when the candidate contains an ASCII digit.
pub fn digit_rule(candidate: &SecretString) -> bool {
    candidate.expose_secret().chars().any(|c| c.is_ascii_digit())
}
