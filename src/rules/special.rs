//! Special character rule - checks for at least one non-alphanumeric.

use secrecy::{ExposeSecret, SecretString};

/// Passes when the candidate contains a character that is neither a letter
/// nor a digit.
pub fn special_rule(candidate: &SecretString) -> bool {
    candidate.expose_secret().chars().any(|c| !c.is_alphanumeric())
}
