//! Uppercase rule - checks for at least one uppercase letter.

use secrecy::{ExposeSecret, SecretString};

/// Passes when the candidate contains an uppercase letter.
pub fn uppercase_rule(candidate: &SecretString) -> bool {
    candidate.expose_secret().chars().any(|c| c.is_uppercase())
}
