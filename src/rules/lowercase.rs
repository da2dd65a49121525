//! Lowercase rule - checks for at least one lowercase letter.

use secrecy::{ExposeSecret, SecretString};

/// Passes when the candidate contains a lowercase letter.
pub fn lowercase_rule(candidate: &SecretString) -> bool {
    candidate.expose_secret().chars().any(|c| c.is_lowercase())
}
