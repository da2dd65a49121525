//! Length rule - checks the candidate meets the minimum length.

use secrecy::{ExposeSecret, SecretString};

const MIN_LENGTH: usize = 8;

/// Passes when the candidate is at least 8 characters long.
pub fn length_rule(candidate: &SecretString) -> bool {
    candidate.expose_secret().len() >= MIN_LENGTH
}
