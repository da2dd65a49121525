//! Registration form validation - username rules and the password gate.

use secrecy::SecretString;
use thiserror::Error;

use crate::evaluator::evaluate_password_strength;

/// Minimum strength score a password must reach before registration is
/// accepted. Scores below this reject the submission.
pub const MIN_SUBMISSION_SCORE: u8 = 60;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Username must be between 3 and 30 characters")]
    UsernameLength,

    #[error("Username can only contain letters, numbers, underscores, and hyphens")]
    UsernameFormat,

    #[error("Please choose a stronger password")]
    WeakPassword { score: u8 },
}

/// Checks a username against the account rules: 3 to 30 characters, drawn
/// from letters, digits, underscores and hyphens.
pub fn validate_username(username: &str) -> Result<(), RegistrationError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&len) {
        return Err(RegistrationError::UsernameLength);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(RegistrationError::UsernameFormat);
    }
    Ok(())
}

/// Submission-time password gate.
///
/// Evaluates the candidate and rejects scores below
/// [`MIN_SUBMISSION_SCORE`]. Returns the score on success so callers can
/// display it.
pub fn check_submission_strength(candidate: &SecretString) -> Result<u8, RegistrationError> {
    let evaluation = evaluate_password_strength(candidate);
    if evaluation.score < MIN_SUBMISSION_SCORE {
        return Err(RegistrationError::WeakPassword {
            score: evaluation.score,
        });
    }
    Ok(evaluation.score)
}

/// Validates a registration form: username first, then the password gate.
pub fn validate_registration(
    username: &str,
    password: &SecretString,
) -> Result<(), RegistrationError> {
    validate_username(username)?;
    check_submission_strength(password)?;
    Ok(())
}
