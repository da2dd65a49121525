//! Registration and onboarding building blocks for a music-artist
//! community site.
//!
//! Two independent components make up the core:
//!
//! - **Password strength evaluation**: five fixed 20-point rules, a
//!   0-100 score with a per-rule pass map, and an observer hook the
//!   registration gate builds on.
//! - **Multi-asset upload coordination**: bounded slots for a profile
//!   image, gallery images and demo tracks plus four external link
//!   fields, with concurrent uploads, per-upload progress and one
//!   consolidated payload at the end.
//!
//! They never call each other; pages compose them. The thin payload
//! types for the profile and blog tables live alongside.
//!
//! # Features
//!
//! - `async` (default): Enables the upload coordinator, the backend
//!   boundary traits and the channel-based evaluator variant
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `ARTIST_BACKEND_URL` / `ARTIST_BACKEND_ANON_KEY`: backend
//!   connection settings, see [`backend::BackendConfig`]
//!
//! # Example
//!
//! ```rust
//! use artist_onboard::{evaluate_password_strength, StrengthLabel};
//! use secrecy::SecretString;
//!
//! let candidate = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let evaluation = evaluate_password_strength(&candidate);
//!
//! assert_eq!(evaluation.score, 100);
//! assert_eq!(evaluation.label(), StrengthLabel::VeryStrong);
//! assert!(evaluation.rule_passed("special"));
//! ```

// Internal modules
mod evaluator;
mod rules;

// Page-facing modules
pub mod backend;
pub mod blog;
pub mod profile;
pub mod registration;
pub mod uploads;

// Public API
pub use evaluator::{
    StrengthEvaluation, StrengthLabel, StrengthMeter, evaluate_password_strength,
};
pub use rules::{RULE_WEIGHT, RULES, Rule};

pub use registration::{MIN_SUBMISSION_SCORE, RegistrationError, validate_registration};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_strength_tx;

#[cfg(feature = "async")]
pub use uploads::{ConsolidatedPayload, UploadCoordinator};
