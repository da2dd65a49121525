//! Password strength evaluator - main evaluation logic.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::rules::{RULE_WEIGHT, RULES};

/// Strength label shown next to the meter.
///
/// Boundaries are inclusive on the upper end: a score of exactly 60 is
/// still `Medium`, 61 is `Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    /// Maps a score to its label.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => StrengthLabel::VeryWeak,
            21..=40 => StrengthLabel::Weak,
            41..=60 => StrengthLabel::Medium,
            61..=80 => StrengthLabel::Strong,
            _ => StrengthLabel::VeryStrong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::VeryWeak => "Very Weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Medium => "Medium",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating one candidate password.
///
/// Derived fresh from the candidate on every call; nothing is retained
/// between evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthEvaluation {
    /// Total score: 20 points per passing rule, always a multiple of 20 in
    /// 0..=100.
    pub score: u8,
    /// Pass/fail per rule id. Complete on every call - one entry per rule.
    pub passed: BTreeMap<&'static str, bool>,
}

impl StrengthEvaluation {
    pub fn label(&self) -> StrengthLabel {
        StrengthLabel::from_score(self.score)
    }

    /// Whether the rule with the given id passed. Unknown ids read as
    /// failed.
    pub fn rule_passed(&self, id: &str) -> bool {
        self.passed.get(id).copied().unwrap_or(false)
    }
}

/// Evaluates password strength and returns a detailed evaluation.
///
/// Total and deterministic: every candidate, the empty string included,
/// produces a result and identical input always yields identical output.
/// All five rules run on every call - no short-circuit - so the per-rule
/// map is complete even when the first rule already failed.
pub fn evaluate_password_strength(candidate: &SecretString) -> StrengthEvaluation {
    let mut passed = BTreeMap::new();
    let mut score = 0u8;

    for rule in &RULES {
        let ok = (rule.check)(candidate);
        passed.insert(rule.id, ok);
        if ok {
            score += RULE_WEIGHT;
        }
    }

    StrengthEvaluation { score, passed }
}

/// Evaluator handle carrying an optional score observer.
///
/// The observer is invoked synchronously with the new score on every
/// `evaluate` call, before the result is returned. Submission gates rely on
/// this: by the time the caller sees the evaluation, the observer has
/// already seen the score.
#[derive(Default)]
pub struct StrengthMeter {
    observer: Option<Box<dyn Fn(u8) + Send + Sync>>,
}

impl StrengthMeter {
    pub fn new() -> Self {
        Self { observer: None }
    }

    pub fn with_observer(observer: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self {
            observer: Some(Box::new(observer)),
        }
    }

    /// Registers or replaces the score observer.
    pub fn set_observer(&mut self, observer: impl Fn(u8) + Send + Sync + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Evaluates the candidate, notifying the observer before returning.
    pub fn evaluate(&self, candidate: &SecretString) -> StrengthEvaluation {
        let evaluation = evaluate_password_strength(candidate);
        if let Some(observer) = &self.observer {
            observer(evaluation.score);
        }
        evaluation
    }
}

impl fmt::Debug for StrengthMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrengthMeter")
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Async version that sends the evaluation result via channel.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    candidate: &SecretString,
    tx: mpsc::Sender<StrengthEvaluation>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    // Debounce so rapid keystrokes collapse into one evaluation.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let evaluation = evaluate_password_strength(candidate);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}
