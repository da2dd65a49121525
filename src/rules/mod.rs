//! Password strength rules
//!
//! Each rule checks one independent aspect of a candidate password.

mod digit;
mod length;
mod lowercase;
mod special;
mod uppercase;

pub use digit::digit_rule;
pub use length::length_rule;
pub use lowercase::lowercase_rule;
pub use special::special_rule;
pub use uppercase::uppercase_rule;

use secrecy::SecretString;

/// Points awarded for each passing rule. Five rules at 20 points each make
/// the maximum achievable score exactly 100.
pub const RULE_WEIGHT: u8 = 20;

/// A single strength rule: a stable identifier, the label shown in the
/// requirements checklist, and the predicate deciding pass/fail.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub label: &'static str,
    pub check: fn(&SecretString) -> bool,
}

/// The five fixed rules, in display order.
///
/// Rules are independent of each other; evaluation order never changes the
/// outcome.
pub const RULES: [Rule; 5] = [
    Rule {
        id: "length",
        label: "At least 8 characters",
        check: length_rule,
    },
    Rule {
        id: "uppercase",
        label: "At least one uppercase letter",
        check: uppercase_rule,
    },
    Rule {
        id: "lowercase",
        label: "At least one lowercase letter",
        check: lowercase_rule,
    },
    Rule {
        id: "number",
        label: "At least one number",
        check: digit_rule,
    },
    Rule {
        id: "special",
        label: "At least one special character",
        check: special_rule,
    },
];
