//! Email-shape validation.
//!
//! # Responsibility
//! - Decide whether a string looks like a deliverable address.
//!
//! # Invariants
//! - Pure function: no collaborator access, no side effects.
//! - Shape-only check; deliverability is the notifier's problem.

use once_cell::sync::Lazy;
use regex::Regex;

// Exactly one `@` with non-empty sides, and a domain dot that is neither
// the first nor the last character of the domain.
static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid email shape regex"));

/// Returns whether `email` satisfies the account email-shape rule.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE_RE.is_match(email)
}
