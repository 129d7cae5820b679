//! User account record and creation request.
//!
//! # Responsibility
//! - Define the persisted account shape shared by all store implementations.
//! - Validate creation requests before any collaborator is involved.
//!
//! # Invariants
//! - `id` is opaque, minted by the store, and immutable once assigned.
//! - `email` uniqueness is checked by the service and enforced by the store.

use crate::model::email::is_valid_email;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque store-minted account identifier.
pub type UserId = String;

/// Persisted user account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-minted identifier; empty only on unsaved candidates.
    pub id: UserId,
    /// Unique, shape-validated address.
    pub email: String,
    /// Display name; free-form, not validated.
    pub name: String,
    /// Accounts start active; deactivation is a store concern.
    pub active: bool,
}

impl User {
    /// Builds the unsaved candidate record derived from a creation request.
    ///
    /// The store mints the final `id`; until then it stays empty.
    pub fn candidate(request: &CreateUserRequest) -> Self {
        Self {
            id: String::new(),
            email: request.email.clone(),
            name: request.name.clone(),
            active: true,
        }
    }
}

/// Caller-supplied input for account creation. Unvalidated until the
/// service processes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Checks the required-field and email-shape rules.
    ///
    /// # Contract
    /// - Pure: no collaborator access happens here.
    /// - `name` is intentionally unvalidated.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !is_valid_email(&self.email) {
            return Err(UserValidationError::MalformedEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// Validation failure for a creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// `email` was empty.
    EmptyEmail,
    /// `email` does not satisfy the email-shape rule.
    MalformedEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail(email) => write!(f, "malformed email address: `{email}`"),
        }
    }
}

impl Error for UserValidationError {}
