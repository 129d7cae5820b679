//! Account creation and lookup use-cases.
//!
//! # Responsibility
//! - Validate creation requests, detect duplicates, persist, notify.
//! - Expose pass-through read APIs over the store.
//!
//! # Invariants
//! - No collaborator is invoked for an invalid request.
//! - Observable order per successful creation: duplicate check, then save,
//!   then exactly one welcome notification.
//! - No retries and no rollback: a notifier failure leaves the persisted
//!   record in place and surfaces as a collaborator error.

use crate::model::user::{CreateUserRequest, User, UserValidationError};
use crate::notify::{NotifyError, WelcomeNotifier};
use crate::repo::user_repo::{RepoError, UserRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by account use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    /// Request failed validation; no collaborator was called.
    Validation(UserValidationError),
    /// Another record already owns the email; nothing was written.
    DuplicateEmail(String),
    /// The store or the notifier failed. The two are deliberately not
    /// distinguished here; the original cause stays reachable via
    /// `Error::source`.
    Collaborator(Box<dyn Error + Send + Sync + 'static>),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already registered: `{email}`"),
            Self::Collaborator(err) => write!(f, "collaborator failure: {err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateEmail(_) => None,
            Self::Collaborator(err) => Some(err.as_ref()),
        }
    }
}

impl From<UserValidationError> for UserServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        Self::Collaborator(Box::new(value))
    }
}

impl From<NotifyError> for UserServiceError {
    fn from(value: NotifyError) -> Self {
        Self::Collaborator(Box::new(value))
    }
}

/// Account service facade over store and notifier collaborators.
///
/// The service is stateless between calls; each call runs its sequence to
/// completion synchronously. Making the duplicate-check/save pair race-free
/// under concurrent callers is the store's responsibility.
pub struct UserService<R: UserRepository, N: WelcomeNotifier> {
    repo: R,
    notifier: N,
}

impl<R: UserRepository, N: WelcomeNotifier> UserService<R, N> {
    pub fn new(repo: R, notifier: N) -> Self {
        Self { repo, notifier }
    }

    /// Creates one account from a caller-supplied request.
    ///
    /// # Contract
    /// - Validation happens before any store or notifier call.
    /// - A duplicate email fails the call with zero writes and zero
    ///   notifications.
    /// - On success the returned record carries the request's `email` and
    ///   `name` and a non-empty store-minted `id`.
    pub fn create_user(&self, request: &CreateUserRequest) -> Result<User, UserServiceError> {
        request.validate()?;

        if let Some(existing) = self.repo.find_by_email(&request.email)? {
            return Err(UserServiceError::DuplicateEmail(existing.email));
        }

        let saved = self.repo.save(&User::candidate(request))?;
        self.notifier.send_welcome(&saved)?;

        Ok(saved)
    }

    /// Looks up one account by id.
    ///
    /// Absence is a normal outcome; an empty `id` simply yields `None`.
    pub fn find_by_id(&self, id: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Lists all accounts exactly as the store returns them.
    pub fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repo.list_all()?)
    }
}
