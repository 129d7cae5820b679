//! Core domain logic for Roster, a small user account service.
//! This crate is the single source of truth for the account creation
//! contract: validation, duplicate detection, persistence and the welcome
//! notification side effect.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::email::is_valid_email;
pub use model::user::{CreateUserRequest, User, UserId, UserValidationError};
pub use notify::{LogNotifier, NotifyError, WelcomeNotifier};
pub use repo::memory::InMemoryUserRepository;
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::{UserService, UserServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
