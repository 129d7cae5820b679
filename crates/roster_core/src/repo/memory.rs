//! In-memory user store.
//!
//! # Responsibility
//! - Provide a dependency-free `UserRepository` for tests, examples and the
//!   CLI smoke probe.
//!
//! # Invariants
//! - `list_all` returns records in insertion order.
//! - The whole store is guarded by one mutex, so `find_by_email` + `save`
//!   pairs are serialized per store instance.

use crate::model::user::User;
use crate::repo::user_repo::{RepoError, RepoResult, UserRepository};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Insertion-ordered in-memory account store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with already-persisted records.
    ///
    /// Records with an empty `id` get one minted, matching `save` semantics.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|mut user| {
                if user.id.is_empty() {
                    user.id = Uuid::new_v4().to_string();
                }
                user
            })
            .collect();
        Self {
            users: Mutex::new(users),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        // A poisoned lock only means another caller panicked mid-operation;
        // the Vec itself is still structurally sound.
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.lock().iter().find(|user| user.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.lock().iter().find(|user| user.email == email).cloned())
    }

    fn save(&self, candidate: &User) -> RepoResult<User> {
        let mut users = self.lock();
        let mut record = candidate.clone();

        if record.id.is_empty() {
            if users.iter().any(|user| user.email == record.email) {
                return Err(RepoError::EmailTaken(record.email.clone()));
            }
            record.id = Uuid::new_v4().to_string();
            users.push(record.clone());
            return Ok(record);
        }

        if let Some(taken) = users
            .iter()
            .find(|user| user.email == record.email && user.id != record.id)
        {
            return Err(RepoError::EmailTaken(taken.email.clone()));
        }

        match users.iter_mut().find(|user| user.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => users.push(record.clone()),
        }

        Ok(record)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let mut users = self.lock();
        let before = users.len();
        users.retain(|user| user.id != id);

        if users.len() == before {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryUserRepository;
    use crate::model::user::{CreateUserRequest, User};
    use crate::repo::user_repo::{RepoError, UserRepository};

    fn candidate(email: &str, name: &str) -> User {
        User::candidate(&CreateUserRequest::new(email, name))
    }

    #[test]
    fn save_mints_id_for_candidates() {
        let repo = InMemoryUserRepository::new();

        let saved = repo.save(&candidate("a@example.com", "A")).unwrap();
        assert!(!saved.id.is_empty());

        let found = repo.find_by_id(&saved.id).unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[test]
    fn save_rejects_taken_email_for_new_records() {
        let repo = InMemoryUserRepository::new();
        repo.save(&candidate("a@example.com", "A")).unwrap();

        let err = repo.save(&candidate("a@example.com", "B")).unwrap_err();
        assert!(matches!(err, RepoError::EmailTaken(email) if email == "a@example.com"));
    }

    #[test]
    fn save_with_existing_id_replaces_the_record() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.save(&candidate("a@example.com", "A")).unwrap();

        saved.name = "Renamed".to_string();
        repo.save(&saved).unwrap();

        let found = repo.find_by_id(&saved.id).unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_missing_record_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.delete("ghost").unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id == "ghost"));
    }

    #[test]
    fn list_all_preserves_insertion_order() {
        let repo = InMemoryUserRepository::new();
        repo.save(&candidate("a@example.com", "A")).unwrap();
        repo.save(&candidate("b@example.com", "B")).unwrap();
        repo.save(&candidate("c@example.com", "C")).unwrap();

        let emails: Vec<_> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|user| user.email)
            .collect();
        assert_eq!(emails, ["a@example.com", "b@example.com", "c@example.com"]);
    }
}
