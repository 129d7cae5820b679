//! SQLite store behavior: CRUD, unique email enforcement, schema guard.

use roster_core::db::migrations::latest_version;
use roster_core::db::open_db_in_memory;
use roster_core::{CreateUserRequest, RepoError, SqliteUserRepository, User, UserRepository};
use rusqlite::Connection;

fn candidate(email: &str, name: &str) -> User {
    User::candidate(&CreateUserRequest::new(email, name))
}

#[test]
fn save_mints_id_and_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let saved = repo.save(&candidate("test@example.com", "Test User")).unwrap();
    assert!(!saved.id.is_empty());
    assert!(saved.active);

    let by_id = repo.find_by_id(&saved.id).unwrap().unwrap();
    assert_eq!(by_id, saved);

    let by_email = repo.find_by_email("test@example.com").unwrap().unwrap();
    assert_eq!(by_email, saved);
}

#[test]
fn find_by_email_is_exact_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    repo.save(&candidate("test@example.com", "Test User")).unwrap();

    assert!(repo.find_by_email("other@example.com").unwrap().is_none());
    assert!(repo.find_by_email("").unwrap().is_none());
}

#[test]
fn save_with_existing_id_updates_the_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let mut saved = repo.save(&candidate("test@example.com", "Draft")).unwrap();
    saved.name = "Final".to_string();
    saved.active = false;
    repo.save(&saved).unwrap();

    let loaded = repo.find_by_id(&saved.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Final");
    assert!(!loaded.active);
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn unique_email_index_rejects_second_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    repo.save(&candidate("taken@example.com", "First")).unwrap();

    let err = repo.save(&candidate("taken@example.com", "Second")).unwrap_err();
    assert!(matches!(err, RepoError::EmailTaken(email) if email == "taken@example.com"));
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn delete_removes_record_and_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let saved = repo.save(&candidate("test@example.com", "Test User")).unwrap();
    repo.delete(&saved.id).unwrap();
    assert!(repo.find_by_id(&saved.id).unwrap().is_none());

    let err = repo.delete(&saved.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == saved.id));
}

#[test]
fn list_all_returns_every_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.save(&candidate("a@example.com", "Alice")).unwrap();
    repo.save(&candidate("b@example.com", "Bob")).unwrap();
    repo.save(&candidate("c@example.com", "Charlie")).unwrap();

    let emails: Vec<_> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|user| user.email)
        .collect();
    assert_eq!(emails.len(), 3);
    assert!(emails.contains(&"a@example.com".to_string()));
    assert!(emails.contains(&"b@example.com".to_string()));
    assert!(emails.contains(&"c@example.com".to_string()));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteUserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_users_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteUserRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("users"))));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE users (
            user_id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteUserRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "users",
            column: "is_active"
        })
    ));
}

#[test]
fn read_rejects_invalid_persisted_state() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO users (user_id, email, name, is_active)
         VALUES ('corrupt-id', 'not-an-email', 'Corrupt', 7);",
        [],
    )
    .unwrap();

    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let err = repo.find_by_id("corrupt-id").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
