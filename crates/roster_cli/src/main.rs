//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the account creation contract end to end against the
//!   in-memory store, without any external setup.
//! - Keep output deterministic for quick local sanity checks.

use roster_core::{
    CreateUserRequest, InMemoryUserRepository, LogNotifier, UserService, UserServiceError,
};

fn main() {
    println!("roster_core version={}", roster_core::core_version());

    let service = UserService::new(InMemoryUserRepository::new(), LogNotifier);

    let request = CreateUserRequest::new("smoke@example.com", "Smoke Test");
    match service.create_user(&request) {
        Ok(user) => println!("created user_id={} email={}", user.id, user.email),
        Err(err) => {
            eprintln!("create failed: {err}");
            std::process::exit(1);
        }
    }

    // Second attempt with the same address must be rejected before any write.
    match service.create_user(&request) {
        Err(UserServiceError::DuplicateEmail(email)) => {
            println!("duplicate rejected email={email}");
        }
        Ok(_) => {
            eprintln!("duplicate was not rejected");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("unexpected failure: {err}");
            std::process::exit(1);
        }
    }

    match service.list_users() {
        Ok(users) => println!("accounts={}", users.len()),
        Err(err) => {
            eprintln!("list failed: {err}");
            std::process::exit(1);
        }
    }
}
