//! Domain model for user accounts.
//!
//! # Responsibility
//! - Define the canonical account record and creation request shapes.
//! - Own request validation, including the email-shape rule.
//!
//! # Invariants
//! - A persisted `User` always carries a non-empty, store-minted `id`.
//! - No two persisted records share the same `email`.

pub mod email;
pub mod user;
