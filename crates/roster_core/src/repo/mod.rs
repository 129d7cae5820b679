//! Account store abstractions and reference implementations.
//!
//! # Responsibility
//! - Define the persistence contract the service orchestrates against.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - "Record not found" is `Ok(None)`, never an error.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod memory;
pub mod user_repo;
