//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and notifier calls into account-level APIs.
//! - Keep callers decoupled from persistence and transport details.

pub mod user_service;
