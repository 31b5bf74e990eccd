//! Core use-case services.
//!
//! # Responsibility
//! - Enforce business rules before tasks reach the repository.
//! - Keep CLI callers decoupled from storage details.

pub mod task_service;
