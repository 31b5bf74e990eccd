//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the whole task collection.
//! - Keep file format details out of the service layer.
//!
//! # Invariants
//! - Saves always rewrite the full collection; there are no partial writes.
//! - Storage enforces no uniqueness; duplicates are rejected by the service.

pub mod task_repo;
