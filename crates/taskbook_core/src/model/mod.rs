//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical task record and its field-level validation.
//! - Expose the business-duplicate key separately from value equality.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned at creation.
//! - Duplicate detection uses `Task::duplicate_key()`, never `PartialEq`.

pub mod task;
