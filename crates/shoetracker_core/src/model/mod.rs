//! Domain model for logged shoe try-ons.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every record is identified by a stable `TryOnId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod try_on;
