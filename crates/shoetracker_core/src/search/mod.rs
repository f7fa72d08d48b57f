//! Search and filter entry points over the try-on collection.
//!
//! # Responsibility
//! - Select the subset of records matching free text and filter criteria.
//! - Keep list-shaping logic inside core and independent of storage.

pub mod predicate;
