//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Derive read-only projections consumed by presentation layers.
//! - Keep UI layers decoupled from storage details.

pub mod detail;
pub mod try_on_service;
