//! Core data types for gene definitions and sample observations.
//!
//! Everything here is pure data: definitions and observations are plain
//! records with constructors and accessors, no matching behavior. The
//! matching algorithms live in [`crate::matching`].

pub mod gene;
pub mod sample;
pub mod types;
