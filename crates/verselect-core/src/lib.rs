//! Core data types for verselect.
//!
//! This crate defines the values exchanged between the version engine and its
//! collaborators: the [`versioned::Versioned`] capability, repository
//! candidates, module identifiers, status schemes, and engine configuration.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod status;
pub mod versioned;
