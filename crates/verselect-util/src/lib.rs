//! Shared utilities for verselect.
//!
//! This crate provides the cross-cutting error type used by every other
//! verselect crate.

pub mod errors;
