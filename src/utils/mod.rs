//! Shared helpers for request extraction and validation.

pub mod validate;
