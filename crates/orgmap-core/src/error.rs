//! # Error Types — Core Canonicalization Failures
//!
//! Errors produced by the foundational types in this crate. The scanner crate
//! layers its own per-item and per-category error types on top of these.

use thiserror::Error;

/// Error during canonical serialization of a policy document.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("canonical serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
