//! # orgmap-core — Foundational Types for the Organization Policy Scanner
//!
//! This crate is the bedrock of the orgmap workspace. It defines the types
//! shared between the scanner and any downstream consumer of its output, and
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `PolicyId` and `ResourceArn`
//!    are distinct newtypes with no implicit conversion between them. An
//!    opaque describe-call identifier cannot be confused with the resource
//!    identifier that keys the output collection.
//!
//! 2. **`CanonicalContent` newtype.** ALL policy content strings flow through
//!    `CanonicalContent::new()`. No raw `serde_json::to_string()` for content
//!    anywhere. Two structurally equal documents always produce byte-identical
//!    content, regardless of key order in the source.
//!
//! 3. **Single `PolicyCategory` enum.** One definition of the category set,
//!    exhaustive `match` everywhere. Adding a category is a one-variant,
//!    one-filter-string data addition; every consumer is forced to handle it
//!    at compile time.
//!
//! 4. **Invalid states are unrepresentable.** There is no "category not yet
//!    selected" state: every listing entry point takes a `PolicyCategory` by
//!    value, so the missing-configuration guard the scanner would otherwise
//!    need simply does not exist.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `orgmap-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod category;
pub mod error;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalContent;
pub use category::{PolicyCategory, POLICY_CATEGORY_COUNT};
pub use error::CanonicalizationError;
pub use record::{
    NormalizedPolicyRecord, PolicyDetail, PolicyId, PolicyRecordSet, PolicySummary, ResourceArn,
};
