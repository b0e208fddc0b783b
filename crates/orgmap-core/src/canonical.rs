//! # Canonical Content — Deterministic Policy Document Serialization
//!
//! This module defines `CanonicalContent`, the sole construction path for the
//! `Content` field of a normalized policy record.
//!
//! ## Determinism Invariant
//!
//! The `CanonicalContent` newtype has a private inner field. The only way to
//! construct one is through `CanonicalContent::new()`, which serializes the
//! policy document with RFC 8785 (JSON Canonicalization Scheme) semantics:
//! object keys sorted lexicographically at every nesting level, array order
//! preserved, compact separators, deterministic scalar encoding.
//!
//! Downstream deduplication and diffing compare `Content` strings byte for
//! byte, so two structurally equal documents must canonicalize identically no
//! matter what order the provider emitted their keys in, and two documents
//! that differ in any value must canonicalize differently. Requiring
//! `&CanonicalContent` at the record boundary makes the "wrong serialization
//! path" defect class structurally impossible.
//!
//! ## Purity
//!
//! `CanonicalContent::new()` is a pure function of its input: no clock, no
//! global state, no provider dependency. It is unit-testable with plain JSON
//! fixtures.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::CanonicalizationError;

/// The canonical string form of a policy document.
///
/// # Invariants
///
/// - The only constructor is `CanonicalContent::new()`.
/// - Object keys are sorted lexicographically, recursively.
/// - Array element order is preserved as received.
/// - Scalar encoding is stable and lossless (RFC 8785).
///
/// These invariants are enforced by the constructor and cannot be violated by
/// downstream code because the inner `String` is private. The type serializes
/// as a plain JSON string; it deliberately does not implement `Deserialize`,
/// since a deserialized string could bypass canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalContent(String);

impl CanonicalContent {
    /// Canonicalize a policy document.
    ///
    /// This is the ONLY way to construct `CanonicalContent`. Every content
    /// string in the scanner's output flows through here.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the document
    /// cannot be serialized (for example a non-finite float smuggled in
    /// through a hand-built `Value`).
    pub fn new(document: &Value) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(document)?;
        Ok(Self(s))
    }

    /// Access the canonical string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the canonical string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
