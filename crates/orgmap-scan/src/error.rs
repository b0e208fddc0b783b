//! # Scanner Error Types
//!
//! Two error layers with different blast radii:
//!
//! - [`ScanError`] fails a whole category. Listing failures always do —
//!   pagination cannot resume mid-stream, so partial listings are discarded.
//! - [`ItemError`] fails a single policy. Under the default skip policy it
//!   becomes a [`SkippedPolicy`] entry in the scan output instead of
//!   aborting; the category result then carries both the records and the
//!   skip list, so a partial collection is never presented as complete.
//!
//! There is no configuration error variant: the category is a required
//! by-value parameter everywhere, so the "listing invoked without a resolved
//! category" state cannot be expressed.

use serde::Serialize;
use thiserror::Error;

use orgmap_core::CanonicalizationError;

use crate::client::ClientError;

/// A failure that aborts an entire category scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The paginated listing call failed. Prior pages are discarded; a retry
    /// restarts pagination from the first page.
    #[error("policy listing failed: {0}")]
    Listing(#[source] ClientError),

    /// A per-policy failure escalated because the scan was configured with
    /// [`crate::scan::DetailFailurePolicy::Abort`].
    #[error("enrichment failed for policy {policy_id}: {source}")]
    Detail {
        /// The policy whose enrichment failed.
        policy_id: String,
        /// The underlying per-item failure.
        #[source]
        source: ItemError,
    },
}

/// A failure scoped to a single policy.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The describe call for this policy failed.
    #[error("provider call failed: {0}")]
    Client(#[from] ClientError),

    /// The provider returned a response missing a required field or carrying
    /// an undecodable content document.
    #[error("malformed provider response: {context}")]
    Malformed {
        /// What was malformed, including the policy identifier when known.
        context: String,
    },

    /// The content document could not be canonicalized.
    #[error("content canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Record of a policy that was skipped during a category scan.
///
/// Every skip is also logged via `tracing::warn!` at the point of failure;
/// this struct is the machine-readable trail in the scan output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPolicy {
    /// The best available identifier for the skipped policy. `<unknown>` when
    /// the provider response carried no identifier at all.
    pub policy_id: String,
    /// Human-readable reason, from the originating [`ItemError`].
    pub reason: String,
}

impl SkippedPolicy {
    /// Build a skip record from a per-item failure.
    pub fn new(policy_id: impl Into<String>, error: &ItemError) -> Self {
        Self {
            policy_id: policy_id.into(),
            reason: error.to_string(),
        }
    }
}
