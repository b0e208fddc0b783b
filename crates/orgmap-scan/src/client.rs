//! # Provider API Seam — Generic Trait Interface
//!
//! Defines the [`OrganizationsClient`] trait that abstracts over the
//! provider's management API. The scanner needs exactly two operation shapes:
//! a paginated "list policies by filter" call and a per-policy "describe"
//! call. Everything else about the provider — transport, credentials,
//! retry/backoff, timeouts — is the implementation's concern.
//!
//! ## Wire Types
//!
//! The wire structs mirror the provider's response shapes field for field,
//! with every field optional. Validation into the domain types happens in
//! [`crate::enumerate::validate_summary`], where a missing required field
//! becomes a recorded per-item failure instead of a deserialization panic.
//!
//! Implementations must be `Send + Sync` so they can be shared across async
//! tasks behind an `Arc`. The trait is object-safe to support runtime client
//! selection (stub vs. live).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Errors from provider API calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Network-level failure: the call never completed.
    #[error("transport failure during {operation}: {reason}")]
    Transport {
        /// The operation that was attempted (e.g. `list_policies`).
        operation: String,
        /// Human-readable description of the failure.
        reason: String,
    },

    /// The provider rejected the caller's credentials or permissions.
    #[error("access denied during {operation}: {reason}")]
    AccessDenied {
        /// The operation that was attempted.
        operation: String,
        /// Human-readable description of the rejection.
        reason: String,
    },

    /// The requested policy does not exist (e.g. deleted concurrently with
    /// the scan).
    #[error("policy not found: {policy_id}")]
    NotFound {
        /// The identifier that failed to resolve.
        policy_id: String,
    },
}

/// One policy entry as returned by the listing call. All fields optional at
/// the wire level; see [`crate::enumerate::validate_summary`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WirePolicySummary {
    /// Opaque policy identifier.
    pub id: Option<String>,
    /// Resource ARN.
    pub arn: Option<String>,
    /// Policy name.
    pub name: Option<String>,
    /// Policy type string (matches the listing filter).
    #[serde(rename = "Type")]
    pub policy_type: Option<String>,
    /// Policy description.
    pub description: Option<String>,
    /// Whether the policy is provider-managed.
    pub aws_managed: Option<bool>,
}

/// One page of the paginated listing response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PolicySummaryPage {
    /// The summaries on this page, in provider order.
    pub policies: Vec<WirePolicySummary>,
    /// Continuation token for the next page; `None` when exhausted.
    pub next_token: Option<String>,
}

/// The policy envelope inside a describe response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WirePolicyDetail {
    /// The summary fields, repeated by the describe call.
    pub policy_summary: Option<WirePolicySummary>,
    /// The policy content document. The provider encodes it as a JSON string;
    /// a structured value is also accepted.
    pub content: Option<Value>,
}

/// Response of the per-policy describe call. The envelope is absent for
/// policy types that carry no describable body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribePolicyResponse {
    /// The policy envelope, when present.
    pub policy: Option<WirePolicyDetail>,
}

/// The two provider operations the scanner requires.
#[async_trait]
pub trait OrganizationsClient: Send + Sync {
    /// List policies matching `filter`, returning one page and an optional
    /// continuation token. `next_token` is `None` for the first page and the
    /// token from the previous page thereafter.
    async fn list_policies(
        &self,
        filter: &str,
        next_token: Option<&str>,
    ) -> Result<PolicySummaryPage, ClientError>;

    /// Retrieve the full record for one policy, including its content
    /// document when the policy type has one.
    async fn describe_policy(
        &self,
        policy_id: &str,
    ) -> Result<DescribePolicyResponse, ClientError>;
}
