//! # Detail Fetcher
//!
//! Enriches one policy summary with the full record from the provider's
//! describe call. The listing API returns no content, so this is inherently
//! one call per policy — no batch describe exists.
//!
//! ## Content Handling
//!
//! The provider wire format encodes the content document as a JSON string
//! inside the describe envelope; that string is decoded here into its
//! structured form so the canonicalizer sees the document, not a quoted
//! blob. A describe response without an envelope or without a content field
//! is NOT an error: some policy types carry no content, and the detail
//! records that absence explicitly.
//!
//! ## Failure
//!
//! Every failure here is per-item ([`ItemError`]): a failed describe call
//! (policy deleted mid-scan, permission denied) or an undecodable content
//! string. Whether a per-item failure skips the policy or aborts the
//! category is the caller's policy decision, made in [`crate::scan`].

use serde_json::Value;

use orgmap_core::{PolicyDetail, PolicySummary};

use crate::client::OrganizationsClient;
use crate::error::ItemError;

/// Fetch the full record for `summary`, one describe call.
pub async fn fetch_detail<C>(client: &C, summary: PolicySummary) -> Result<PolicyDetail, ItemError>
where
    C: OrganizationsClient + ?Sized,
{
    let response = client.describe_policy(summary.id.as_str()).await?;

    let content = match response.policy.and_then(|detail| detail.content) {
        None => None,
        Some(Value::String(raw)) => {
            Some(serde_json::from_str(&raw).map_err(|e| ItemError::Malformed {
                context: format!(
                    "content document for {} is not valid JSON: {e}",
                    summary.id
                ),
            })?)
        }
        Some(document) => Some(document),
    };

    Ok(PolicyDetail { summary, content })
}
