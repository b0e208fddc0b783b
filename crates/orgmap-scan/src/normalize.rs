//! # Normalizer / Schema Binder
//!
//! Projects an enriched [`PolicyDetail`] onto the fixed output schema the
//! downstream resource graph ingests: `{Name, Id, Type, Description,
//! AwsManaged, Content}`. The scalar fields pass through verbatim; `Content`
//! is the canonical string form of the raw document, or stays absent when
//! the policy carries none.

use orgmap_core::{CanonicalContent, NormalizedPolicyRecord, PolicyDetail};

use crate::error::ItemError;

/// Bind one policy detail to the output schema.
pub fn normalize(detail: PolicyDetail) -> Result<NormalizedPolicyRecord, ItemError> {
    let content = match detail.content {
        Some(document) => Some(CanonicalContent::new(&document)?),
        None => None,
    };
    let summary = detail.summary;
    Ok(NormalizedPolicyRecord {
        name: summary.name,
        id: summary.id,
        policy_type: summary.policy_type,
        description: summary.description,
        aws_managed: summary.aws_managed,
        content,
    })
}
