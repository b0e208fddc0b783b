//! # Policy Record Model
//!
//! The record types a scan passes through, in lifecycle order:
//!
//! 1. `PolicySummary` — what the paginated listing call returns per policy.
//! 2. `PolicyDetail` — a summary enriched with the raw content document from
//!    the per-item describe call. Exists only during enrichment.
//! 3. `NormalizedPolicyRecord` — the final flat record handed to the
//!    downstream resource graph, with content in canonical string form.
//! 4. `PolicyRecordSet` — the output collection, keyed by resource ARN.
//!
//! Nothing here persists beyond a single scan invocation; the whole set is
//! rebuilt fresh on each call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use crate::canonical::CanonicalContent;

/// Opaque provider-assigned policy identifier, used for describe calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub String);

/// The provider-assigned unique resource name for a policy. Keys the output
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceArn(pub String);

impl PolicyId {
    /// Access the inner identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ResourceArn {
    /// Access the inner ARN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ResourceArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A policy as returned by the listing call, validated: every field the
/// normalized record needs is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySummary {
    /// Identifier for the describe call.
    pub id: PolicyId,
    /// Resource identifier; keys the output collection.
    pub arn: ResourceArn,
    /// Human-readable policy name.
    pub name: String,
    /// Provider policy type string (e.g. `SERVICE_CONTROL_POLICY`).
    pub policy_type: String,
    /// Human-readable description. Empty when the provider omits it.
    pub description: String,
    /// Whether the policy is provider-managed rather than customer-created.
    pub aws_managed: bool,
}

/// A summary enriched with the raw content document from the describe call.
///
/// `content` is `None` when the provider response carried no content — some
/// policy types legitimately have none. Absence is an explicit marker, never
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDetail {
    /// The listing summary this detail enriches.
    pub summary: PolicySummary,
    /// The raw policy content document, if present.
    pub content: Option<Value>,
}

/// The final flat record ingested by the downstream resource graph.
///
/// Field names serialize exactly as the graph schema expects. `Content` is
/// the canonical string form of the policy document and is omitted entirely
/// when the policy has no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPolicyRecord {
    /// Human-readable policy name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Provider-assigned policy identifier.
    #[serde(rename = "Id")]
    pub id: PolicyId,
    /// Provider policy type string.
    #[serde(rename = "Type")]
    pub policy_type: String,
    /// Human-readable description.
    #[serde(rename = "Description")]
    pub description: String,
    /// Whether the policy is provider-managed.
    #[serde(rename = "AwsManaged")]
    pub aws_managed: bool,
    /// Canonical content string, absent when the policy carries no document.
    #[serde(rename = "Content", skip_serializing_if = "Option::is_none")]
    pub content: Option<CanonicalContent>,
}

/// The output collection of one category scan, keyed by resource ARN.
///
/// Keys are unique; insertion order is irrelevant. If two records resolve to
/// the same ARN (possible only under provider inconsistency), the
/// later-inserted record wins. That last-write-wins behavior is deliberate
/// and documented, not an error path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolicyRecordSet(BTreeMap<ResourceArn, NormalizedPolicyRecord>);

impl PolicyRecordSet {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a record under its resource ARN, returning the record it
    /// displaced if the key was already present (last write wins).
    pub fn insert(
        &mut self,
        arn: ResourceArn,
        record: NormalizedPolicyRecord,
    ) -> Option<NormalizedPolicyRecord> {
        self.0.insert(arn, record)
    }

    /// Look up a record by resource ARN.
    pub fn get(&self, arn: &ResourceArn) -> Option<&NormalizedPolicyRecord> {
        self.0.get(arn)
    }

    /// Number of records in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over records in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ResourceArn, NormalizedPolicyRecord> {
        self.0.iter()
    }

    /// Iterate over the resource ARNs in key order.
    pub fn keys(&self) -> btree_map::Keys<'_, ResourceArn, NormalizedPolicyRecord> {
        self.0.keys()
    }

    /// Consume the set and return the underlying map.
    pub fn into_inner(self) -> BTreeMap<ResourceArn, NormalizedPolicyRecord> {
        self.0
    }
}

impl IntoIterator for PolicyRecordSet {
    type Item = (ResourceArn, NormalizedPolicyRecord);
    type IntoIter = btree_map::IntoIter<ResourceArn, NormalizedPolicyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PolicyRecordSet {
    type Item = (&'a ResourceArn, &'a NormalizedPolicyRecord);
    type IntoIter = btree_map::Iter<'a, ResourceArn, NormalizedPolicyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
