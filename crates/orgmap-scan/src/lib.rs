//! # orgmap-scan — Organization Policy Scanner
//!
//! Enumerates organization-level policies from the provider's management API
//! and normalizes each into a flat record for the downstream resource graph.
//!
//! ## Pipeline
//!
//! For one category: the enumerator drives the paginated listing call until
//! the provider stops returning a continuation token; each summary is
//! enriched with a per-policy describe call (bounded concurrency); the raw
//! content document is canonicalized; the normalizer projects the fixed field
//! set into a record collection keyed by resource ARN. Categories are
//! independent and scan concurrently.
//!
//! ## Provider Seam
//!
//! The scanner talks to the provider exclusively through the
//! [`client::OrganizationsClient`] trait — two operations, listing and
//! describe. Transport, auth, retry, and timeouts all live behind that seam;
//! tests drive the pipeline with data-driven stub implementations.
//!
//! ## Failure Semantics
//!
//! A listing failure aborts the whole category. A describe failure or a
//! malformed per-item response is isolated: under the default
//! [`scan::DetailFailurePolicy::SkipAndRecord`] the item is skipped, logged
//! via `tracing::warn!`, and recorded in the scan output so a partial
//! collection is never presented as complete.

pub mod client;
pub mod detail;
pub mod enumerate;
pub mod error;
pub mod normalize;
pub mod scan;

// Re-export primary types for ergonomic imports.
pub use client::{
    ClientError, DescribePolicyResponse, OrganizationsClient, PolicySummaryPage,
    WirePolicyDetail, WirePolicySummary,
};
pub use detail::fetch_detail;
pub use enumerate::{summaries, validate_summary};
pub use error::{ItemError, ScanError, SkippedPolicy};
pub use normalize::normalize;
pub use scan::{
    scan_categories, scan_category, CategoryScan, DetailFailurePolicy, ScanContext, ScanOptions,
};
