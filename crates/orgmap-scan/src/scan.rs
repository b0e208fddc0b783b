//! # Scan Orchestration
//!
//! Ties the pipeline together for one category: enumerate summaries, enrich
//! each with a describe call under bounded concurrency, canonicalize and
//! normalize, and assemble the keyed record set. Categories are independent —
//! [`scan_categories`] runs them concurrently, each producing its own
//! collection.
//!
//! ## Concurrency Model
//!
//! Page fetches within a category are sequential (each request needs the
//! previous page's token). Detail fetches are independent and run through
//! `buffer_unordered` capped at [`ScanOptions::detail_concurrency`];
//! completion order does not matter because results merge into an ARN-keyed
//! set. No lock is held across an API call.
//!
//! ## Failure Policy
//!
//! Listing failures abort the category and discard prior pages. Per-item
//! failures follow [`DetailFailurePolicy`]: the default `SkipAndRecord`
//! keeps the category alive, logs the skip, and records it in the output,
//! so one flaky policy cannot blank a category; `Abort` escalates the first
//! per-item failure for deployments that prefer failing the scan outright.

use std::collections::BTreeMap;
use std::pin::pin;

use futures_util::future::try_join_all;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{info, warn};

use orgmap_core::{PolicyCategory, PolicyRecordSet};

use crate::client::OrganizationsClient;
use crate::detail::fetch_detail;
use crate::enumerate::{summaries, validate_summary};
use crate::error::{ItemError, ScanError, SkippedPolicy};
use crate::normalize::normalize;

/// Default cap on in-flight describe calls per category.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 8;

/// What to do when a single policy's enrichment fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFailurePolicy {
    /// Skip the policy, log it, and record it in [`CategoryScan::skipped`].
    /// Best-effort inventory: one flaky item never blanks the category.
    SkipAndRecord,
    /// Abort the whole category scan on the first per-item failure.
    Abort,
}

/// Tunables for a category scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Skip-vs-abort decision for per-item failures.
    pub on_detail_failure: DetailFailurePolicy,
    /// Maximum in-flight describe calls; values below 1 are treated as 1.
    pub detail_concurrency: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            on_detail_failure: DetailFailurePolicy::SkipAndRecord,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }
}

/// Account and region the scan runs against. Opaque pass-through: the
/// scanner never interprets these, it only surfaces them in its logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    /// Account identifier, as issued by the provider.
    pub account_id: String,
    /// Region identifier, as issued by the provider.
    pub region: String,
}

impl ScanContext {
    /// Build a context from account and region identifiers.
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
        }
    }
}

/// The complete result of one category scan: the records that normalized
/// cleanly plus the trail of everything that was skipped. `skipped` being
/// empty is the only way the collection is complete.
#[derive(Debug, Default, Serialize)]
pub struct CategoryScan {
    /// Normalized records, keyed by resource ARN.
    pub records: PolicyRecordSet,
    /// Policies skipped under [`DetailFailurePolicy::SkipAndRecord`].
    pub skipped: Vec<SkippedPolicy>,
}

/// Scan one policy category end to end.
pub async fn scan_category<C>(
    client: &C,
    context: &ScanContext,
    category: PolicyCategory,
    options: &ScanOptions,
) -> Result<CategoryScan, ScanError>
where
    C: OrganizationsClient + ?Sized,
{
    let mut valid = Vec::new();
    let mut skipped = Vec::new();

    {
        let mut summaries = pin!(summaries(client, category));
        while let Some(wire) = summaries.try_next().await? {
            let best_id = wire
                .id
                .clone()
                .or_else(|| wire.arn.clone())
                .unwrap_or_else(|| "<unknown>".to_string());
            match validate_summary(wire) {
                Ok(summary) => valid.push(summary),
                Err(error) => {
                    record_or_abort(category, best_id, error, options, &mut skipped)?
                }
            }
        }
    }

    let mut enriched = stream::iter(valid.into_iter().map(|summary| {
        let policy_id = summary.id.clone();
        let arn = summary.arn.clone();
        async move {
            let outcome = match fetch_detail(client, summary).await {
                Ok(detail) => normalize(detail),
                Err(error) => Err(error),
            };
            (policy_id, arn, outcome)
        }
    }))
    .buffer_unordered(options.detail_concurrency.max(1));

    let mut records = PolicyRecordSet::new();
    while let Some((policy_id, arn, outcome)) = enriched.next().await {
        match outcome {
            Ok(record) => {
                if records.insert(arn.clone(), record).is_some() {
                    // Provider inconsistency; last write wins by contract.
                    warn!(category = %category, arn = %arn, "duplicate resource arn, keeping later record");
                }
            }
            Err(error) => {
                record_or_abort(category, policy_id.0, error, options, &mut skipped)?
            }
        }
    }

    info!(
        account_id = %context.account_id,
        region = %context.region,
        category = %category,
        records = records.len(),
        skipped = skipped.len(),
        "category scan complete"
    );
    Ok(CategoryScan { records, skipped })
}

/// Scan several categories concurrently, one result collection per category.
pub async fn scan_categories<C>(
    client: &C,
    context: &ScanContext,
    categories: &[PolicyCategory],
    options: &ScanOptions,
) -> Result<BTreeMap<PolicyCategory, CategoryScan>, ScanError>
where
    C: OrganizationsClient + ?Sized,
{
    let scans = categories.iter().map(|&category| async move {
        let result = scan_category(client, context, category, options).await?;
        Ok::<_, ScanError>((category, result))
    });
    Ok(try_join_all(scans).await?.into_iter().collect())
}

fn record_or_abort(
    category: PolicyCategory,
    policy_id: String,
    error: ItemError,
    options: &ScanOptions,
    skipped: &mut Vec<SkippedPolicy>,
) -> Result<(), ScanError> {
    match options.on_detail_failure {
        DetailFailurePolicy::SkipAndRecord => {
            warn!(
                category = %category,
                policy_id = %policy_id,
                error = %error,
                "skipping policy"
            );
            skipped.push(SkippedPolicy::new(policy_id, &error));
            Ok(())
        }
        DetailFailurePolicy::Abort => Err(ScanError::Detail {
            policy_id,
            source: error,
        }),
    }
}
