//! # Paginated Enumerator
//!
//! Drives the provider's paginated listing call for one policy category and
//! yields the summaries lazily, page by page, until the provider stops
//! returning a continuation token.
//!
//! ## Guarantees
//!
//! Every summary the provider returns for the filter is yielded exactly once,
//! in provider page order (the provider defines the order, nothing here sorts
//! it). The stream is finite, bounded by provider state at call time, and not
//! restartable mid-enumeration: a retry starts over from the first page.
//!
//! ## Failure
//!
//! A transport or authorization failure on any page ends the stream with a
//! [`ScanError::Listing`]; summaries from prior pages must be discarded by
//! the caller. Per-item validation problems are NOT stream errors — the
//! stream yields wire summaries, and [`validate_summary`] turns a missing
//! required field into an [`ItemError`] the caller records per item.

use futures_util::stream::{self, Stream, TryStreamExt};

use orgmap_core::{PolicyCategory, PolicyId, PolicySummary, ResourceArn};

use crate::client::{OrganizationsClient, WirePolicySummary};
use crate::error::{ItemError, ScanError};

enum PageCursor {
    Start,
    Next(String),
    Exhausted,
}

/// Lazily enumerate all policy summaries for `category`.
///
/// Each page is requested only as the stream is polled past the previous one.
pub fn summaries<'a, C>(
    client: &'a C,
    category: PolicyCategory,
) -> impl Stream<Item = Result<WirePolicySummary, ScanError>> + 'a
where
    C: OrganizationsClient + ?Sized,
{
    stream::try_unfold(PageCursor::Start, move |cursor| async move {
        let token = match &cursor {
            PageCursor::Start => None,
            PageCursor::Next(token) => Some(token.as_str()),
            PageCursor::Exhausted => return Ok(None),
        };
        let page = client
            .list_policies(category.filter_value(), token)
            .await
            .map_err(ScanError::Listing)?;
        tracing::debug!(
            category = %category,
            summaries = page.policies.len(),
            more = page.next_token.is_some(),
            "fetched policy listing page"
        );
        let next = match page.next_token {
            Some(token) => PageCursor::Next(token),
            None => PageCursor::Exhausted,
        };
        Ok(Some((page.policies, next)))
    })
    .map_ok(|batch| stream::iter(batch.into_iter().map(Ok::<_, ScanError>)))
    .try_flatten()
}

/// Validate a wire summary into a domain [`PolicySummary`].
///
/// `Id`, `Arn`, `Name`, and `Type` are required; a missing one is a
/// per-item [`ItemError::Malformed`] naming the field and the best available
/// identifier. `Description` defaults to empty and `AwsManaged` to `false`
/// when omitted.
pub fn validate_summary(wire: WirePolicySummary) -> Result<PolicySummary, ItemError> {
    let best_id = wire
        .id
        .clone()
        .or_else(|| wire.arn.clone())
        .unwrap_or_else(|| "<unknown>".to_string());

    let id = wire.id.ok_or_else(|| missing_field(&best_id, "Id"))?;
    let arn = wire.arn.ok_or_else(|| missing_field(&best_id, "Arn"))?;
    let name = wire.name.ok_or_else(|| missing_field(&best_id, "Name"))?;
    let policy_type = wire
        .policy_type
        .ok_or_else(|| missing_field(&best_id, "Type"))?;

    Ok(PolicySummary {
        id: PolicyId(id),
        arn: ResourceArn(arn),
        name,
        policy_type,
        description: wire.description.unwrap_or_default(),
        aws_managed: wire.aws_managed.unwrap_or(false),
    })
}

fn missing_field(policy: &str, field: &str) -> ItemError {
    ItemError::Malformed {
        context: format!("listing summary for {policy} missing {field}"),
    }
}
