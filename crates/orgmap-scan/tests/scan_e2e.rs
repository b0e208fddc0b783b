//! End-to-end scenarios for the policy scanner, driven by a data-driven stub
//! client. No live provider: listing pages and describe responses are plain
//! JSON fixtures, and the stub hands them out exactly the way the provider
//! API would — pages chained by continuation token, one describe response per
//! policy id.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use serde_json::json;

use orgmap_core::{PolicyCategory, ResourceArn};
use orgmap_scan::{
    scan_categories, scan_category, ClientError, DescribePolicyResponse, DetailFailurePolicy,
    OrganizationsClient, PolicySummaryPage, ScanContext, ScanError, ScanOptions,
};

/// Stub provider: listing pages per filter, describe bodies per policy id,
/// plus a set of ids whose describe call fails with access denied.
#[derive(Default)]
struct StubProvider {
    pages: HashMap<&'static str, Vec<serde_json::Value>>,
    describes: HashMap<String, serde_json::Value>,
    deny_describe: HashSet<String>,
}

impl StubProvider {
    fn with_pages(mut self, filter: &'static str, pages: Vec<serde_json::Value>) -> Self {
        self.pages.insert(filter, pages);
        self
    }

    fn with_describe(mut self, policy_id: &str, body: serde_json::Value) -> Self {
        self.describes.insert(policy_id.to_string(), body);
        self
    }

    fn deny(mut self, policy_id: &str) -> Self {
        self.deny_describe.insert(policy_id.to_string());
        self
    }
}

#[async_trait]
impl OrganizationsClient for StubProvider {
    async fn list_policies(
        &self,
        filter: &str,
        next_token: Option<&str>,
    ) -> Result<PolicySummaryPage, ClientError> {
        let pages = self.pages.get(filter).cloned().unwrap_or_default();
        let index: usize = match next_token {
            None => 0,
            Some(token) => token.parse().expect("stub token is a page index"),
        };
        let mut page: PolicySummaryPage = match pages.get(index) {
            Some(body) => serde_json::from_value(body.clone()).expect("stub page fixture"),
            None => PolicySummaryPage::default(),
        };
        page.next_token = if index + 1 < pages.len() {
            Some((index + 1).to_string())
        } else {
            None
        };
        Ok(page)
    }

    async fn describe_policy(
        &self,
        policy_id: &str,
    ) -> Result<DescribePolicyResponse, ClientError> {
        if self.deny_describe.contains(policy_id) {
            return Err(ClientError::AccessDenied {
                operation: "describe_policy".to_string(),
                reason: format!("not authorized to describe {policy_id}"),
            });
        }
        match self.describes.get(policy_id) {
            Some(body) => Ok(serde_json::from_value(body.clone()).expect("stub describe fixture")),
            None => Err(ClientError::NotFound {
                policy_id: policy_id.to_string(),
            }),
        }
    }
}

fn summary_json(id: &str, policy_type: &str) -> serde_json::Value {
    json!({
        "Id": id,
        "Arn": format!("arn:aws:organizations::policy/{id}"),
        "Name": format!("policy-{id}"),
        "Type": policy_type,
        "Description": format!("description of {id}"),
        "AwsManaged": false
    })
}

fn describe_json(id: &str, policy_type: &str, content: &serde_json::Value) -> serde_json::Value {
    json!({
        "Policy": {
            "PolicySummary": summary_json(id, policy_type),
            "Content": content.to_string()
        }
    })
}

fn ctx() -> ScanContext {
    ScanContext::new("123456789012", "us-east-1")
}

#[tokio::test]
async fn pagination_yields_every_policy_exactly_once() {
    // Pages of sizes [2, 1, 3]: six policies total, no duplicates, none lost.
    let ids = ["p-1", "p-2", "p-3", "p-4", "p-5", "p-6"];
    let mut provider = StubProvider::default().with_pages(
        "SERVICE_CONTROL_POLICY",
        vec![
            json!({"Policies": [summary_json("p-1", "SERVICE_CONTROL_POLICY"), summary_json("p-2", "SERVICE_CONTROL_POLICY")]}),
            json!({"Policies": [summary_json("p-3", "SERVICE_CONTROL_POLICY")]}),
            json!({"Policies": [summary_json("p-4", "SERVICE_CONTROL_POLICY"), summary_json("p-5", "SERVICE_CONTROL_POLICY"), summary_json("p-6", "SERVICE_CONTROL_POLICY")]}),
        ],
    );
    for id in ids {
        provider = provider.with_describe(
            id,
            describe_json(id, "SERVICE_CONTROL_POLICY", &json!({"Version": "2012-10-17"})),
        );
    }

    let scan = scan_category(
        &provider,
        &ctx(),
        PolicyCategory::ServiceControl,
        &ScanOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(scan.records.len(), ids.len());
    assert!(scan.skipped.is_empty());
    let keys: BTreeSet<String> = scan.records.keys().map(|arn| arn.to_string()).collect();
    let expected: BTreeSet<String> = ids
        .iter()
        .map(|id| format!("arn:aws:organizations::policy/{id}"))
        .collect();
    assert_eq!(keys, expected);
}

#[tokio::test]
async fn content_is_key_order_independent_across_runs() {
    // Scenario: two pages of one policy each; the second policy's document
    // arrives with different key order in two separate runs. The canonical
    // Content strings must match byte for byte.
    fn provider(content_for_p2: serde_json::Value) -> StubProvider {
        StubProvider::default()
            .with_pages(
                "SERVICE_CONTROL_POLICY",
                vec![
                    json!({"Policies": [summary_json("p-1", "SERVICE_CONTROL_POLICY")]}),
                    json!({"Policies": [summary_json("p-2", "SERVICE_CONTROL_POLICY")]}),
                ],
            )
            .with_describe(
                "p-1",
                describe_json("p-1", "SERVICE_CONTROL_POLICY", &json!({"Version": "2012-10-17"})),
            )
            .with_describe(
                "p-2",
                describe_json("p-2", "SERVICE_CONTROL_POLICY", &content_for_p2),
            )
    }

    // Same document, keys in different order on the wire.
    let run_a = provider(
        serde_json::from_str(
            r#"{"Version":"2012-10-17","Statement":{"Effect":"Deny","Action":"*","Sid":"deny-all"}}"#,
        )
        .unwrap(),
    );
    let run_b = provider(
        serde_json::from_str(
            r#"{"Statement":{"Sid":"deny-all","Action":"*","Effect":"Deny"},"Version":"2012-10-17"}"#,
        )
        .unwrap(),
    );

    let options = ScanOptions::default();
    let scan_a = scan_category(&run_a, &ctx(), PolicyCategory::ServiceControl, &options)
        .await
        .unwrap();
    let scan_b = scan_category(&run_b, &ctx(), PolicyCategory::ServiceControl, &options)
        .await
        .unwrap();

    let arn = ResourceArn("arn:aws:organizations::policy/p-2".to_string());
    let content_a = scan_a.records.get(&arn).unwrap().content.clone().unwrap();
    let content_b = scan_b.records.get(&arn).unwrap().content.clone().unwrap();
    assert_eq!(content_a, content_b);
}

#[tokio::test]
async fn absent_content_is_marked_absent_with_fields_populated() {
    // Scenario: a tag policy whose describe response carries no content.
    let provider = StubProvider::default()
        .with_pages(
            "TAG_POLICY",
            vec![json!({"Policies": [summary_json("p-tag", "TAG_POLICY")]})],
        )
        .with_describe(
            "p-tag",
            json!({"Policy": {"PolicySummary": summary_json("p-tag", "TAG_POLICY")}}),
        );

    let scan = scan_category(&provider, &ctx(), PolicyCategory::Tag, &ScanOptions::default())
        .await
        .unwrap();

    assert!(scan.skipped.is_empty());
    let arn = ResourceArn("arn:aws:organizations::policy/p-tag".to_string());
    let record = scan.records.get(&arn).unwrap();
    assert!(record.content.is_none());
    assert_eq!(record.name, "policy-p-tag");
    assert_eq!(record.policy_type, "TAG_POLICY");
    assert_eq!(record.description, "description of p-tag");
}

#[tokio::test]
async fn failed_describe_is_skipped_and_recorded() {
    let provider = StubProvider::default()
        .with_pages(
            "BACKUP_POLICY",
            vec![json!({"Policies": [
                summary_json("p-good", "BACKUP_POLICY"),
                summary_json("p-flaky", "BACKUP_POLICY")
            ]})],
        )
        .with_describe(
            "p-good",
            describe_json("p-good", "BACKUP_POLICY", &json!({"plans": {}})),
        )
        .deny("p-flaky");

    let scan = scan_category(
        &provider,
        &ctx(),
        PolicyCategory::Backup,
        &ScanOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(scan.records.len(), 1);
    assert_eq!(scan.skipped.len(), 1);
    assert_eq!(scan.skipped[0].policy_id, "p-flaky");
    assert!(scan.skipped[0].reason.contains("access denied"));
}

#[tokio::test]
async fn failed_describe_aborts_when_configured() {
    let provider = StubProvider::default()
        .with_pages(
            "BACKUP_POLICY",
            vec![json!({"Policies": [summary_json("p-flaky", "BACKUP_POLICY")]})],
        )
        .deny("p-flaky");

    let options = ScanOptions {
        on_detail_failure: DetailFailurePolicy::Abort,
        ..ScanOptions::default()
    };
    let err = scan_category(&provider, &ctx(), PolicyCategory::Backup, &options)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Detail { ref policy_id, .. } if policy_id == "p-flaky"));
}

#[tokio::test]
async fn malformed_summary_is_skipped_with_trace() {
    // A summary with no Arn cannot be keyed; it is skipped, not dropped
    // silently and not fatal.
    let provider = StubProvider::default()
        .with_pages(
            "TAG_POLICY",
            vec![json!({"Policies": [
                {"Id": "p-no-arn", "Name": "nameless", "Type": "TAG_POLICY"},
                summary_json("p-ok", "TAG_POLICY")
            ]})],
        )
        .with_describe(
            "p-ok",
            describe_json("p-ok", "TAG_POLICY", &json!({"tags": {}})),
        );

    let scan = scan_category(&provider, &ctx(), PolicyCategory::Tag, &ScanOptions::default())
        .await
        .unwrap();

    assert_eq!(scan.records.len(), 1);
    assert_eq!(scan.skipped.len(), 1);
    assert_eq!(scan.skipped[0].policy_id, "p-no-arn");
    assert!(scan.skipped[0].reason.contains("missing Arn"));
}

#[tokio::test]
async fn listing_failure_aborts_category() {
    struct BrokenListing;

    #[async_trait]
    impl OrganizationsClient for BrokenListing {
        async fn list_policies(
            &self,
            _filter: &str,
            _next_token: Option<&str>,
        ) -> Result<PolicySummaryPage, ClientError> {
            Err(ClientError::Transport {
                operation: "list_policies".to_string(),
                reason: "connection reset".to_string(),
            })
        }

        async fn describe_policy(
            &self,
            _policy_id: &str,
        ) -> Result<DescribePolicyResponse, ClientError> {
            unreachable!("listing never succeeds")
        }
    }

    let err = scan_category(
        &BrokenListing,
        &ctx(),
        PolicyCategory::ServiceControl,
        &ScanOptions::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ScanError::Listing(_)));
}

#[tokio::test]
async fn concurrent_categories_produce_disjoint_collections() {
    // Scenario: service control and tag policies scanned together. Each
    // category gets its own collection with its own keys; nothing bleeds
    // across.
    let provider = StubProvider::default()
        .with_pages(
            "SERVICE_CONTROL_POLICY",
            vec![json!({"Policies": [
                summary_json("p-scp-1", "SERVICE_CONTROL_POLICY"),
                summary_json("p-scp-2", "SERVICE_CONTROL_POLICY")
            ]})],
        )
        .with_pages(
            "TAG_POLICY",
            vec![json!({"Policies": [summary_json("p-tag-1", "TAG_POLICY")]})],
        )
        .with_describe(
            "p-scp-1",
            describe_json("p-scp-1", "SERVICE_CONTROL_POLICY", &json!({"Statement": []})),
        )
        .with_describe(
            "p-scp-2",
            describe_json("p-scp-2", "SERVICE_CONTROL_POLICY", &json!({"Statement": []})),
        )
        .with_describe(
            "p-tag-1",
            describe_json("p-tag-1", "TAG_POLICY", &json!({"tags": {}})),
        );

    let results = scan_categories(
        &provider,
        &ctx(),
        &[PolicyCategory::ServiceControl, PolicyCategory::Tag],
        &ScanOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 2);
    let scp = &results[&PolicyCategory::ServiceControl];
    let tag = &results[&PolicyCategory::Tag];
    assert_eq!(scp.records.len(), 2);
    assert_eq!(tag.records.len(), 1);

    let scp_keys: HashSet<String> = scp.records.keys().map(|a| a.to_string()).collect();
    let tag_keys: HashSet<String> = tag.records.keys().map(|a| a.to_string()).collect();
    assert!(scp_keys.is_disjoint(&tag_keys));
    assert!(tag.records.get(&ResourceArn("arn:aws:organizations::policy/p-tag-1".to_string())).is_some());
}

#[tokio::test]
async fn duplicate_arn_is_last_write_wins() {
    // Provider inconsistency: two listing entries resolve to the same ARN.
    // The set keeps exactly one record rather than erroring.
    let mut dup = summary_json("p-dup-2", "TAG_POLICY");
    dup["Arn"] = json!("arn:aws:organizations::policy/p-dup-1");
    let provider = StubProvider::default()
        .with_pages(
            "TAG_POLICY",
            vec![json!({"Policies": [summary_json("p-dup-1", "TAG_POLICY"), dup]})],
        )
        .with_describe(
            "p-dup-1",
            describe_json("p-dup-1", "TAG_POLICY", &json!({"tags": {}})),
        )
        .with_describe(
            "p-dup-2",
            describe_json("p-dup-2", "TAG_POLICY", &json!({"tags": {}})),
        );

    let scan = scan_category(&provider, &ctx(), PolicyCategory::Tag, &ScanOptions::default())
        .await
        .unwrap();

    assert_eq!(scan.records.len(), 1);
    assert!(scan.skipped.is_empty());
}
