//! Bulk actions and how their failures are classified

use super::support::{self, APPLICATION_NAME, CountingIdentity, NETWORK_CODE, StubTransport, envelope, fault};
use ad_manager::api::{
    AdManagerClient, Error, PerformAction, RetryConfig, RetryPolicy, Statement, TransportErrorKind,
};
use ad_manager::versions::{v202202, v202205};
use std::sync::Arc;
use std::time::Duration;

fn update_result(version: &str, method: &str, num_changes: u32, failed: &[i64]) -> String {
    let failed: String = failed
        .iter()
        .map(|id| format!("<failedEntityIds>{}</failedEntityIds>", id))
        .collect();
    envelope(
        version,
        method,
        &format!("<rval><numChanges>{}</numChanges>{}</rval>", num_changes, failed),
    )
}

fn fast_client(transport: Arc<StubTransport>) -> AdManagerClient {
    AdManagerClient::builder()
        .network_code(NETWORK_CODE)
        .application_name(APPLICATION_NAME)
        .identity(CountingIdentity::new())
        .transport(transport)
        .call_timeout(Duration::from_millis(50))
        .request_logging(false)
        .build()
        .unwrap()
}

fn retry_policy() -> RetryPolicy {
    RetryPolicy::new(RetryConfig {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        backoff_multiplier: 2.0,
        jitter: false,
    })
}

#[tokio::test]
async fn test_mixed_permissions_report_failed_ids() {
    let transport = StubTransport::new();
    transport.reply(200, update_result("v202202", "performUserAction", 2, &[13, 14]));
    let client = support::client(transport.clone(), CountingIdentity::new());
    let users = client.service::<v202202::UserService>().await.unwrap();

    let statement = Statement::new("WHERE id IN (:ids)").with_value("ids", vec![11i64, 12, 13, 14]);
    let result = users
        .perform_user_action(v202202::UserAction::Deactivate, &statement)
        .await
        .unwrap();

    assert_eq!(result.num_changes, 2);
    assert_eq!(result.failed_entity_ids.into_iter().collect::<Vec<_>>(), vec![13, 14]);

    let body = transport.last_request().body;
    assert!(body.contains(r#"<performUserAction xmlns="https://www.google.com/apis/ads/publisher/v202202"><userAction xsi:type="DeactivateUsers"/><filterStatement>"#));
}

#[tokio::test]
async fn test_all_permitted() {
    let transport = StubTransport::new();
    transport.reply(200, update_result("v202205", "performCustomFieldAction", 3, &[]));
    let client = support::client(transport.clone(), CountingIdentity::new());
    let fields = client.service::<v202205::CustomFieldService>().await.unwrap();

    let result = fields
        .perform_action(v202205::CustomFieldAction::Activate, &Statement::new("WHERE isActive = false"))
        .await
        .unwrap();

    assert_eq!(result.num_changes, 3);
    assert!(result.is_complete());
    assert!(transport.last_request().body.contains(r#"<customFieldAction xsi:type="ActivateCustomFields"/>"#));
}

#[tokio::test]
async fn test_fault_surfaces_as_api_error() {
    let transport = StubTransport::new();
    transport.reply(
        500,
        fault("v202202", "StatementError", "INVALID_FIELD", "filterStatement.query"),
    );
    let client = support::client(transport, CountingIdentity::new());
    let rules = client.service::<v202202::AdRuleService>().await.unwrap();

    let err = rules
        .perform_ad_rule_action(v202202::AdRuleAction::Activate, &Statement::new("WHERE color = 'red'"))
        .await
        .unwrap_err();

    match &err {
        Error::Api(api) => {
            assert_eq!(api.code(), "StatementError.INVALID_FIELD");
            assert_eq!(api.field_path(), Some("filterStatement.query"));
            assert!(api.message.contains("INVALID_FIELD"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
    assert!(!err.is_retry_safe());
}

#[tokio::test]
async fn test_timeout_retry_safety_follows_idempotence() {
    let transport = StubTransport::new();
    transport.hang().hang();
    let client = fast_client(transport.clone());
    let users = client.service::<v202205::UserService>().await.unwrap();
    let statement = Statement::new("WHERE isActive = true");

    let read = users.get_users_by_statement(&statement).await.unwrap_err();
    match &read {
        Error::Transport(t) => {
            assert_eq!(t.kind, TransportErrorKind::Timeout);
            assert!(t.retry_safe);
            assert_eq!(t.method, "getUsersByStatement");
        }
        other => panic!("expected TransportError, got {:?}", other),
    }

    let write = users
        .perform_user_action(v202205::UserAction::Activate, &statement)
        .await
        .unwrap_err();
    match &write {
        Error::Transport(t) => {
            assert_eq!(t.kind, TransportErrorKind::Timeout);
            assert!(!t.retry_safe);
        }
        other => panic!("expected TransportError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_without_fault() {
    let transport = StubTransport::new();
    transport
        .reply(502, "<html><body>Bad Gateway</body></html>")
        .reply(200, "not a soap envelope");
    let client = support::client(transport, CountingIdentity::new());
    let content = client.service::<v202202::ContentService>().await.unwrap();
    let statement = Statement::new("LIMIT 1");

    match content.get_content_by_statement(&statement).await.unwrap_err() {
        Error::Transport(t) => {
            assert_eq!(t.kind, TransportErrorKind::Status(502));
            assert!(t.retry_safe);
        }
        other => panic!("expected TransportError, got {:?}", other),
    }

    match content.get_content_by_statement(&statement).await.unwrap_err() {
        Error::Transport(t) => {
            assert_eq!(t.kind, TransportErrorKind::MalformedResponse);
            assert!(!t.retry_safe);
        }
        other => panic!("expected TransportError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_external_retry_only_repeats_safe_calls() {
    let transport = StubTransport::new();
    transport
        .fail(TransportErrorKind::Connect, "connection reset")
        .reply(200, envelope("v202202", "getCurrentNetwork", "<rval><id>1</id></rval>"));
    let client = support::client(transport.clone(), CountingIdentity::new());
    let network = client.service::<v202202::NetworkService>().await.unwrap();

    let policy = retry_policy();
    let result = policy.execute(|| network.get_current_network()).await.unwrap();
    assert_eq!(result.id, 1);
    assert_eq!(transport.calls(), 2);

    transport.fail(TransportErrorKind::Connect, "connection reset");
    let users = client.service::<v202202::UserService>().await.unwrap();
    let statement = Statement::new("WHERE id = 1");
    let err = policy
        .execute(|| users.perform_user_action(v202202::UserAction::Activate, &statement))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(ref t) if t.kind == TransportErrorKind::Connect));
    assert_eq!(transport.calls(), 3);
}
