//! Statement validation happens before any token fetch or network call

use super::support::{self, CountingIdentity, StubTransport, envelope};
use ad_manager::api::{ByStatement, Error, PerformAction, Statement, StatementBuilder, ValidationError};
use ad_manager::versions::{v202202, v202205};

#[tokio::test]
async fn test_missing_value_rejected_without_network() {
    let transport = StubTransport::new();
    let identity = CountingIdentity::new();
    let client = support::client(transport.clone(), identity.clone());
    let users = client.service::<v202202::UserService>().await.unwrap();

    let statement = Statement::new("WHERE status = :status AND roleId = :roleId")
        .with_value("status", "ACTIVE");

    match users.get_users_by_statement(&statement).await {
        Err(Error::Validation(ValidationError::MissingValue(name))) => assert_eq!(name, "roleId"),
        other => panic!("expected MissingValue, got {:?}", other.map(|p| p.len())),
    }

    assert_eq!(transport.calls(), 0);
    assert_eq!(identity.calls(), 0);
}

#[tokio::test]
async fn test_unused_value_rejected_without_network() {
    let transport = StubTransport::new();
    let identity = CountingIdentity::new();
    let client = support::client(transport.clone(), identity.clone());

    let statement = Statement::new("WHERE id = :id")
        .with_value("id", 4i64)
        .with_value("name", "leftover");

    let content = client.service::<v202205::ContentService>().await.unwrap();
    let err = content.get_by_statement(&statement).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnusedValue(ref name)) if name == "name"
    ));

    let rules = client.service::<v202205::AdRuleService>().await.unwrap();
    let err = rules
        .perform_action(v202205::AdRuleAction::Delete, &Statement::new("WHERE id = :id"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(!err.is_retry_safe());

    assert_eq!(transport.calls(), 0);
    assert_eq!(identity.calls(), 0);
}

#[tokio::test]
async fn test_bound_values_serialized() {
    let transport = StubTransport::new();
    transport.reply(
        200,
        envelope(
            "v202202",
            "getCustomFieldsByStatement",
            "<rval><totalResultSetSize>0</totalResultSetSize><startIndex>0</startIndex></rval>",
        ),
    );
    let client = support::client(transport.clone(), CountingIdentity::new());

    let statement = StatementBuilder::new()
        .where_clause("WHERE entityType = :type AND id IN (:ids) AND name = 'a:b'")
        .with_bind_variable("type", "LINE_ITEM")
        .with_bind_variable("ids", vec![3i64, 4])
        .limit(10)
        .to_statement();

    let page = client
        .service::<v202202::CustomFieldService>()
        .await
        .unwrap()
        .get_custom_fields_by_statement(&statement)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert!(page.is_last_page());

    let body = transport.last_request().body;
    assert!(body.contains("<filterStatement><query>WHERE entityType = :type AND id IN (:ids) AND name = &apos;a:b&apos; LIMIT 10</query>")
        || body.contains("<filterStatement><query>WHERE entityType = :type AND id IN (:ids) AND name = 'a:b' LIMIT 10</query>"));
    assert!(body.contains(r#"<key>type</key><value xsi:type="TextValue"><value>LINE_ITEM</value></value>"#));
    assert!(body.contains(r#"<key>ids</key><value xsi:type="SetValue">"#));
    assert!(body.contains(r#"<values xsi:type="NumberValue"><value>3</value></values>"#));
}

#[test]
fn test_with_filter_leaves_original_untouched() {
    let base = Statement::new("WHERE id = :id").with_value("id", 1i64);
    let derived = base.with_filter("WHERE name = :name", [("name", "Ada")]);

    assert_eq!(base.query(), "WHERE id = :id");
    assert!(base.validate().is_ok());
    assert_eq!(derived.query(), "WHERE name = :name");
    assert!(derived.values().contains_key("name"));
}
