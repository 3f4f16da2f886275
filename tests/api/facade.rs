//! Service resolution, handle caching and the request each call puts on the wire

use super::support::{self, CountingIdentity, NETWORK_CODE, StubTransport, envelope};
use ad_manager::api::{ApiService, Error};
use ad_manager::versions::{v202202, v202205};

#[tokio::test]
async fn test_current_network_returned_unmodified() {
    let transport = StubTransport::new();
    transport.reply(
        200,
        envelope(
            "v202202",
            "getCurrentNetwork",
            "<rval><id>1</id><displayName>Test</displayName></rval>",
        ),
    );
    let client = support::client(transport.clone(), CountingIdentity::new());
    assert_eq!(client.network_code(), NETWORK_CODE);

    let handle = client.get_service("v202202", "NetworkService").await.unwrap();
    let service = handle.downcast::<v202202::NetworkService>().unwrap();
    let network = service.get_current_network().await.unwrap();

    assert_eq!(
        network,
        v202202::Network {
            id: 1,
            display_name: Some("Test".to_string()),
            ..Default::default()
        }
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_same_handle_for_same_pair() {
    let client = support::client(StubTransport::new(), CountingIdentity::new());

    for version in ["v202202", "v202205"] {
        for service in ["AdRuleService", "ContentService", "CustomFieldService", "NetworkService", "UserService"] {
            let first = client.get_service(version, service).await.unwrap();
            let second = client.get_service(version, service).await.unwrap();
            assert!(first.ptr_eq(&second), "{}/{} was rebuilt", version, service);
            assert_eq!(first.version(), version);
            assert_eq!(first.name(), service);
        }
    }

    let typed_a = client.service::<v202205::UserService>().await.unwrap();
    let typed_b = client.service::<v202205::UserService>().await.unwrap();
    assert!(std::sync::Arc::ptr_eq(&typed_a, &typed_b));
}

#[tokio::test]
async fn test_unregistered_version() {
    let client = support::client(StubTransport::new(), CountingIdentity::new());

    match client.get_service("v202301", "NetworkService").await {
        Err(Error::UnsupportedVersion(tag)) => assert_eq!(tag, "v202301"),
        other => panic!("expected UnsupportedVersion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_service() {
    let client = support::client(StubTransport::new(), CountingIdentity::new());

    let err = client.get_service("v202205", "LineItemService").await.unwrap_err();
    assert!(matches!(err, Error::UnknownService { .. }));
    assert!(err.to_string().contains("LineItemService"));
}

#[tokio::test]
async fn test_versions_do_not_cross() {
    let client = support::client(StubTransport::new(), CountingIdentity::new());

    let handle = client.get_service("v202205", "NetworkService").await.unwrap();
    match handle.downcast::<v202202::NetworkService>() {
        Err(Error::ServiceMismatch { version, expected, .. }) => {
            assert_eq!(version, "v202205");
            assert!(expected.contains("v202202"));
        }
        other => panic!("expected ServiceMismatch, got {:?}", other),
    }

    let service = handle.downcast::<v202205::NetworkService>().unwrap();
    assert_eq!(service.client().version(), v202205::NetworkService::VERSION);
    assert!(service.client().endpoint().ends_with("/apis/ads/publisher/v202205/NetworkService"));
}

#[tokio::test]
async fn test_resolution_is_lazy() {
    let transport = StubTransport::new();
    let identity = CountingIdentity::new();
    let client = support::client(transport.clone(), identity.clone());

    client.service::<v202202::UserService>().await.unwrap();
    client.service::<v202202::NetworkService>().await.unwrap();

    assert_eq!(transport.calls(), 0);
    assert_eq!(identity.calls(), 0);
}

#[tokio::test]
async fn test_request_shape() {
    let transport = StubTransport::new();
    transport.reply(
        200,
        envelope("v202202", "getCurrentUser", "<rval><id>9</id><name>Ada</name></rval>"),
    );
    let client = support::client(transport.clone(), CountingIdentity::new());

    let user = client
        .service::<v202202::UserService>()
        .await
        .unwrap()
        .get_current_user()
        .await
        .unwrap();
    assert_eq!(user.id, Some(9));

    let request = transport.last_request();
    assert_eq!(
        request.endpoint,
        "https://ads.google.com/apis/ads/publisher/v202202/UserService"
    );
    assert_eq!(request.header("Authorization"), Some("Bearer token-0"));
    assert_eq!(request.header("SOAPAction"), Some("\"\""));
    assert_eq!(request.header("Content-Type"), Some("text/xml; charset=utf-8"));
    assert!(request.header("X-Correlation-ID").is_some());

    assert!(request.body.contains("<networkCode>117238412</networkCode>"));
    assert!(request.body.contains("<applicationName>integration-tests</applicationName>"));
    assert!(request.body.contains(
        r#"<getCurrentUser xmlns="https://www.google.com/apis/ads/publisher/v202202"></getCurrentUser>"#
    ));
}

#[tokio::test]
async fn test_token_shared_across_services() {
    let transport = StubTransport::new();
    transport
        .reply(200, envelope("v202202", "getCurrentNetwork", "<rval><id>1</id></rval>"))
        .reply(200, envelope("v202205", "getCurrentUser", "<rval><id>2</id></rval>"));
    let identity = CountingIdentity::new();
    let client = support::client(transport.clone(), identity.clone());

    client
        .service::<v202202::NetworkService>()
        .await
        .unwrap()
        .get_current_network()
        .await
        .unwrap();
    client
        .service::<v202205::UserService>()
        .await
        .unwrap()
        .get_current_user()
        .await
        .unwrap();

    assert_eq!(identity.calls(), 1);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_all_networks_list() {
    let transport = StubTransport::new();
    transport.reply(
        200,
        envelope(
            "v202205",
            "getAllNetworks",
            "<rval><id>1</id><networkCode>111</networkCode></rval><rval><id>2</id><networkCode>222</networkCode></rval>",
        ),
    );
    let client = support::client(transport, CountingIdentity::new());

    let networks = client
        .service::<v202205::NetworkService>()
        .await
        .unwrap()
        .get_all_networks()
        .await
        .unwrap();

    let codes: Vec<&str> = networks.iter().filter_map(|n| n.network_code.as_deref()).collect();
    assert_eq!(codes, vec!["111", "222"]);
}
