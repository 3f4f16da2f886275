//! Token caching and single-flight refresh

use super::support::{self, CountingIdentity, StubTransport, envelope};
use ad_manager::api::{AuthError, CredentialProvider, Error, TransportErrorKind};
use ad_manager::versions::v202202;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

async fn concurrent_tokens(provider: &Arc<CredentialProvider>, callers: usize) -> Vec<Result<String, AuthError>> {
    let tasks = (0..callers).map(|_| {
        let provider = Arc::clone(provider);
        tokio::spawn(async move { provider.access_token().await.map(|t| t.access_token) })
    });

    join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect()
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() {
    let identity = CountingIdentity::with(Duration::from_millis(50), Duration::from_secs(3600));
    let provider = Arc::new(CredentialProvider::new(identity.clone()));

    let tokens = concurrent_tokens(&provider, 32).await;

    assert_eq!(identity.calls(), 1);
    assert!(tokens.iter().all(|t| t.as_deref() == Ok("token-0")));
}

#[tokio::test]
async fn test_expiring_token_refreshed_once() {
    // Every token is inside the 60s margin as soon as it is issued
    let identity = CountingIdentity::with(Duration::from_millis(20), Duration::from_secs(30));
    let provider = Arc::new(CredentialProvider::new(identity.clone()));

    provider.access_token().await.unwrap();
    assert_eq!(identity.calls(), 1);

    let tokens = concurrent_tokens(&provider, 16).await;

    assert_eq!(identity.calls(), 2);
    assert!(tokens.iter().all(|t| t.as_deref() == Ok("token-1")));
}

#[tokio::test]
async fn test_failure_shared_then_retried() {
    let identity = CountingIdentity::with(Duration::from_millis(20), Duration::from_secs(3600));
    identity.fail_next(1);
    let provider = Arc::new(CredentialProvider::new(identity.clone()));

    let results = concurrent_tokens(&provider, 10).await;
    assert_eq!(identity.calls(), 1);
    assert!(results.iter().all(|r| matches!(r, Err(AuthError::Rejected { status: 400, .. }))));

    let token = provider.access_token().await.unwrap();
    assert_eq!(token.access_token, "token-1");
    assert_eq!(identity.calls(), 2);
}

#[tokio::test]
async fn test_services_firing_at_startup_refresh_once() {
    let transport = StubTransport::new();
    for _ in 0..8 {
        transport.reply(200, envelope("v202202", "getCurrentNetwork", "<rval><id>1</id></rval>"));
    }
    let identity = CountingIdentity::with(Duration::from_millis(30), Duration::from_secs(3600));
    let client = Arc::new(support::client(transport.clone(), identity.clone()));

    let calls = (0..8).map(|_| {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            let network = client.service::<v202202::NetworkService>().await?;
            network.get_current_network().await
        })
    });
    let results = join_all(calls).await;

    assert!(results.into_iter().all(|r| r.expect("task panicked").is_ok()));
    assert_eq!(identity.calls(), 1);
    assert_eq!(transport.calls(), 8);
}

#[tokio::test]
async fn test_auth_failure_stops_before_transport() {
    let transport = StubTransport::new();
    let identity = CountingIdentity::new();
    identity.fail_next(1);
    let client = support::client(transport.clone(), identity.clone());

    let err = client
        .service::<v202202::UserService>()
        .await
        .unwrap()
        .get_current_user()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::Rejected { .. })));
    assert!(!err.is_retry_safe());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unauthorized_reply_drops_cached_token() {
    let transport = StubTransport::new();
    transport
        .reply(401, "Unauthorized")
        .reply(200, envelope("v202202", "getCurrentUser", "<rval><id>5</id></rval>"));
    let identity = CountingIdentity::new();
    let client = support::client(transport.clone(), identity.clone());
    let users = client.service::<v202202::UserService>().await.unwrap();

    match users.get_current_user().await.unwrap_err() {
        Error::Transport(t) => assert_eq!(t.kind, TransportErrorKind::Status(401)),
        other => panic!("expected TransportError, got {:?}", other),
    }

    let user = users.get_current_user().await.unwrap();
    assert_eq!(user.id, Some(5));
    assert_eq!(identity.calls(), 2);
    assert_eq!(transport.last_request().header("Authorization"), Some("Bearer token-1"));
}
