//! Token acquisition and refresh
//!
//! `CredentialProvider` hands out bearer tokens to every service handle of a
//! client. Refreshes are single-flight: however many callers find the cached
//! token stale, one request goes to the identity provider and its outcome is
//! shared with all of them.

use super::constants::{
    ASSERTION_LIFETIME_SECS, DEFAULT_REFRESH_MARGIN_SECS, DEFAULT_TOKEN_LIFETIME_SECS,
    JWT_BEARER_GRANT, MAX_TOKEN_LIFETIME_SECS,
};
use super::error::AuthError;
use super::models::Token;
use crate::auth::Credential;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Backing token exchange
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn fetch_token(&self) -> Result<Token, AuthError>;
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Service-account JWT bearer flow against the key's token endpoint
pub struct ServiceAccountIdentity {
    credential: Credential,
    http_client: reqwest::Client,
}

impl ServiceAccountIdentity {
    pub fn new(credential: Credential) -> Self {
        Self::with_http_client(credential, reqwest::Client::new())
    }

    pub fn with_http_client(credential: Credential, http_client: reqwest::Client) -> Self {
        Self {
            credential,
            http_client,
        }
    }

    fn sign_assertion(&self, client_email: &str, token_uri: &str, private_key: &str, key_id: Option<&str>) -> Result<String, AuthError> {
        use jsonwebtoken::{Algorithm, EncodingKey, Header};

        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: client_email,
            scope: self.credential.scopes().join(" "),
            aud: token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = key_id.map(str::to_string);

        let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
            .map_err(|e| AuthError::MalformedKey(e.to_string()))?;

        jsonwebtoken::encode(&header, &claims, &key).map_err(|e| AuthError::Signing(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for ServiceAccountIdentity {
    async fn fetch_token(&self) -> Result<Token, AuthError> {
        let key = self.credential.load_key()?;
        let assertion = self.sign_assertion(
            &key.client_email,
            &key.token_uri,
            &key.private_key,
            key.private_key_id.as_deref(),
        )?;

        log::info!("Requesting access token for {}", key.client_email);

        let response = self
            .http_client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        log::debug!("Token request status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let access_token = token_data
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| AuthError::Rejected {
                status: status.as_u16(),
                body: "no access_token in response".to_string(),
            })?;

        let expires_in = token_data
            .get("expires_in")
            .and_then(|e| e.as_u64())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        if expires_in > MAX_TOKEN_LIFETIME_SECS {
            log::warn!(
                "Token lifetime of {}s exceeds {}s; capping",
                expires_in, MAX_TOKEN_LIFETIME_SECS
            );
        }

        Ok(Token::new(access_token, Duration::from_secs(expires_in)))
    }
}

type RefreshFuture = Shared<BoxFuture<'static, Result<Token, AuthError>>>;

#[derive(Default)]
struct TokenState {
    token: Option<Token>,
    in_flight: Option<(u64, RefreshFuture)>,
    generation: u64,
}

/// Cached, self-refreshing bearer token shared by a client's services
pub struct CredentialProvider {
    identity: Arc<dyn IdentityProvider>,
    refresh_margin: Duration,
    state: Mutex<TokenState>,
}

impl CredentialProvider {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self::with_refresh_margin(identity, Duration::from_secs(DEFAULT_REFRESH_MARGIN_SECS))
    }

    pub fn with_refresh_margin(identity: Arc<dyn IdentityProvider>, refresh_margin: Duration) -> Self {
        Self {
            identity,
            refresh_margin,
            state: Mutex::new(TokenState::default()),
        }
    }

    /// Service-account provider for a credential
    pub fn for_credential(credential: Credential) -> Self {
        Self::new(Arc::new(ServiceAccountIdentity::new(credential)))
    }

    pub fn refresh_margin(&self) -> Duration {
        self.refresh_margin
    }

    /// Current token, refreshed first if it expires within the margin
    pub async fn access_token(&self) -> Result<Token, AuthError> {
        let (generation, flight) = {
            let mut state = self.state.lock().await;

            // A finished flight left behind by a cancelled waiter is settled
            // here so its result is never replayed.
            let settled = state
                .in_flight
                .as_ref()
                .and_then(|(_, flight)| flight.peek().cloned());
            if let Some(result) = settled {
                state.in_flight = None;
                if let Ok(token) = result {
                    state.token = Some(token);
                }
            }

            if let Some(token) = state.token.as_ref() {
                if !token.expires_within(self.refresh_margin) {
                    return Ok(token.clone());
                }
                log::debug!("Cached token is within refresh margin");
            }

            match state.in_flight.clone() {
                Some(in_flight) => in_flight,
                None => {
                    state.generation += 1;
                    let identity = Arc::clone(&self.identity);
                    let flight = async move { identity.fetch_token().await }.boxed().shared();
                    state.in_flight = Some((state.generation, flight.clone()));
                    log::info!("Refreshing access token");
                    (state.generation, flight)
                }
            }
        };

        let result = flight.await;

        let mut state = self.state.lock().await;
        let owns_flight = matches!(&state.in_flight, Some((g, _)) if *g == generation);
        if owns_flight {
            state.in_flight = None;
            match &result {
                Ok(token) => state.token = Some(token.clone()),
                Err(err) => log::warn!("Token refresh failed: {}", err),
            }
        }

        result
    }

    /// Drop the cached token so the next call refreshes
    pub async fn invalidate(&self) {
        self.state.lock().await.token = None;
    }
}
