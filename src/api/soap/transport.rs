//! Byte-level transport seam
//!
//! `SoapTransport` moves one finished envelope to an endpoint and returns the
//! raw reply. It adds nothing and interprets nothing; auth headers, faults and
//! retry-safety belong to `SoapClient`.

use crate::api::constants::headers;
use crate::api::error::TransportErrorKind;
use async_trait::async_trait;
use std::time::Duration;

/// A ready-to-send SOAP request
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl WireRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

/// The reply never arrived
#[derive(Debug, Clone)]
pub struct WireFailure {
    pub kind: TransportErrorKind,
    pub message: String,
}

#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, WireFailure>;
}

/// Timeouts for the HTTP connection pool
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// `reqwest` transport with connection pooling
#[derive(Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(settings: &HttpSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(headers::USER_AGENT)
            .build()?;

        Ok(Self { http_client })
    }

    pub fn with_custom_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn classify(error: &reqwest::Error) -> TransportErrorKind {
        if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Request
        }
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, WireFailure> {
        let mut builder = self.http_client.post(&request.endpoint);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| WireFailure {
                kind: Self::classify(&e),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| WireFailure {
            kind: Self::classify(&e),
            message: format!("reading response body: {}", e),
        })?;

        Ok(WireResponse { status, body })
    }
}
