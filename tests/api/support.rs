//! Stub transport and identity shared by the integration tests

use ad_manager::api::{
    AdManagerClient, AuthError, IdentityProvider, SoapTransport, Token, TransportErrorKind,
    WireFailure, WireRequest, WireResponse,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const NETWORK_CODE: u64 = 117238412;
pub const APPLICATION_NAME: &str = "integration-tests";

pub enum Scripted {
    Reply(WireResponse),
    Fail(WireFailure),
    /// Never answers
    Hang,
}

/// Replays scripted replies in order and records every request
#[derive(Default)]
pub struct StubTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<WireRequest>>,
    calls: AtomicUsize,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Scripted::Reply(WireResponse {
            status,
            body: body.into(),
        }))
    }

    pub fn fail(&self, kind: TransportErrorKind, message: &str) -> &Self {
        self.push(Scripted::Fail(WireFailure {
            kind,
            message: message.to_string(),
        }))
    }

    pub fn hang(&self) -> &Self {
        self.push(Scripted::Hang)
    }

    fn push(&self, item: Scripted) -> &Self {
        self.script.lock().unwrap().push_back(item);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> WireRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

#[async_trait]
impl SoapTransport for StubTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, WireFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(failure)) => Err(failure),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(WireFailure {
                kind: TransportErrorKind::Connect,
                message: "no scripted response left".to_string(),
            }),
        }
    }
}

/// Counts token fetches; each fetch takes `delay`
pub struct CountingIdentity {
    calls: AtomicUsize,
    delay: Duration,
    lifetime: Duration,
    failures: AtomicUsize,
}

impl CountingIdentity {
    pub fn new() -> Arc<Self> {
        Self::with(Duration::ZERO, Duration::from_secs(3600))
    }

    pub fn with(delay: Duration, lifetime: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
            lifetime,
            failures: AtomicUsize::new(0),
        })
    }

    /// Reject the next `count` fetches
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for CountingIdentity {
    async fn fetch_token(&self) -> Result<Token, AuthError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |f| f.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AuthError::Rejected {
                status: 400,
                body: "invalid_grant".to_string(),
            });
        }

        Ok(Token::new(format!("token-{}", n), self.lifetime))
    }
}

pub fn client(transport: Arc<StubTransport>, identity: Arc<CountingIdentity>) -> AdManagerClient {
    AdManagerClient::builder()
        .network_code(NETWORK_CODE)
        .application_name(APPLICATION_NAME)
        .identity(identity)
        .transport(transport)
        .request_logging(false)
        .build()
        .expect("client builds")
}

/// Successful response envelope for `method`
pub fn envelope(version: &str, method: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    <ResponseHeader xmlns="https://www.google.com/apis/ads/publisher/{version}">
      <requestId>test-request</requestId>
      <responseTime>12</responseTime>
    </ResponseHeader>
  </soap:Header>
  <soap:Body>
    <{method}Response xmlns="https://www.google.com/apis/ads/publisher/{version}">{inner}</{method}Response>
  </soap:Body>
</soap:Envelope>"#
    )
}

/// `ApiExceptionFault` envelope with one error
pub fn fault(version: &str, error_type: &str, reason: &str, field_path: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>[{error_type}.{reason} @ {field_path}]</faultstring>
      <detail>
        <ApiExceptionFault xmlns="https://www.google.com/apis/ads/publisher/{version}">
          <message>[{error_type}.{reason} @ {field_path}]</message>
          <applicationExceptionType>ApiException</applicationExceptionType>
          <errors xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="{error_type}">
            <fieldPath>{field_path}</fieldPath>
            <errorString>{error_type}.{reason}</errorString>
            <reason>{reason}</reason>
          </errors>
        </ApiExceptionFault>
      </detail>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#
    )
}
