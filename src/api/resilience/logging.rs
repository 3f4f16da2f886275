//! Structured logging with correlation tracking for SOAP calls
//!
//! Every call gets a correlation id. Start, request, and completion are each
//! logged as one JSON line so a call can be followed through the log file.

use log::{debug, info, warn};
use serde_json::{Value, json};
use std::time::{Duration, Instant};

/// Structured logger for service calls
#[derive(Debug, Clone)]
pub struct CallLogger {
    request_logging: bool,
}

/// Context for a single call
#[derive(Debug, Clone)]
pub struct CallContext {
    pub correlation_id: String,
    pub version: String,
    pub service: String,
    pub method: String,
    pub start_time: Instant,
}

impl Default for CallLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CallLogger {
    pub fn new(request_logging: bool) -> Self {
        Self { request_logging }
    }

    /// Start tracking a call
    pub fn start_call(&self, version: &str, service: &str, method: &str) -> CallContext {
        let context = CallContext {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            version: version.to_string(),
            service: service.to_string(),
            method: method.to_string(),
            start_time: Instant::now(),
        };

        if self.request_logging {
            let log_data = json!({
                "event": "call_started",
                "correlation_id": context.correlation_id,
                "version": context.version,
                "service": context.service,
                "method": context.method,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });

            debug!("SOAP Call Started: {}", log_data);
        }

        context
    }

    /// Log the outgoing request
    pub fn log_request(&self, context: &CallContext, endpoint: &str, headers: &[(String, String)]) {
        if !self.request_logging {
            return;
        }

        let log_data = json!({
            "event": "soap_request",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "endpoint": endpoint,
            "headers": Self::sanitize_headers(headers),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        debug!("SOAP Request: {}", log_data);
    }

    /// Log the HTTP status of the reply
    pub fn log_response(&self, context: &CallContext, status_code: u16) {
        if !self.request_logging {
            return;
        }

        let log_data = json!({
            "event": "soap_response",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "status_code": status_code,
            "elapsed_ms": context.start_time.elapsed().as_millis() as u64,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            warn!("SOAP Response (Error): {}", log_data);
        } else {
            debug!("SOAP Response: {}", log_data);
        }
    }

    /// Log how the call ended
    pub fn complete_call(&self, context: &CallContext, error: Option<&str>) {
        let duration = context.start_time.elapsed();
        let log_data = json!({
            "event": "call_completed",
            "correlation_id": context.correlation_id,
            "service": context.service,
            "method": context.method,
            "success": error.is_none(),
            "error": error,
            "duration_ms": duration.as_millis() as u64,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        match error {
            Some(_) => warn!("SOAP Call Failed: {}", log_data),
            None if Self::is_slow(duration) => info!("SOAP Call Completed (slow): {}", log_data),
            None => debug!("SOAP Call Completed: {}", log_data),
        }
    }

    fn is_slow(duration: Duration) -> bool {
        duration > Duration::from_secs(5)
    }

    /// Redact credentials before headers reach the log
    pub fn sanitize_headers(headers: &[(String, String)]) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in headers {
            let shown = if name.eq_ignore_ascii_case("authorization") {
                "[REDACTED]".to_string()
            } else {
                value.clone()
            };
            map.insert(name.clone(), Value::String(shown));
        }
        Value::Object(map)
    }
}
