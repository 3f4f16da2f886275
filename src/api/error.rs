//! Error taxonomy for the Ad Manager client
//!
//! Every failure surfaces to the caller as one of these variants. Per-entity
//! permission failures inside a bulk action are not errors; they are reported
//! through `ActionResult::failed_entity_ids`.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("unsupported API version '{0}'")]
    UnsupportedVersion(String),

    #[error("service '{service}' is not available in API version {version}")]
    UnknownService { version: String, service: String },

    #[error("service handle {version}/{service} is not a {expected}")]
    ServiceMismatch {
        version: String,
        service: String,
        expected: &'static str,
    },
}

impl Error {
    /// Whether repeating the failed call cannot duplicate server-side effects.
    ///
    /// Only transport failures of idempotent calls qualify. Faults, validation
    /// and auth failures will fail the same way again.
    pub fn is_retry_safe(&self) -> bool {
        match self {
            Error::Transport(err) => err.retry_safe,
            _ => false,
        }
    }
}

/// Credential and identity-provider failures
///
/// `Clone` so one refresh outcome can be handed to every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("cannot read key file {path}: {reason}")]
    KeyFile { path: String, reason: String },

    #[error("malformed service account key: {0}")]
    MalformedKey(String),

    #[error("could not sign token assertion: {0}")]
    Signing(String),

    #[error("identity provider rejected the token request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("token request failed: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Status(u16),
    MalformedResponse,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "timed out"),
            TransportErrorKind::Connect => write!(f, "connection failed"),
            TransportErrorKind::Request => write!(f, "request failed"),
            TransportErrorKind::Status(code) => write!(f, "HTTP {}", code),
            TransportErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

impl TransportErrorKind {
    /// Failure classes that say nothing about the request itself
    pub fn is_transient(&self) -> bool {
        match self {
            TransportErrorKind::Timeout
            | TransportErrorKind::Connect
            | TransportErrorKind::Request => true,
            TransportErrorKind::Status(status) => {
                matches!(status, 408 | 429) || (500..=599).contains(status)
            }
            TransportErrorKind::MalformedResponse => false,
        }
    }
}

/// Network-level failure of a single call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{method}: {kind}: {message}")]
pub struct TransportError {
    pub method: String,
    pub kind: TransportErrorKind,
    /// True when the call may be repeated without risking duplicate effects.
    pub retry_safe: bool,
    pub message: String,
}

impl TransportError {
    /// Classify a failure for `method`; only idempotent methods can be retry-safe.
    pub fn new(
        method: impl Into<String>,
        kind: TransportErrorKind,
        idempotent: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            kind,
            retry_safe: idempotent && kind.is_transient(),
            message: message.into(),
        }
    }
}

/// One entry of a server fault's error list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorDetail {
    /// Server error class, e.g. `PermissionError`.
    pub error_type: Option<String>,
    /// Full error string, e.g. `PermissionError.PERMISSION_DENIED`.
    pub code: String,
    pub reason: Option<String>,
    pub field_path: Option<String>,
    pub trigger: Option<String>,
}

/// Decoded SOAP fault
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub fault_code: String,
    pub message: String,
    pub errors: Vec<ApiErrorDetail>,
}

impl ApiError {
    /// Error code of the first reported error, falling back to the fault code
    pub fn code(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.code.as_str())
            .unwrap_or(&self.fault_code)
    }

    /// Offending field path of the first error that names one
    pub fn field_path(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.field_path.as_deref())
    }
}

/// Caller mistakes caught before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("statement references ':{0}' but no value is bound for it")]
    MissingValue(String),

    #[error("statement binds '{0}' but the query never references it")]
    UnusedValue(String),

    #[error("network code must be a positive integer")]
    InvalidNetworkCode,

    #[error("application name must not be empty")]
    EmptyApplicationName,

    #[error("no credential configured")]
    MissingCredential,
}
