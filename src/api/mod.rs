//! Ad Manager SOAP API client
//!
//! `AdManagerClient` resolves `(version, service)` pairs through the
//! `VersionRegistry` into service handles. Every handle shares one
//! `CredentialProvider` and one `SoapTransport`. Statements select entities
//! for listing and bulk actions; failures surface as `Error`.

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod manager;
pub mod models;
pub mod operations;
pub mod query;
pub mod registry;
pub mod resilience;
pub mod service;
pub mod soap;

pub use auth::{CredentialProvider, IdentityProvider, ServiceAccountIdentity};
pub use client::{ClientContext, SoapClient, SoapRequest};
pub use error::{ApiError, ApiErrorDetail, AuthError, Error, Result, TransportError, TransportErrorKind, ValidationError};
pub use manager::{AdManagerClient, AdManagerClientBuilder};
pub use models::Token;
pub use operations::{Action, ActionResult};
pub use query::{PageResult, Statement, StatementBuilder, SUGGESTED_PAGE_LIMIT, Value};
pub use registry::{ApiService, ServiceEntry, ServiceHandle, VersionRegistry, VersionSchema};
pub use resilience::{CallLogger, RetryConfig, RetryPolicy};
pub use service::{ByStatement, PerformAction};
pub use soap::{HttpSettings, HttpTransport, SoapTransport, WireFailure, WireRequest, WireResponse};
