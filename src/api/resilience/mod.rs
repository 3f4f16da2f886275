//! Resilience helpers layered outside the client
//!
//! Provides the opt-in retry policy and the structured call logger used by
//! `SoapClient`.

pub mod logging;
pub mod retry;

pub use logging::{CallContext, CallLogger};
pub use retry::{RetryConfig, RetryPolicy, should_retry};
