//! Credential material for service-account authentication

pub mod credentials;

pub use credentials::{Credential, ServiceAccountKey};
