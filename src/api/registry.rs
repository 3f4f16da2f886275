//! Version registry: which services exist in which API version
//!
//! Each version contributes a `VersionSchema` listing its services. Lookups
//! are by `(version tag, service name)`; anything not listed is an error, never
//! a fallback to another version.

use super::client::SoapClient;
use super::error::{Error, Result};
use log::warn;
use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A service type generated for one version
pub trait ApiService: Any + Send + Sync + Sized {
    /// Version tag, e.g. `v202202`
    const VERSION: &'static str;
    /// Service name as it appears in the endpoint path
    const NAME: &'static str;

    fn bind(client: SoapClient) -> Self;
}

fn construct<S: ApiService>(client: SoapClient) -> Arc<dyn Any + Send + Sync> {
    Arc::new(S::bind(client))
}

/// How to build one service of one version
#[derive(Clone, Copy)]
pub struct ServiceEntry {
    version: &'static str,
    name: &'static str,
    type_name: &'static str,
    construct: fn(SoapClient) -> Arc<dyn Any + Send + Sync>,
}

impl ServiceEntry {
    pub fn of<S: ApiService>() -> Self {
        Self {
            version: S::VERSION,
            name: S::NAME,
            type_name: type_name::<S>(),
            construct: construct::<S>,
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build the service on `client`, which must be bound to this entry's
    /// version and name
    pub fn instantiate(&self, client: SoapClient) -> ServiceHandle {
        ServiceHandle {
            version: self.version,
            name: self.name,
            service: (self.construct)(client),
        }
    }
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("version", &self.version)
            .field("name", &self.name)
            .field("type", &self.type_name)
            .finish()
    }
}

/// Services of one API version
#[derive(Debug, Clone)]
pub struct VersionSchema {
    tag: &'static str,
    services: BTreeMap<&'static str, ServiceEntry>,
}

impl VersionSchema {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            services: BTreeMap::new(),
        }
    }

    /// Add `S`; a service generated for another version is skipped
    pub fn with<S: ApiService>(mut self) -> Self {
        let entry = ServiceEntry::of::<S>();
        if entry.version != self.tag {
            warn!(
                "Not registering {} under {}: it belongs to {}",
                entry.type_name, self.tag, entry.version
            );
            return self;
        }
        self.services.insert(entry.name, entry);
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn service(&self, name: &str) -> Option<&ServiceEntry> {
        self.services.get(name)
    }

    pub fn service_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.services.keys().copied()
    }
}

/// Known API versions
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    versions: BTreeMap<&'static str, VersionSchema>,
}

impl VersionRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every version compiled into this crate
    pub fn builtin() -> Self {
        crate::versions::schemas()
            .into_iter()
            .fold(Self::empty(), Self::with_schema)
    }

    pub fn with_schema(mut self, schema: VersionSchema) -> Self {
        self.versions.insert(schema.tag, schema);
        self
    }

    pub fn resolve(&self, version: &str, service: &str) -> Result<&ServiceEntry> {
        let schema = self
            .versions
            .get(version)
            .ok_or_else(|| Error::UnsupportedVersion(version.to_string()))?;

        schema.service(service).ok_or_else(|| Error::UnknownService {
            version: version.to_string(),
            service: service.to_string(),
        })
    }

    pub fn supports(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Version tags, oldest first
    pub fn versions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.versions.keys().copied()
    }

    pub fn schema(&self, version: &str) -> Option<&VersionSchema> {
        self.versions.get(version)
    }

    /// Tags sort chronologically, so the last one is the newest
    pub fn latest(&self) -> Option<&'static str> {
        self.versions.keys().next_back().copied()
    }
}

/// A constructed service, erased until the caller names its type
#[derive(Clone)]
pub struct ServiceHandle {
    version: &'static str,
    name: &'static str,
    service: Arc<dyn Any + Send + Sync>,
}

impl ServiceHandle {
    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Recover the concrete service
    pub fn downcast<S: ApiService>(&self) -> Result<Arc<S>> {
        Arc::clone(&self.service)
            .downcast::<S>()
            .map_err(|_| Error::ServiceMismatch {
                version: self.version.to_string(),
                service: self.name.to_string(),
                expected: type_name::<S>(),
            })
    }

    /// Same underlying instance
    pub fn ptr_eq(&self, other: &ServiceHandle) -> bool {
        Arc::ptr_eq(&self.service, &other.service)
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("version", &self.version)
            .field("name", &self.name)
            .finish()
    }
}
