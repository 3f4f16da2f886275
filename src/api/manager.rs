use super::auth::{CredentialProvider, IdentityProvider, ServiceAccountIdentity};
use super::client::ClientContext;
use super::constants::{DEFAULT_BASE_URL, DEFAULT_REFRESH_MARGIN_SECS};
use super::error::{Error, Result, TransportError, TransportErrorKind, ValidationError};
use super::registry::{ApiService, ServiceHandle, VersionRegistry};
use super::resilience::CallLogger;
use super::soap::{HttpSettings, HttpTransport, SoapTransport};
use crate::auth::Credential;
use crate::config::Config;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Entry point: one network, one credential, any number of service handles
///
/// Handles are created on first request and cached for the client's lifetime.
/// Nothing touches the network until a method is called on a handle.
pub struct AdManagerClient {
    context: Arc<ClientContext>,
    registry: VersionRegistry,
    services: RwLock<HashMap<(String, String), ServiceHandle>>,
}

impl AdManagerClient {
    /// Production client: HTTP transport and service-account identity
    pub fn new(network_code: u64, application_name: impl Into<String>, credential: Credential) -> Result<Self> {
        Self::builder()
            .network_code(network_code)
            .application_name(application_name)
            .credential(credential)
            .build()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder()
            .network_code(config.network_code)
            .application_name(config.application_name.clone())
            .credential(config.credential())
            .base_url(config.api.base_url.clone())
            .http_settings(config.http_settings())
            .call_timeout(config.request_timeout())
            .refresh_margin(config.refresh_margin())
            .request_logging(config.api.request_logging)
            .build()
    }

    pub fn builder() -> AdManagerClientBuilder {
        AdManagerClientBuilder::default()
    }

    pub fn network_code(&self) -> u64 {
        self.context.network_code()
    }

    pub fn application_name(&self) -> &str {
        self.context.application_name()
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Token cache shared by every handle of this client
    pub fn credentials(&self) -> &Arc<CredentialProvider> {
        self.context.credentials()
    }

    /// Handle for `service` at `version`, the same instance on every call
    pub async fn get_service(&self, version: &str, service: &str) -> Result<ServiceHandle> {
        let key = (version.to_string(), service.to_string());

        if let Some(handle) = self.services.read().await.get(&key) {
            return Ok(handle.clone());
        }

        let entry = self.registry.resolve(version, service)?;

        let mut services = self.services.write().await;
        let handle = services
            .entry(key)
            .or_insert_with(|| {
                debug!("Creating {} {} handle", entry.version(), entry.name());
                entry.instantiate(self.context.bind(entry.version(), entry.name()))
            })
            .clone();

        Ok(handle)
    }

    /// Typed handle, e.g. `client.service::<v202202::NetworkService>()`
    pub async fn service<S: ApiService>(&self) -> Result<Arc<S>> {
        self.get_service(S::VERSION, S::NAME).await?.downcast::<S>()
    }

    pub async fn cached_services(&self) -> usize {
        self.services.read().await.len()
    }
}

/// Assembles an `AdManagerClient`; transport and identity default to HTTP
#[derive(Default)]
pub struct AdManagerClientBuilder {
    network_code: Option<u64>,
    application_name: Option<String>,
    credential: Option<Credential>,
    identity: Option<Arc<dyn IdentityProvider>>,
    credentials: Option<Arc<CredentialProvider>>,
    transport: Option<Arc<dyn SoapTransport>>,
    registry: Option<VersionRegistry>,
    base_url: Option<String>,
    http_settings: Option<HttpSettings>,
    call_timeout: Option<Duration>,
    refresh_margin: Option<Duration>,
    request_logging: Option<bool>,
}

impl AdManagerClientBuilder {
    pub fn network_code(mut self, network_code: u64) -> Self {
        self.network_code = Some(network_code);
        self
    }

    pub fn application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = Some(application_name.into());
        self
    }

    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Custom token source; wrapped in a `CredentialProvider`
    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Share an existing token cache, e.g. across clients for several networks
    ///
    /// The provider keeps its own refresh margin; `refresh_margin` is ignored.
    pub fn credential_provider(mut self, credentials: Arc<CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn SoapTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn registry(mut self, registry: VersionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn http_settings(mut self, http_settings: HttpSettings) -> Self {
        self.http_settings = Some(http_settings);
        self
    }

    /// Upper bound on one call, token fetch excluded
    pub fn call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = Some(call_timeout);
        self
    }

    pub fn refresh_margin(mut self, refresh_margin: Duration) -> Self {
        self.refresh_margin = Some(refresh_margin);
        self
    }

    pub fn request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = Some(enabled);
        self
    }

    pub fn build(self) -> Result<AdManagerClient> {
        let network_code = match self.network_code {
            Some(code) if code > 0 => code,
            _ => return Err(ValidationError::InvalidNetworkCode.into()),
        };

        let application_name = self.application_name.unwrap_or_default();
        if application_name.trim().is_empty() {
            return Err(ValidationError::EmptyApplicationName.into());
        }

        let http_settings = self.http_settings.unwrap_or_default();
        if self.credentials.is_some() && self.refresh_margin.is_some() {
            warn!("refresh_margin ignored: a shared credential provider keeps its own");
        }
        let refresh_margin = self
            .refresh_margin
            .unwrap_or(Duration::from_secs(DEFAULT_REFRESH_MARGIN_SECS));

        let credentials = match (self.credentials, self.identity, self.credential) {
            (Some(credentials), _, _) => credentials,
            (None, Some(identity), _) => Arc::new(CredentialProvider::with_refresh_margin(identity, refresh_margin)),
            (None, None, Some(credential)) => {
                let identity = Arc::new(ServiceAccountIdentity::new(credential));
                Arc::new(CredentialProvider::with_refresh_margin(identity, refresh_margin))
            }
            (None, None, None) => return Err(ValidationError::MissingCredential.into()),
        };

        let transport: Arc<dyn SoapTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&http_settings).map_err(|e| {
                Error::Transport(TransportError::new(
                    "connect",
                    TransportErrorKind::Request,
                    false,
                    format!("cannot build HTTP client: {}", e),
                ))
            })?),
        };

        let context = ClientContext::new(
            network_code,
            application_name,
            self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            credentials,
            transport,
        )
        .with_call_timeout(self.call_timeout.unwrap_or(http_settings.request_timeout))
        .with_logger(CallLogger::new(self.request_logging.unwrap_or(true)));

        info!(
            "Ad Manager client ready for network {} ({})",
            context.network_code(),
            context.application_name()
        );

        Ok(AdManagerClient {
            context: Arc::new(context),
            registry: self.registry.unwrap_or_else(VersionRegistry::builtin),
            services: RwLock::new(HashMap::new()),
        })
    }
}
