use crate::api::constants::{AD_MANAGER_SCOPE, DEFAULT_TOKEN_URI};
use crate::api::error::AuthError;
use anyhow::Result;
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Service-account identity plus the scopes it asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// JSON key on disk, read on first token refresh
    KeyFile { path: PathBuf, scopes: Vec<String> },
    /// JSON key already in memory
    KeyJson { json: String, scopes: Vec<String> },
}

impl Credential {
    pub fn key_file(path: impl Into<PathBuf>) -> Self {
        Self::KeyFile {
            path: path.into(),
            scopes: default_scopes(),
        }
    }

    pub fn key_json(json: impl Into<String>) -> Self {
        Self::KeyJson {
            json: json.into(),
            scopes: default_scopes(),
        }
    }

    /// Replace the requested scope set
    pub fn with_scopes<I, S>(self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scopes = scopes.into_iter().map(Into::into).collect();
        match self {
            Self::KeyFile { path, .. } => Self::KeyFile { path, scopes },
            Self::KeyJson { json, .. } => Self::KeyJson { json, scopes },
        }
    }

    pub fn scopes(&self) -> &[String] {
        match self {
            Self::KeyFile { scopes, .. } | Self::KeyJson { scopes, .. } => scopes,
        }
    }

    pub fn from_env() -> Result<Credential> {
        info!("Importing credential from environment variables");

        let path = std::env::var("AD_MANAGER_KEY_FILE")
            .map_err(|_| anyhow::anyhow!("AD_MANAGER_KEY_FILE environment variable not set"))?;

        Ok(Credential::key_file(path))
    }

    /// Load the key material this credential points at
    pub fn load_key(&self) -> std::result::Result<ServiceAccountKey, AuthError> {
        match self {
            Self::KeyFile { path, .. } => ServiceAccountKey::from_file(path),
            Self::KeyJson { json, .. } => ServiceAccountKey::from_json(json),
        }
    }
}

fn default_scopes() -> Vec<String> {
    vec![AD_MANAGER_SCOPE.to_string()]
}

/// The fields of a service-account JSON key this client needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> std::result::Result<Self, AuthError> {
        let key: ServiceAccountKey =
            serde_json::from_str(json).map_err(|e| AuthError::MalformedKey(e.to_string()))?;

        if key.client_email.is_empty() {
            return Err(AuthError::MalformedKey("client_email is empty".to_string()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(AuthError::MalformedKey(
                "private_key is not a PEM encoded key".to_string(),
            ));
        }

        Ok(key)
    }

    pub fn from_file(path: &Path) -> std::result::Result<Self, AuthError> {
        info!("Reading service account key from {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|e| AuthError::KeyFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&json)
    }
}
