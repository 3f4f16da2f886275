use crate::api::constants::{AD_MANAGER_SCOPE, DEFAULT_BASE_URL, DEFAULT_REFRESH_MARGIN_SECS};
use crate::api::error::ValidationError;
use crate::api::soap::HttpSettings;
use crate::auth::Credential;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_NETWORK_CODE: &str = "AD_MANAGER_NETWORK_CODE";
pub const ENV_APPLICATION_NAME: &str = "AD_MANAGER_APPLICATION_NAME";
pub const ENV_KEY_FILE: &str = "AD_MANAGER_KEY_FILE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    pub key_file: PathBuf,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Newest registered version when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_refresh_margin")]
    pub refresh_margin_secs: u64,
    #[serde(default = "default_request_logging")]
    pub request_logging: bool,
}

fn default_scopes() -> Vec<String> {
    vec![AD_MANAGER_SCOPE.to_string()]
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_refresh_margin() -> u64 {
    DEFAULT_REFRESH_MARGIN_SECS
}

fn default_request_logging() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_version: None,
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            refresh_margin_secs: default_refresh_margin(),
            request_logging: default_request_logging(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network_code: u64,
    pub application_name: String,
    pub credential: CredentialConfig,
    #[serde(default)]
    pub api: ApiSettings,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("ad-manager")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".ad-manager")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, then apply `.env` and environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);
        dotenvy::dotenv().ok();

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config = Self::from_toml_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        debug!(
            "Loaded config for network {} ({})",
            config.network_code, config.application_name
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }

    /// Override fields from `lookup`, normally the process environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup(ENV_NETWORK_CODE) {
            self.network_code = code
                .trim()
                .parse()
                .with_context(|| format!("{} is not a network code: {}", ENV_NETWORK_CODE, code))?;
            debug!("Network code overridden from {}", ENV_NETWORK_CODE);
        }
        if let Some(name) = lookup(ENV_APPLICATION_NAME) {
            self.application_name = name;
        }
        if let Some(path) = lookup(ENV_KEY_FILE) {
            self.credential.key_file = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.network_code == 0 {
            return Err(ValidationError::InvalidNetworkCode.into());
        }
        if self.application_name.trim().is_empty() {
            return Err(ValidationError::EmptyApplicationName.into());
        }
        if self.credential.scopes.is_empty() {
            anyhow::bail!("credential.scopes must list at least one scope");
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", path);

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
                info!("Created config directory: {:?}", dir);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn credential(&self) -> Credential {
        Credential::key_file(&self.credential.key_file).with_scopes(self.credential.scopes.iter().cloned())
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            request_timeout: self.request_timeout(),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn refresh_margin(&self) -> Duration {
        Duration::from_secs(self.api.refresh_margin_secs)
    }
}
