//! Configuration management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Default API endpoint for accounts without an organization
pub const DEFAULT_API_URL: &str = "https://api.crowdin.com/api/v2";

/// Credentials identifying the caller to the management API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// API token sent as bearer credentials
    pub token: String,
    /// Organization (enterprise) name
    #[serde(default)]
    pub organization: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &REDACTED)
            .field("organization", &self.organization)
            .finish()
    }
}

/// Printed in place of the token
const REDACTED: &str = "<redacted>";

impl Credentials {
    /// Credentials without an organization
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            organization: None,
        }
    }

    /// Set the organization
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// API root derived from the organization
    pub fn api_url(&self) -> String {
        match self.organization.as_deref().filter(|o| !o.is_empty()) {
            Some(org) => format!("https://{}.api.crowdin.com/api/v2", org),
            None => DEFAULT_API_URL.to_string(),
        }
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Configuration for the MT client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API token
    pub token: String,
    /// Organization (enterprise) name
    #[serde(default)]
    pub organization: Option<String>,
    /// Overrides the URL derived from the organization
    #[serde(default)]
    pub base_url: Option<String>,
    /// Passed to the HTTP transport; no timeout when unset
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// `User-Agent` header sent by the transport
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &REDACTED)
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config from explicit credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            token: credentials.token,
            organization: credentials.organization,
            base_url: None,
            timeout_ms: None,
            user_agent: default_user_agent(),
        }
    }

    /// Override the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the transport timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("MT_API_TOKEN")
            .map_err(|_| anyhow::anyhow!("MT_API_TOKEN environment variable is required"))?;

        let organization = std::env::var("MT_API_ORGANIZATION")
            .ok()
            .filter(|o| !o.is_empty());

        let base_url = std::env::var("MT_API_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty());

        let timeout_ms = match std::env::var("MT_API_TIMEOUT_MS") {
            Ok(value) => Some(value.parse::<u64>().map_err(|e| {
                anyhow::anyhow!("MT_API_TIMEOUT_MS must be a number of milliseconds: {}", e)
            })?),
            Err(_) => None,
        };

        Ok(Self {
            token,
            organization,
            base_url,
            timeout_ms,
            user_agent: default_user_agent(),
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.token.is_empty() {
            return Err(anyhow::anyhow!("API token is required"));
        }

        if let Some(base_url) = &self.base_url {
            let url = reqwest::Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base_url, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!("Base URL must be http or https: {}", base_url));
            }
            if url.scheme() == "http" {
                warn!("Base URL {} is not using TLS", base_url);
            }
        }

        if self.timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Credentials held by the client
    pub fn credentials(&self) -> Credentials {
        Credentials {
            token: self.token.clone(),
            organization: self.organization.clone(),
        }
    }

    /// Resolved API root, without trailing slash
    pub fn api_url(&self) -> String {
        let url = match &self.base_url {
            Some(base_url) => base_url.clone(),
            None => self.credentials().api_url(),
        };
        url.trim_end_matches('/').to_string()
    }
}
