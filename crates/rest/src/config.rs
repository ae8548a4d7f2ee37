//! Connection settings for [`crate::HttpRestClient`].

use std::time::Duration;

use panda::CloudId;
use thiserror::Error;

/// Default API host.
pub const DEFAULT_API_HOST: &str = "api.pandastream.com";
/// Default API port.
pub const DEFAULT_API_PORT: u16 = 443;
/// Default API version, the `v2` in `/v2/videos.json`.
pub const DEFAULT_API_VERSION: u32 = 2;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while building a client from configuration.
#[derive(Debug, Error)]
pub enum RestConfigError {
    /// A required setting is absent or empty.
    #[error("{0} not set")]
    Missing(&'static str),

    /// A setting is present but cannot be parsed.
    #[error("Invalid value for {name}: '{value}'")]
    Invalid {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Credentials and endpoint of one cloud.
#[derive(Clone)]
pub struct RestConfig {
    pub access_key: String,
    pub secret_key: String,
    pub cloud_id: CloudId,
    pub api_host: String,
    pub api_port: u16,
    pub api_version: u32,
    /// Whole-request timeout, uploads included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RestConfig {
    /// Creates a configuration for the public API endpoint.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        cloud_id: CloudId,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            cloud_id,
            api_host: DEFAULT_API_HOST.to_string(),
            api_port: DEFAULT_API_PORT,
            api_version: DEFAULT_API_VERSION,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Reads the configuration from `PANDA_*` environment variables.
    ///
    /// `PANDA_ACCESS_KEY`, `PANDA_SECRET_KEY` and `PANDA_CLOUD_ID` are required;
    /// `PANDA_API_HOST`, `PANDA_API_PORT` and `PANDA_API_VERSION` override the
    /// defaults.
    pub fn from_env() -> Result<Self, RestConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, RestConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(RestConfigError::Missing(name))
        };

        let cloud_id = CloudId::new(required("PANDA_CLOUD_ID")?)
            .ok_or(RestConfigError::Missing("PANDA_CLOUD_ID"))?;
        let mut config = Self::new(
            required("PANDA_ACCESS_KEY")?,
            required("PANDA_SECRET_KEY")?,
            cloud_id,
        );

        if let Some(host) = lookup("PANDA_API_HOST").filter(|v| !v.is_empty()) {
            config.api_host = host;
        }
        if let Some(port) = lookup("PANDA_API_PORT") {
            config.api_port = port.parse().map_err(|_| RestConfigError::Invalid {
                name: "PANDA_API_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(version) = lookup("PANDA_API_VERSION") {
            config.api_version = version.parse().map_err(|_| RestConfigError::Invalid {
                name: "PANDA_API_VERSION",
                value: version.clone(),
            })?;
        }

        Ok(config)
    }

    /// Overrides the API host name.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Overrides the API port. Port 443 selects `https`.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.api_port = port;
        self
    }

    /// Overrides the version segment of the base URL (`/v{n}`).
    #[must_use]
    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    /// Overrides the whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `https` on port 443, plain `http` anywhere else.
    pub fn scheme(&self) -> &'static str {
        if self.api_port == 443 {
            "https"
        } else {
            "http"
        }
    }

    /// Root every request path is appended to, e.g.
    /// `https://api.pandastream.com:443/v2`.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/v{}",
            self.scheme(),
            self.api_host,
            self.api_port,
            self.api_version
        )
    }
}

impl std::fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("cloud_id", &self.cloud_id)
            .field("api_host", &self.api_host)
            .field("api_port", &self.api_port)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
