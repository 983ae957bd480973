use crate::error::{AdcError, Result};
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection and logging settings for talking to the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdcConfig {
    /// Admin API address, e.g. `http://127.0.0.1:9180`.
    #[serde(default = "default_server")]
    pub server: String,
    /// Admin API key.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub tls: TlsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// mTLS material for the admin API connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// CA bundle path. mTLS is only in effect when this is set.
    pub capath: Option<String>,
    pub cert: Option<String>,
    pub cert_key: Option<String>,
    #[serde(default)]
    pub insecure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_server() -> String { "http://127.0.0.1:9180".into() }
fn default_log_level() -> String { "info".into() }

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            token: String::new(),
            tls: TlsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
        }
    }
}

// ── Impls ─────────────────────────────────────────────────────

impl AdcConfig {
    /// Load configuration from YAML file + env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config: AdcConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("ADC_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the TLS settings and normalise the server address.
    ///
    /// With a CA configured, certificate and key must come as a pair and the
    /// server is always reached over https.
    pub fn validate(&mut self) -> Result<()> {
        if self.server.is_empty() {
            return Err(AdcError::Config("admin API server address is empty".into()));
        }
        if self.tls.capath.is_none() {
            return Ok(());
        }
        match (&self.tls.cert, &self.tls.cert_key) {
            (Some(_), None) => {
                return Err(AdcError::Config("certificate key file path not provided".into()));
            }
            (None, Some(_)) => {
                return Err(AdcError::Config("certificate file path not provided".into()));
            }
            _ => {}
        }
        if let Some(rest) = self.server.strip_prefix("http://") {
            tracing::warn!(server = %self.server, "admin API address uses http with mTLS, switching to https");
            self.server = format!("https://{rest}");
        }
        Ok(())
    }

    /// True when client certificates should be presented.
    pub fn mtls_enabled(&self) -> bool {
        self.tls.capath.is_some() && self.tls.cert.is_some() && self.tls.cert_key.is_some()
    }
}
