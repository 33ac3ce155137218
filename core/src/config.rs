//! Client configuration: credentials and target environment.
//!
//! Configuration is immutable once built. `from_env` reads:
//!
//! - `SIGNATURIT_TOKEN` (required)
//! - `SIGNATURIT_PRODUCTION`: `true`, `1` or `yes` selects production
//!   (default: sandbox)
//! - `SIGNATURIT_BASE_URL`: overrides the environment's base URL

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const PRODUCTION_URL: &str = "https://api.signaturit.com";
pub const SANDBOX_URL: &str = "https://api.sandbox.signaturit.com";

/// Sent on every request.
pub const USER_AGENT: &str = concat!("signaturit-rust-sdk/", env!("CARGO_PKG_VERSION"));

pub const TOKEN_VAR: &str = "SIGNATURIT_TOKEN";
pub const PRODUCTION_VAR: &str = "SIGNATURIT_PRODUCTION";
pub const BASE_URL_VAR: &str = "SIGNATURIT_BASE_URL";

/// Vendor environment. Both expose the same API shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn from_production_flag(production: bool) -> Self {
        if production {
            Environment::Production
        } else {
            Environment::Sandbox
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

/// Token plus base URL.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    token: String,
    environment: Environment,
    base_url: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>, production: bool) -> Self {
        let environment = Environment::from_production_flag(production);
        Self {
            token: token.into(),
            environment,
            base_url: environment.base_url().to_string(),
        }
    }

    /// Point at another host, e.g. a local mock. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ApiError::MissingParameter(TOKEN_VAR))?;
        let production = lookup(PRODUCTION_VAR)
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let config = Self::new(token, production);
        Ok(match lookup(BASE_URL_VAR) {
            Some(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url.trim()),
            _ => config,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}
