//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// URL prefix for form routes (default: "forms").
    pub route_prefix: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Provided form aliases to enable (from ENABLED_FORMS env var).
    /// Empty means every provided form is registered.
    pub enabled_forms: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let route_prefix = env::var("FORMS_ROUTE_PREFIX")
            .unwrap_or_else(|_| "forms".to_string())
            .trim_matches('/')
            .to_string();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let enabled_forms = env::var("ENABLED_FORMS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            route_prefix,
            cors_allowed_origins,
            enabled_forms,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            route_prefix: "forms".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            enabled_forms: Vec::new(),
        }
    }
}
