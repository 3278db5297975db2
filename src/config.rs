use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The operator credential comes from the environment (never hardcoded)
/// and is handed explicitly to the API client constructor. The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Admin API base URL (defaults to http://localhost:4000/api).
    pub api_url: String,
    /// Bearer credential for the admin API. Required for every command.
    pub admin_token: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_url: env::var("CINDER_API_URL")
                .unwrap_or_else(|_| crate::api::client::DEFAULT_API_URL.to_string()),
            admin_token: env::var("CINDER_ADMIN_TOKEN").unwrap_or_default(),
        })
    }

    /// Check that the admin credential is configured.
    /// Call this before building the API client.
    pub fn require_token(&self) -> Result<()> {
        if self.admin_token.is_empty() {
            anyhow::bail!(
                "CINDER_ADMIN_TOKEN not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
