// Admin API client — authenticated JSON over HTTP.
//
// A thin reqwest wrapper with generic GET/PATCH helpers. Every call carries
// the operator's bearer credential, which is passed in explicitly at
// construction — there is no ambient credential lookup anywhere in the
// crate. Application errors (non-2xx with a message payload) surface the
// server's message verbatim; transport errors fall back to a generic
// per-operation message.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Default admin API endpoint for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// Authenticated HTTP client for the platform's admin REST surface.
pub struct AdminApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl AdminApiClient {
    /// Create a new admin client for the given base URL and bearer token.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("cinder/0.1 (moderation-console)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Make a GET request to an admin endpoint and deserialize the response.
    ///
    /// `what` is the generic failure message for this operation (e.g.
    /// "Failed to fetch reports") — used when the server doesn't supply its
    /// own message.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        debug!(path = path, "GET request");

        let mut request = self.client.get(&url).bearer_auth(&self.token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.with_context(|| what.to_string())?;
        let response = Self::check(response, what).await?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("{what}: could not decode response"))
    }

    /// Make a PATCH request with no body and no expected response payload.
    /// All terminal moderation actions go through here.
    pub async fn patch_unit(&self, path: &str, what: &str) -> Result<()> {
        let url = format!("{}/{}", self.base_url, path);

        debug!(path = path, "PATCH request");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| what.to_string())?;

        Self::check(response, what).await?;
        Ok(())
    }

    /// Turn a non-2xx response into an error. Prefers the server-provided
    /// `message` payload; falls back to the generic operation message with
    /// the status attached.
    async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) if !err.message.is_empty() => anyhow::bail!("{}", err.message),
            _ => anyhow::bail!("{what} ({status})"),
        }
    }
}

/// Application error payload shape: `{"message": "..."}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}
