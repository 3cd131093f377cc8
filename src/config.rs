use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Fixed bound on every external request; a timed-out call is treated as a
/// failed call, there is no retry layer.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    // DeepL
    pub deepl_api_key: String,
    pub deepl_api_url: String,

    // Azure OpenAI
    pub azure_openai_endpoint: String,
    pub azure_openai_api_key: String,
    pub azure_api_version: String,
    pub azure_deployment: String,

    // Translation preferences
    pub default_formality: String,
    pub model_type: String,

    // Input/output root
    pub working_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // DeepL - placeholder defaults so a missing key fails at the
            // connectivity check with a clear service error, not at startup
            deepl_api_key: std::env::var("DEEPL_API_KEY")
                .unwrap_or_else(|_| "YOUR_DEEPL_API_KEY".to_string()),
            deepl_api_url: std::env::var("DEEPL_API_URL")
                .unwrap_or_else(|_| "https://api.deepl.com".to_string()),

            // Azure OpenAI
            azure_openai_endpoint: std::env::var("AZURE_OPENAI_ENDPOINT")
                .unwrap_or_else(|_| "YOUR_AZURE_OPEN_AI_ENDPOINT_LINK".to_string()),
            azure_openai_api_key: std::env::var("AZURE_OPENAI_API_KEY")
                .unwrap_or_else(|_| "YOUR_AZURE_OPEN_AI_KEY".to_string()),
            azure_api_version: "2024-08-01-preview".to_string(),
            azure_deployment: "gpt-4o".to_string(),

            // Translation preferences
            default_formality: "more".to_string(),
            model_type: "prefer_quality_optimized".to_string(),

            working_dir: std::env::current_dir().context("Failed to resolve working directory")?,
        })
    }

    /// Chat-completions URL for the configured Azure deployment
    pub fn chat_endpoint(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.azure_openai_endpoint, self.azure_deployment, self.azure_api_version
        )
    }
}

/// Shared HTTP client with the fixed request timeout applied
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}
