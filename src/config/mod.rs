//! Configuration for the remote endpoint.

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Endpoint configuration: credential and base URL.
///
/// Resolution order: explicit setters beat environment variables. A missing
/// credential is surfaced as a configuration error when the endpoint is
/// constructed, before any turn starts.
#[derive(Debug, Clone)]
pub struct ParleyConfig {
    api_key: Option<String>,
    base_url: String,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ParleyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `OPENAI_API_KEY` and `OPENAI_BASE_URL`, reading a `.env`
    /// file if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore a missing .env
        let mut config = Self::new();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
