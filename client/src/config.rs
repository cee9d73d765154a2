use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const BACKEND_URL_VAR: &str = "PDF_QA_BACKEND_URL";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend url must start with http:// or https://, got `{0}`")]
    InvalidBackendUrl(String),
}

/// Process-wide settings, fixed once the client starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url =
            env::var(BACKEND_URL_VAR).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::with_backend_url(&backend_url)
    }

    pub fn with_backend_url(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(url.to_string()));
        }

        Ok(Self {
            backend_url: url.trim_end_matches('/').to_string(),
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload/", self.backend_url)
    }

    pub fn query_url(&self) -> String {
        format!("{}/query/", self.backend_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}
