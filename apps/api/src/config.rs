use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub gemini_api_key: String,
    pub google_api_key: String,
    pub google_search_engine_id: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            google_api_key: require_env("GOOGLE_API_KEY")?,
            google_search_engine_id: require_env("GOOGLE_SEARCH_ENGINE_ID")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_names_the_key() {
        let err = require_env("CVMATCH_TEST_SURELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("CVMATCH_TEST_SURELY_UNSET"));
    }
}
