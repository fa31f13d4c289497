//! Environment-sourced configuration, resolved once per invocation.

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
    pub timeouts: Timeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` is not fatal here; the handler reports it only after request validation.
    /// Only an empty value counts as unset; whitespace is passed through.
    pub api_key: Option<String>,
    pub openai: OpenAiSettings,
}

impl AppConfig {
    /// Read configuration from process environment.
    ///
    /// - `OPENAI_API_KEY`: bearer credential (required for analysis)
    /// - `OPENAI_BASE_URL`: default `https://api.openai.com/v1`
    /// - `OPENAI_MODEL`: default `gpt-4o-mini`
    /// - `OPENAI_TIMEOUT_SECS`: default 60
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let api_key = var("OPENAI_API_KEY");
        let base_url = var("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        let request_secs = var("OPENAI_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_key,
            openai: OpenAiSettings {
                base_url,
                model,
                timeouts: Timeouts { request_secs, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS },
            },
        }
    }
}
