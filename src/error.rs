use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid request body: {0}")]
    InvalidField(String),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("OpenAI API key not configured")]
    MissingApiKey,
    /// Non-success status from the provider. `body` is the raw payload, kept for logs only.
    #[error("OpenAI API returned status {status}")]
    Upstream {
        status: u16,
        message: Option<String>,
        body: String,
    },
    #[error("OpenAI request failed: {0}")]
    Transport(String),
    #[error("OpenAI response could not be parsed: {0}")]
    UpstreamParse(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures the caller caused and can fix by resubmitting.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MethodNotAllowed | Self::MissingFields | Self::InvalidField(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
