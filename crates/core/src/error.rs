use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("Invalid date {input:?}: expected MM-DD")]
    InvalidDate { input: String },

    #[error("Invalid base URL {input:?}: {reason}")]
    InvalidBaseUrl { input: String, reason: String },

    #[error("Invalid {env_var} value {value:?}: expected a positive number of seconds")]
    InvalidRefreshInterval { env_var: String, value: String },
}

pub type Result<T> = std::result::Result<T, AlmanacError>;
