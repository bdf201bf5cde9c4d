use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrightError {
    /// A draft failed a local validation rule. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status; the message is the
    /// `message` field of the error body, verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid region '{0}', expected one of: all, north, east, west")]
    InvalidRegion(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BrightError>;
