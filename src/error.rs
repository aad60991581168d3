use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Chart rendering error: {0}")]
    Render(String),

    #[error("GitHub GraphQL request failed: {0}")]
    Transport(String),

    #[error("GitHub GraphQL response was not valid: {0}")]
    Format(String),

    #[error("GitHub GraphQL error: {0}")]
    Remote(String),

    #[error("GitHub user '{0}' was not found.")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RadarError>;
