use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Required column(s) not found: {0}")]
    MissingColumns(String),

    #[error("Roster store rejected the batch: {message}")]
    Store { message: String },

    #[error("A submission for this roster is already in flight")]
    SubmissionInFlight,
}

pub type Result<T> = std::result::Result<T, ImportError>;
