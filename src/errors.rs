// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors originating from the dashboard server
/// (routing, bad query strings) or from loading its data.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Could not load dashboard data: {0}")]
    Load(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Input contained no rows: {0}")]
    EmptyInput(String),
}

impl From<std::io::Error> for ClassifyError {
    fn from(e: std::io::Error) -> Self {
        ClassifyError::Io(e.to_string())
    }
}

impl From<csv::Error> for ClassifyError {
    fn from(e: csv::Error) -> Self {
        ClassifyError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(e: serde_json::Error) -> Self {
        ClassifyError::Json(e.to_string())
    }
}

/// Anything a subcommand can fail with, for reporting from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Harvest(#[from] crate::harvester::HarvestError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
