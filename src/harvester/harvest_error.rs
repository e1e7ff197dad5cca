use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {0}: {1}")]
    Status(u16, String),
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("Portal unreachable: {0}")]
    Unreachable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Spreadsheet error: {0}")]
    Xlsx(String),
}

impl From<std::io::Error> for HarvestError {
    fn from(e: std::io::Error) -> Self {
        HarvestError::Io(e.to_string())
    }
}

impl From<csv::Error> for HarvestError {
    fn from(e: csv::Error) -> Self {
        HarvestError::Csv(e.to_string())
    }
}
