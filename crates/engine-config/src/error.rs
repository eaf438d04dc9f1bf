use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize run report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write run report: {0}")]
    Write(#[from] std::io::Error),
}
