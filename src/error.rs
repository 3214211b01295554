#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Unknown column type `{0}` (expected num, string, date, boolean or binary)")]
    UnknownColumnType(String),

    #[error("Unknown canonicalization mode `{0}` (expected generic or typed)")]
    InvalidMode(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
