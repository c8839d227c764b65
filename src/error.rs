use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("source file unavailable: {0}")]
    SourceUnavailable(String),

    #[error("delimited input parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("can't map [{value}] in field {field} to a score")]
    InvalidInput { field: String, value: String },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("degenerate dataset: {0}")]
    DegenerateDataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
