use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("couldn't find a comment text column, the CSV needs a column named one of: {}", .accepted.join(", "))]
    MissingColumn { accepted: Vec<&'static str> },

    #[error("no CSV uploaded and dataset file {path} not found")]
    DatasetNotFound { path: String },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}
