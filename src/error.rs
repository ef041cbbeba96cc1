use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading problems or starting a session.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Failed to open csv file: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse the provided CSV file")]
    Parse(#[from] csv::Error),

    #[error("Failed to parse the provided CSV file: line {line} has {fields} field(s), expected 2")]
    MalformedRow { line: u64, fields: usize },

    #[error("Failed to start input reader")]
    Input(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
