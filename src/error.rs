use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("column `{0}` not found")]
    MissingColumn(String),

    /// A cell that does not parse as a number. `line` is 1-based and counts the header.
    #[error("line {line}, column `{column}`: cannot parse `{value}` as a number")]
    ParseValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("batch size must be positive")]
    InvalidBatchSize,

    #[error("features ({features}) and targets ({targets}) differ in length")]
    LengthMismatch { features: usize, targets: usize },

    #[error("batched features {features:?} and targets {targets:?} do not pair up")]
    BatchShape {
        features: Vec<usize>,
        targets: Vec<usize>,
    },

    #[error("test size must lie strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),

    #[error("{batches} batch(es) cannot be split into {train} train and {test} test")]
    EmptySplit {
        batches: usize,
        train: usize,
        test: usize,
    },

    /// Reshapes are sized from the data they reshape, so this is not expected
    /// from valid input.
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("requested device `{0}` is not available")]
    DeviceUnavailable(String),
}
