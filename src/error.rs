// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or validate the source table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported dataset format {path:?} (expected .csv or .parquet)")]
    UnsupportedFormat { path: PathBuf },

    #[error("CSV parse error at record {record}: {source}")]
    Csv {
        record: usize,
        #[source]
        source: csv::Error,
    },

    #[error("parquet read error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("dataset has {found} columns, need at least {required}")]
    TooFewColumns { found: usize, required: usize },

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("dataset has no data rows")]
    Empty,
}

/// Failure while fitting the equity model.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error("not enough rows to train: {rows} rows leaves an empty training partition")]
    InsufficientRows { rows: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("brand {brand:?} has non-finite Equity2021 ({value})")]
    NonFiniteEquity { brand: String, value: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid year {0:?}: expected an integer")]
    InvalidYear(String),

    #[error("unknown output format {0:?} (expected table, json or yaml)")]
    UnknownFormat(String),
}
