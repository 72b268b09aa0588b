// crates/homevalue-core/src/error.rs

use std::path::PathBuf;

use homevalue_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration TOML is malformed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to read input file {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {path} is not a valid county export: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    #[error("Failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Boundary file is not valid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Boundary file must be a GeoJSON FeatureCollection")]
    NotFeatureCollection,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
