//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid color {value:?} for {field}")]
    InvalidColor { field: String, value: String },

    #[error("invalid modifier {value:?} for {field}")]
    InvalidModifier { field: String, value: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
