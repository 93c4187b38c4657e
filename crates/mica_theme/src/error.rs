//! Theme error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// A token in the light set has no dark counterpart
    #[error("token '{0}' is defined for the light scheme but not the dark scheme")]
    MissingDarkToken(String),

    /// A token in the dark set has no light counterpart
    #[error("token '{0}' is defined for the dark scheme but not the light scheme")]
    MissingLightToken(String),

    #[error("failed to read theme preferences from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write theme preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme preferences: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize theme preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No per-user configuration directory on this system
    #[error("no configuration directory available")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ThemeError>;
