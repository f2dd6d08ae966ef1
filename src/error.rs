use std::path::PathBuf;
use thiserror::Error;

/// Exit status for configuration problems detected before any scan.
pub const EXIT_CONFIG: i32 = 2;

/// Core library errors
#[derive(Error, Debug)]
pub enum RemoverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not auto-detect the Fallout New Vegas install folder")]
    GameDirNotFound,

    #[error("--game does not look like a Fallout New Vegas folder: {0} (expected FalloutNV.exe)")]
    InvalidGameDir(PathBuf),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RemoverError {
    /// Process exit status this error should produce.
    pub fn exit_code(&self) -> i32 {
        match self {
            RemoverError::Config(_)
            | RemoverError::GameDirNotFound
            | RemoverError::InvalidGameDir(_) => EXIT_CONFIG,
            RemoverError::Io { .. } => 1,
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RemoverError>;
