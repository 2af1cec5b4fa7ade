use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    #[error("unknown log level: {0}")]
    LogLevel(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("log file path has no parent directory: {0:?}")]
    LogPath(PathBuf),

    #[error("logging already initialised: {0}")]
    Logging(String),
}
