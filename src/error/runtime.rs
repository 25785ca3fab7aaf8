use std::io::Error as IoError;

use toml::de::Error as TomlError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read config at {path}")]
    ConfigRead {
        path: String,
        #[source]
        source: IoError,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: String,
        #[source]
        source: TomlError,
    },

    #[error("failed to open log file at {path}")]
    LogFileOpen {
        path: String,
        #[source]
        source: IoError,
    },
}
