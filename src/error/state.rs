use std::io::Error as IoError;

use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file at {path}")]
    Read {
        path: String,
        #[source]
        source: IoError,
    },

    #[error("failed to parse state file at {path}")]
    Parse {
        path: String,
        #[source]
        source: JsonError,
    },

    #[error("failed to encode session state")]
    Encode(#[source] JsonError),

    #[error("failed to write state file at {path}")]
    Write {
        path: String,
        #[source]
        source: IoError,
    },
}
