use std::io::Error as IoError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: IoError,
    },
}
