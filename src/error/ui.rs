use std::io::Error as IoError;

use anyhow::Error as AnyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("stdin read failed")]
    IoRead(#[source] IoError),

    #[error("stdout write failed")]
    IoWrite(#[source] IoError),

    #[error("failed to enable raw mode")]
    RawModeEnable(#[source] AnyError),

    #[error("terminal event read failed")]
    EventRead(#[source] IoError),

    #[error("failed to open history file at {path}")]
    HistoryOpen {
        path: String,
        #[source]
        source: AnyError,
    },

    #[error("input interrupted")]
    Interrupted,

    #[error("end of input")]
    EndOfInput,
}
