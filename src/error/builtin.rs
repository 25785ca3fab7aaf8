use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("invalid arguments: {detail}")]
    InvalidArgs { detail: String },

    #[error("user requested exit")]
    ExitRequested,
}
