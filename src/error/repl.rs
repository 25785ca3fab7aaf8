use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplRouterError {
    #[error("command not found: {line:?}")]
    CommandNotFound { line: String },
}

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Router(#[from] ReplRouterError),
}
