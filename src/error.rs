use thiserror::Error;

pub mod builtin;
pub mod repl;
pub mod runtime;
pub mod state;
pub mod transport;
pub mod ui;

pub use builtin::BuiltinError;
pub use repl::{ReplError, ReplRouterError};
pub use runtime::RuntimeError;
pub use state::StateError;
pub use transport::TransportError;
pub use ui::UiError;

#[derive(Debug, Error)]
pub enum CurlShellError {
    #[error(transparent)]
    Builtin(#[from] BuiltinError),

    #[error(transparent)]
    Repl(#[from] ReplError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Ui(#[from] UiError),
}

pub type Result<T> = std::result::Result<T, CurlShellError>;

impl From<ReplRouterError> for CurlShellError {
    fn from(e: ReplRouterError) -> Self {
        CurlShellError::Repl(ReplError::from(e))
    }
}

impl CurlShellError {
    pub fn is_exit_request(&self) -> bool {
        matches!(self, CurlShellError::Builtin(BuiltinError::ExitRequested))
    }
}
