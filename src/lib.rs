pub mod builtins;
pub mod error;
pub mod registry;
pub mod repl;
pub mod runtime;
pub mod state;
pub mod transport;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{CurlShellError, Result};
