pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::{AppParts, Overrides, bootstrap};
pub use config::ReplSettings;
