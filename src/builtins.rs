use async_trait::async_trait;

use crate::{
    error::Result,
    runtime::config::EditMode,
    state::Session,
    transport::{Exchange, HttpRequest},
};

pub mod base_url;
pub mod format;
pub mod header;
pub mod help;
pub mod http;
pub mod login;
pub mod mode;
pub mod prompt;
pub mod quit;
pub mod sleep;
pub mod status;

pub use format::format_header_line;

#[async_trait(?Send)]
pub trait BuiltinContext {
    fn session(&self) -> &Session;

    async fn send(&self, request: &HttpRequest) -> Result<Exchange>;
    fn describe(&self, request: &HttpRequest) -> String;

    fn emit(&mut self, line: &str) -> Result<()>;
    fn emit_bytes(&mut self, bytes: &[u8]) -> Result<()>;
    fn help_text(&self) -> String;

    fn edit_mode(&self) -> EditMode;
    fn set_edit_mode(&mut self, mode: EditMode);
    fn set_prompt(&mut self, text: &str);
    fn read_masked_line(&mut self, prompt: &str) -> Result<String>;
}
