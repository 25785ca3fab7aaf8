use std::{error::Error, io::Write};

use tracing::debug;

use crate::error::{Result, UiError};

pub mod editor;

pub use editor::{LineEditor, ReadOutcome, ReedlineEditor};

pub fn ui_println(out: &mut dyn Write, msg: &str) -> Result<()> {
    debug!(len = msg.len(), "ui_println start");
    out.write_all(msg.as_bytes()).map_err(UiError::IoWrite)?;
    out.write_all(b"\n").map_err(UiError::IoWrite)?;
    out.flush().map_err(UiError::IoWrite)?;
    Ok(())
}

// Writes raw bytes, replacing any trailing newlines with exactly one.
pub fn ui_println_bytes(out: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    debug!(len = bytes.len(), "ui_println_bytes start");
    let end = bytes
        .iter()
        .rposition(|b| *b != b'\n')
        .map_or(0, |i| i + 1);
    out.write_all(&bytes[..end]).map_err(UiError::IoWrite)?;
    out.write_all(b"\n").map_err(UiError::IoWrite)?;
    out.flush().map_err(UiError::IoWrite)?;
    Ok(())
}

pub fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        msg.push_str(": ");
        msg.push_str(&e.to_string());
        cur = e.source();
    }
    msg
}
