use std::io::{Write, stdout};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use tracing::{debug, error, info};

use crate::error::{Result, UiError};

const MASK: &[u8] = b"*";
const ERASE: &[u8] = b"\x08 \x08";
const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskStep {
    Ignore,
    Echo,
    Erase,
    Submit,
    Interrupt,
    Eof,
}

#[derive(Default)]
pub struct MaskedBuffer {
    buf: String,
}

impl MaskedBuffer {
    pub fn apply(&mut self, code: KeyCode, mods: KeyModifiers) -> MaskStep {
        match code {
            KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => MaskStep::Interrupt,
            KeyCode::Char('d') if mods.contains(KeyModifiers::CONTROL) => {
                if self.buf.is_empty() {
                    MaskStep::Eof
                } else {
                    MaskStep::Ignore
                }
            }
            KeyCode::Char(_) if mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                MaskStep::Ignore
            }
            KeyCode::Char(ch) => {
                self.buf.push(ch);
                MaskStep::Echo
            }
            KeyCode::Backspace => match self.buf.pop() {
                Some(_) => MaskStep::Erase,
                None => MaskStep::Ignore,
            },
            KeyCode::Enter => MaskStep::Submit,
            _ => MaskStep::Ignore,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_secret(self) -> String {
        self.buf
    }
}

fn read_keys(out: &mut impl Write) -> Result<String> {
    let mut masked = MaskedBuffer::default();
    loop {
        match event::read().map_err(UiError::EventRead)? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                if kind == KeyEventKind::Release {
                    continue;
                }
                match masked.apply(code, modifiers) {
                    MaskStep::Echo => out.write_all(MASK).map_err(UiError::IoWrite)?,
                    MaskStep::Erase => out.write_all(ERASE).map_err(UiError::IoWrite)?,
                    MaskStep::Submit => {
                        info!(len = masked.len(), "masked_read submitted");
                        return Ok(masked.into_secret());
                    }
                    MaskStep::Interrupt => return Err(UiError::Interrupted.into()),
                    MaskStep::Eof => return Err(UiError::EndOfInput.into()),
                    MaskStep::Ignore => {}
                }
                out.flush().map_err(UiError::IoWrite)?;
            }
            _ => debug!("ignored non-key event"),
        }
    }
}

pub fn read_masked_line(prompt: &str) -> Result<String> {
    debug!("read_masked_line start");
    let mut out = stdout();
    out.write_all(prompt.as_bytes()).map_err(UiError::IoWrite)?;
    out.flush().map_err(UiError::IoWrite)?;

    terminal::enable_raw_mode().map_err(|e| UiError::RawModeEnable(e.into()))?;
    let result = read_keys(&mut out);
    match terminal::disable_raw_mode() {
        Ok(_) => debug!("raw mode disabled"),
        Err(e) => error!(?e, "raw mode disable failed"),
    }

    out.write_all(CRLF).map_err(UiError::IoWrite)?;
    out.flush().map_err(UiError::IoWrite)?;
    result
}
