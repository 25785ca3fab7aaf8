use reedline::{
    ColumnarMenu, EditCommand, FileBackedHistory, MenuBuilder, Reedline, ReedlineMenu, Signal,
};
use tracing::{debug, info};

use crate::{
    error::{Result, UiError},
    registry::Registry,
    runtime::{ReplSettings, config::EditMode},
    state::Session,
};

pub mod completer;
pub mod highlighter;
pub mod keymap;
pub mod masked;
pub mod prompt;

pub use completer::ShellCompleter;
pub use highlighter::ShellHighlighter;
pub use prompt::ShellPrompt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    // Ctrl-C on an empty line.
    Interrupted,
    // Ctrl-C that discarded typed input.
    Cleared,
    Eof,
}

pub fn interrupt_outcome(buffer: &str) -> ReadOutcome {
    if buffer.is_empty() {
        ReadOutcome::Interrupted
    } else {
        ReadOutcome::Cleared
    }
}

pub trait LineEditor {
    fn read_line(&mut self) -> Result<ReadOutcome>;
    fn set_prompt(&mut self, text: &str);
    fn edit_mode(&self) -> EditMode;
    fn set_edit_mode(&mut self, mode: EditMode);
    fn read_masked_line(&mut self, prompt: &str) -> Result<String>;
}

pub struct ReedlineEditor {
    line: Reedline,
    prompt: ShellPrompt,
    mode: EditMode,
}

impl ReedlineEditor {
    pub fn new(settings: &ReplSettings, registry: &Registry, session: Session) -> Result<Self> {
        debug!(
            history = %settings.history_file.display(),
            mode = %settings.edit_mode,
            "reedline_editor_new start"
        );
        let history =
            FileBackedHistory::with_file(settings.history_size, settings.history_file.clone())
                .map_err(|e| UiError::HistoryOpen {
                    path: settings.history_file.display().to_string(),
                    source: anyhow::anyhow!("{e}"),
                })?;
        let completer = ShellCompleter::new(registry.completion_tree(), session);
        let highlighter = ShellHighlighter::new(registry.clone(), settings);
        let menu = ColumnarMenu::default().with_name(keymap::COMPLETION_MENU);

        let line = keymap::make_reedline(settings.edit_mode)
            .with_history(Box::new(history))
            .with_completer(Box::new(completer))
            .with_highlighter(Box::new(highlighter))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)));

        info!("reedline_editor_new ok");
        Ok(Self {
            line,
            prompt: ShellPrompt::new(settings),
            mode: settings.edit_mode,
        })
    }
}

impl LineEditor for ReedlineEditor {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        let signal = self.line.read_line(&self.prompt).map_err(UiError::IoRead)?;
        let outcome = match signal {
            Signal::Success(line) if line == keymap::INTERRUPT_SENTINEL => {
                let outcome = interrupt_outcome(self.line.current_buffer_contents());
                self.line.run_edit_commands(&[EditCommand::Clear]);
                outcome
            }
            Signal::Success(line) => ReadOutcome::Line(line),
            Signal::CtrlC => ReadOutcome::Interrupted,
            Signal::CtrlD => ReadOutcome::Eof,
        };
        debug!(outcome = ?outcome, "reedline_read_line ok");
        Ok(outcome)
    }

    fn set_prompt(&mut self, text: &str) {
        self.prompt.set_text(text);
    }

    fn edit_mode(&self) -> EditMode {
        self.mode
    }

    fn set_edit_mode(&mut self, mode: EditMode) {
        debug!(from = %self.mode, to = %mode, "reedline_set_edit_mode start");
        let line = std::mem::replace(&mut self.line, Reedline::create());
        self.line = line.with_edit_mode(keymap::edit_mode(mode));
        self.mode = mode;
        self.prompt.set_edit_mode(mode);
        info!(mode = %mode, "reedline_set_edit_mode ok");
    }

    fn read_masked_line(&mut self, prompt: &str) -> Result<String> {
        masked::read_masked_line(prompt)
    }
}
