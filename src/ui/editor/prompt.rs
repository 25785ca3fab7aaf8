use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptViMode};

use crate::runtime::{ReplSettings, config::EditMode};

const ANSI_RESET: &str = "\x1b[0m";

#[derive(Clone)]
pub struct ShellPrompt {
    text: String,
    color: Color,
    mode: EditMode,
}

impl ShellPrompt {
    pub fn new(settings: &ReplSettings) -> Self {
        Self {
            text: settings.prompt.clone(),
            color: settings.color_prompt,
            mode: settings.edit_mode,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let painted = Style::new().fg(self.color).paint(self.text.as_str());
        Cow::Owned(format!("{ANSI_RESET}{painted}"))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, mode: PromptEditMode) -> Cow<'_, str> {
        match (self.mode, mode) {
            (EditMode::Vi, PromptEditMode::Vi(PromptViMode::Normal)) => Cow::Borrowed("(n) "),
            _ => Cow::Borrowed(""),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}
