use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};
#[cfg(feature = "ui-verbose")]
use tracing::debug;

use crate::{registry::Registry, runtime::ReplSettings};

#[derive(Clone)]
pub struct ShellHighlighter {
    registry: Registry,
    color_command: Color,
    color_unknown: Color,
}

impl ShellHighlighter {
    pub fn new(registry: Registry, settings: &ReplSettings) -> Self {
        Self {
            registry,
            color_command: settings.color_command,
            color_unknown: settings.color_unknown,
        }
    }
}

impl Highlighter for ShellHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let (word, rest) = match line.find(' ') {
            Some(idx) => line.split_at(idx),
            None => (line, ""),
        };

        let mut out = StyledText { buffer: Vec::new() };
        if word.is_empty() {
            out.push((Style::new(), line.to_string()));
            return out;
        }

        let color = if self.registry.has_command(word) {
            self.color_command
        } else {
            self.color_unknown
        };
        #[cfg(feature = "ui-verbose")]
        debug!(word = word, known = color == self.color_command, "shell_highlight");

        out.push((Style::new().fg(color), word.to_string()));
        if !rest.is_empty() {
            out.push((Style::new(), rest.to_string()));
        }
        out
    }
}
