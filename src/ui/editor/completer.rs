use std::{fs, path::PathBuf};

use reedline::{Completer, Span, Suggestion};
#[cfg(feature = "ui-verbose")]
use tracing::debug;

use crate::{
    registry::{Completion, Source},
    state::Session,
};

pub struct ShellCompleter {
    tree: Vec<Completion>,
    session: Session,
    files_dir: PathBuf,
}

impl ShellCompleter {
    pub fn new(tree: Vec<Completion>, session: Session) -> Self {
        Self {
            tree,
            session,
            files_dir: PathBuf::from("."),
        }
    }

    pub fn with_files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.files_dir = dir.into();
        self
    }

    fn dynamic(&self, source: Source) -> Vec<String> {
        match source {
            Source::HeaderNames => self.session.header_names(),
            Source::BodyFiles => {
                let mut names: Vec<String> = fs::read_dir(&self.files_dir)
                    .map(|rd| {
                        rd.filter_map(|e| e.ok())
                            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                            .map(|e| format!("@{}", e.file_name().to_string_lossy()))
                            .collect()
                    })
                    .unwrap_or_default();
                names.sort();
                names
            }
        }
    }
}

fn descend(
    level: &[Completion],
    word: &str,
    dynamic: &dyn Fn(Source) -> Vec<String>,
) -> Option<Vec<Completion>> {
    for node in level {
        if let Completion::Word(name, children) = node
            && name == word
        {
            return Some(children.clone());
        }
    }
    for node in level {
        if let Completion::Dynamic(source) = node
            && dynamic(*source).iter().any(|v| v == word)
        {
            return Some(Vec::new());
        }
    }
    level.iter().find_map(|node| match node {
        Completion::Any(children) => Some(children.clone()),
        _ => None,
    })
}

pub fn suggest(
    tree: &[Completion],
    line: &str,
    dynamic: &dyn Fn(Source) -> Vec<String>,
) -> (usize, Vec<String>) {
    let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);
    let (done, partial) = line.split_at(start);

    let mut level = tree.to_vec();
    for word in done.split(' ').filter(|w| !w.is_empty()) {
        match descend(&level, word, dynamic) {
            Some(next) => level = next,
            None => return (start, Vec::new()),
        }
    }

    let mut out: Vec<String> = Vec::new();
    for node in &level {
        match node {
            Completion::Word(name, _) => out.push(name.clone()),
            Completion::Dynamic(source) => out.extend(dynamic(*source)),
            Completion::Any(_) => {}
        }
    }
    out.retain(|c| c.starts_with(partial));
    out.dedup();
    (start, out)
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let head = line.get(..pos).unwrap_or(line);
        let (start, words) = suggest(&self.tree, head, &|s| self.dynamic(s));
        #[cfg(feature = "ui-verbose")]
        debug!(pos, count = words.len(), "shell_complete");
        words
            .into_iter()
            .map(|value| Suggestion {
                value,
                span: Span::new(start, pos),
                append_whitespace: true,
                ..Suggestion::default()
            })
            .collect()
    }
}
