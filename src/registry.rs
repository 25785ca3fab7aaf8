use tracing::{debug, info, warn};

use crate::transport::Method;

const HELP_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Http(Method),
    Header,
    BaseUrl,
    Status,
    Help,
    Quit,
    Mode,
    SetPrompt,
    Login,
    Sleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact,
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    HeaderNames,
    BodyFiles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Word(String, Vec<Completion>),
    Any(Vec<Completion>),
    Dynamic(Source),
}

impl Completion {
    pub fn word(name: &str) -> Self {
        Completion::Word(name.to_string(), Vec::new())
    }
}

#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub matcher: Matcher,
    pub entry: Entry,
    pub args: Vec<Completion>,
}

impl Command {
    pub fn exact(name: &str, entry: Entry) -> Self {
        Self {
            name: name.to_string(),
            matcher: Matcher::Exact,
            entry,
            args: Vec::new(),
        }
    }

    pub fn prefix(name: &str, entry: Entry) -> Self {
        Self {
            matcher: Matcher::Prefix,
            ..Self::exact(name, entry)
        }
    }

    pub fn with_args(mut self, args: Vec<Completion>) -> Self {
        self.args = args;
        self
    }

    fn matches(&self, line: &str, command: &str) -> bool {
        match self.matcher {
            Matcher::Exact => command == self.name,
            Matcher::Prefix => line.starts_with(&self.name),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        debug!("registry_with_builtins start");
        let body = || vec![Completion::Any(vec![Completion::Dynamic(Source::BodyFiles)])];
        let mut r = Self::new();
        r.register(Command::exact("get", Entry::Http(Method::Get)));
        r.register(Command::exact("post", Entry::Http(Method::Post)).with_args(body()));
        r.register(Command::exact("put", Entry::Http(Method::Put)).with_args(body()));
        r.register(Command::exact("delete", Entry::Http(Method::Delete)));
        r.register(
            Command::exact("header", Entry::Header)
                .with_args(vec![Completion::Dynamic(Source::HeaderNames)]),
        );
        r.register(Command::exact("base-url", Entry::BaseUrl));
        r.register(Command::exact("status", Entry::Status));
        r.register(Command::exact("help", Entry::Help));
        r.register(Command::exact("bye", Entry::Quit));
        r.register(Command::exact("exit", Entry::Quit));
        r.register(
            Command::prefix("mode", Entry::Mode)
                .with_args(vec![Completion::word("vi"), Completion::word("emacs")]),
        );
        r.register(Command::prefix("setprompt", Entry::SetPrompt));
        r.register(Command::exact("login", Entry::Login));
        r.register(Command::exact("sleep", Entry::Sleep));
        info!(count = r.commands.len(), "registry_with_builtins ok");
        r
    }

    pub fn register(&mut self, command: Command) {
        debug!(name = %command.name, matcher = ?command.matcher, "register start");
        if self.has_command(&command.name) {
            warn!(name = %command.name, "register duplicate");
        }
        self.commands.push(command);
        info!(count = self.commands.len(), "register ok");
    }

    pub fn resolve(&self, line: &str, command: &str) -> Option<Entry> {
        debug!(command = command, "resolve start");
        let r = self
            .commands
            .iter()
            .find(|c| c.matches(line, command))
            .map(|c| c.entry);
        info!(command = command, found = r.is_some(), "resolve ok");
        r
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut v: Vec<String> = Vec::new();
        for c in &self.commands {
            if !v.contains(&c.name) {
                v.push(c.name.clone());
            }
        }
        v
    }

    pub fn completion_tree(&self) -> Vec<Completion> {
        self.names()
            .into_iter()
            .filter_map(|name| {
                self.commands
                    .iter()
                    .find(|c| c.name == name)
                    .map(|c| Completion::Word(name, c.args.clone()))
            })
            .collect()
    }

    pub fn help_text(&self) -> String {
        let mut out = String::from("commands:\n");
        render_tree(&self.completion_tree(), HELP_INDENT, &mut out);
        out
    }
}

fn render_tree(nodes: &[Completion], indent: &str, out: &mut String) {
    for node in nodes {
        if let Completion::Word(name, children) = node {
            out.push_str(indent);
            out.push_str(name);
            out.push('\n');
            render_tree(children, &format!("{indent}{HELP_INDENT}"), out);
        }
    }
}
