use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    error::{Result, UiError},
    registry::Registry,
    repl::Router,
    runtime::config::EditMode,
    state::Session,
    transport::{Exchange, HttpRequest, Transport},
    ui::{LineEditor, ReadOutcome},
};

#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
    reply: Exchange,
}

impl RecordingTransport {
    pub fn replying(reply: Exchange) -> Self {
        Self {
            requests: Arc::default(),
            reply,
        }
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &HttpRequest) -> Result<Exchange> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

#[derive(Default)]
pub struct EditorScript {
    pub lines: VecDeque<ReadOutcome>,
    /// `None` simulates Ctrl-C at the password prompt.
    pub secrets: VecDeque<Option<String>>,
    pub prompt: String,
    pub mode: EditMode,
    pub masked_prompts: Vec<String>,
}

#[derive(Clone, Default)]
pub struct ScriptedEditor(pub Arc<Mutex<EditorScript>>);

impl ScriptedEditor {
    pub fn with_lines(lines: &[&str]) -> Self {
        let e = Self::default();
        e.0.lock().unwrap().lines = lines
            .iter()
            .map(|l| ReadOutcome::Line(l.to_string()))
            .collect();
        e
    }

    pub fn push(&self, outcome: ReadOutcome) {
        self.0.lock().unwrap().lines.push_back(outcome);
    }

    pub fn push_secret(&self, secret: Option<&str>) {
        self.0
            .lock()
            .unwrap()
            .secrets
            .push_back(secret.map(str::to_string));
    }

    pub fn prompt(&self) -> String {
        self.0.lock().unwrap().prompt.clone()
    }

    pub fn remaining(&self) -> usize {
        self.0.lock().unwrap().lines.len()
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .lines
            .pop_front()
            .unwrap_or(ReadOutcome::Eof))
    }

    fn set_prompt(&mut self, text: &str) {
        self.0.lock().unwrap().prompt = text.to_string();
    }

    fn edit_mode(&self) -> EditMode {
        self.0.lock().unwrap().mode
    }

    fn set_edit_mode(&mut self, mode: EditMode) {
        self.0.lock().unwrap().mode = mode;
    }

    fn read_masked_line(&mut self, prompt: &str) -> Result<String> {
        let mut script = self.0.lock().unwrap();
        script.masked_prompts.push(prompt.to_string());
        match script.secrets.pop_front().flatten() {
            Some(secret) => Ok(secret),
            None => Err(UiError::Interrupted.into()),
        }
    }
}

pub struct Harness {
    pub router: Router,
    pub transport: RecordingTransport,
    pub editor: ScriptedEditor,
    pub out: SharedBuf,
}

pub fn harness(lines: &[&str]) -> Harness {
    let transport = RecordingTransport::replying(Exchange {
        status: Some(0),
        body: b"{\"ok\":true}\n".to_vec(),
        error: None,
    });
    harness_with(lines, transport)
}

pub fn harness_with(lines: &[&str], transport: RecordingTransport) -> Harness {
    let editor = ScriptedEditor::with_lines(lines);
    let out = SharedBuf::default();
    let router = Router::new(
        Registry::with_builtins(),
        Session::default(),
        Box::new(transport.clone()),
        Box::new(editor.clone()),
    )
    .with_output(Box::new(out.clone()));
    Harness {
        router,
        transport,
        editor,
        out,
    }
}
