use std::io::{Write, stdout};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{
    builtins::{self, BuiltinContext},
    error::{CurlShellError, ReplRouterError, Result},
    registry::{Entry, Registry},
    repl::parser,
    runtime::config::EditMode,
    state::{Session, StateStore},
    transport::{Exchange, HttpRequest, Transport},
    ui::{LineEditor, ReadOutcome, error_chain, ui_println, ui_println_bytes},
};

pub struct Router {
    registry: Registry,
    session: Session,
    transport: Box<dyn Transport>,
    editor: Box<dyn LineEditor>,
    store: Option<StateStore>,
    out: Box<dyn Write>,
}

impl Router {
    pub fn new(
        registry: Registry,
        session: Session,
        transport: Box<dyn Transport>,
        editor: Box<dyn LineEditor>,
    ) -> Self {
        debug!("router_new start");
        let s = Self {
            registry,
            session,
            transport,
            editor,
            store: None,
            out: Box::new(stdout()),
        };
        info!("router_new ok");
        s
    }

    pub fn with_store(mut self, store: StateStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn read_line(&mut self) -> Result<ReadOutcome> {
        self.editor.read_line()
    }

    pub async fn exec(&mut self, input: &str) -> Result<()> {
        let line = input.trim();
        debug!(input = line, "router_exec start");
        let parsed = parser::parse(line);
        if parsed.is_empty() {
            debug!("router_exec empty");
            return Ok(());
        }

        let Some(entry) = self.registry.resolve(line, &parsed.command) else {
            warn!(line = line, "router_exec command not found");
            return Err(ReplRouterError::CommandNotFound {
                line: line.to_string(),
            }
            .into());
        };

        match entry {
            Entry::Http(method) => {
                builtins::http::handle(self, method, &parsed.arg1, &parsed.arg2).await?
            }
            Entry::Header => builtins::header::handle(self, &parsed.arg1, &parsed.arg2)?,
            Entry::BaseUrl => builtins::base_url::handle(self, &parsed.arg1)?,
            Entry::Status => builtins::status::handle(self)?,
            Entry::Help => builtins::help::handle(self)?,
            Entry::Quit => builtins::quit::handle(self)?,
            Entry::Mode => builtins::mode::handle(self, line)?,
            Entry::SetPrompt => builtins::prompt::handle(self, line)?,
            Entry::Login => builtins::login::handle(self, &parsed.arg1)?,
            Entry::Sleep => builtins::sleep::handle(self, &parsed.arg1).await?,
        }
        info!(entry = ?entry, "router_exec ok");
        Ok(())
    }

    pub fn report(&mut self, err: &CurlShellError) -> Result<()> {
        let msg = match err {
            CurlShellError::Repl(_) => err.to_string(),
            _ => format!("error: {}", error_chain(err)),
        };
        ui_println(self.out.as_mut(), &msg)
    }

    pub fn notice(&mut self, msg: &str) -> Result<()> {
        ui_println(self.out.as_mut(), msg)
    }

    pub fn persist(&mut self) -> Result<()> {
        let Some(store) = self.store.as_ref() else {
            debug!("router_persist disabled");
            return Ok(());
        };
        let json = store.save(&self.session.snapshot())?;
        let path = store.path().display().to_string();
        ui_println(self.out.as_mut(), &format!("save to {path}"))?;
        ui_println(self.out.as_mut(), &json)?;
        info!(path = %path, "router_persist ok");
        Ok(())
    }
}

#[async_trait(?Send)]
impl BuiltinContext for Router {
    fn session(&self) -> &Session {
        &self.session
    }

    async fn send(&self, request: &HttpRequest) -> Result<Exchange> {
        self.transport.send(request).await
    }

    fn describe(&self, request: &HttpRequest) -> String {
        self.transport.describe(request)
    }

    fn emit(&mut self, line: &str) -> Result<()> {
        ui_println(self.out.as_mut(), line)
    }

    fn emit_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        ui_println_bytes(self.out.as_mut(), bytes)
    }

    fn help_text(&self) -> String {
        self.registry.help_text()
    }

    fn edit_mode(&self) -> EditMode {
        self.editor.edit_mode()
    }

    fn set_edit_mode(&mut self, mode: EditMode) {
        self.editor.set_edit_mode(mode);
    }

    fn set_prompt(&mut self, text: &str) {
        debug!(len = text.len(), "router_set_prompt");
        self.editor.set_prompt(text);
    }

    fn read_masked_line(&mut self, prompt: &str) -> Result<String> {
        self.editor.read_masked_line(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{BuiltinError, UiError},
        testing::{RecordingTransport, harness, harness_with},
        transport::Method,
    };

    #[tokio::test]
    async fn get_uses_base_url_concatenation() {
        let mut h = harness(&[]);
        h.router.exec("base-url http://localhost:8080").await.unwrap();
        h.router.exec("get /items").await.unwrap();

        let sent = h.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].url, "http://localhost:8080/items");
        assert_eq!(sent[0].body, "");
        assert_eq!(
            h.out.lines(),
            vec!["GET http://localhost:8080/items", "{\"ok\":true}"]
        );
    }

    #[tokio::test]
    async fn post_forwards_body_and_headers() {
        let mut h = harness(&[]);
        h.router.exec("header X-Trace abc").await.unwrap();
        h.router
            .exec(r#"post /foo '{"foo":"bar"}'"#)
            .await
            .unwrap();

        let sent = h.transport.sent();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "/foo");
        assert_eq!(sent[0].body, r#"'{"foo":"bar"}'"#);
        assert_eq!(sent[0].headers.get("X-Trace").map(String::as_str), Some("abc"));
    }

    #[tokio::test]
    async fn put_and_delete_map_to_methods() {
        let mut h = harness(&[]);
        h.router.exec("put /a {}").await.unwrap();
        h.router.exec("delete /a").await.unwrap();
        let methods: Vec<Method> = h.transport.sent().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Put, Method::Delete]);
    }

    #[tokio::test]
    async fn transport_error_text_is_printed_and_shell_continues() {
        let transport = RecordingTransport::replying(Exchange {
            status: Some(7),
            body: Vec::new(),
            error: Some("exit status 7: connection refused".into()),
        });
        let mut h = harness_with(&[], transport);
        h.router.exec("get /down").await.unwrap();
        assert_eq!(
            h.out.lines(),
            vec!["GET /down", "exit status 7: connection refused"]
        );
    }

    #[tokio::test]
    async fn binary_response_is_echoed_unchanged() {
        let transport = RecordingTransport::replying(Exchange {
            status: Some(0),
            body: vec![0xff, 0xfe, b'P', b'N', b'G', b'\n'],
            error: None,
        });
        let mut h = harness_with(&[], transport);
        h.router.exec("get /logo.png").await.unwrap();
        assert_eq!(h.out.bytes(), b"GET /logo.png\n\xff\xfePNG\n");
    }

    #[tokio::test]
    async fn header_set_then_get_round_trips() {
        let mut h = harness(&[]);
        h.router.exec("header Accept text/plain").await.unwrap();
        h.router.exec("header Accept application/json").await.unwrap();
        h.router.exec("header Accept").await.unwrap();
        assert_eq!(h.router.session().header("Accept"), "application/json");
        assert_eq!(h.out.lines(), vec!["application/json"]);
    }

    #[tokio::test]
    async fn absent_header_prints_empty_line() {
        let mut h = harness(&[]);
        h.router.exec("header Missing").await.unwrap();
        assert_eq!(h.out.contents(), "\n");
    }

    #[tokio::test]
    async fn bare_header_lists_all() {
        let mut h = harness(&[]);
        h.router.exec("header B 2").await.unwrap();
        h.router.exec("header A 1").await.unwrap();
        h.router.exec("header").await.unwrap();
        assert_eq!(h.out.lines(), vec!["A => 1", "B => 2"]);
    }

    #[tokio::test]
    async fn base_url_without_argument_prints_it() {
        let mut h = harness(&[]);
        h.router.exec("base-url http://api").await.unwrap();
        h.router.exec("base-url").await.unwrap();
        assert_eq!(h.out.lines(), vec!["http://api"]);
    }

    #[tokio::test]
    async fn status_lists_base_url_and_headers() {
        let mut h = harness(&[]);
        h.router.exec("base-url http://api").await.unwrap();
        h.router.exec("header Accept */*").await.unwrap();
        h.router.exec("status").await.unwrap();
        assert_eq!(h.out.lines(), vec!["base-url: http://api", "Accept => */*"]);
    }

    #[tokio::test]
    async fn empty_line_does_nothing() {
        let mut h = harness(&[]);
        h.router.exec("").await.unwrap();
        h.router.exec("   ").await.unwrap();
        assert!(h.transport.sent().is_empty());
        assert_eq!(h.out.contents(), "");
        assert_eq!(h.router.session().snapshot(), Default::default());
    }

    #[tokio::test]
    async fn unknown_command_is_reported_without_touching_state() {
        let mut h = harness(&[]);
        h.router.exec("base-url http://api").await.unwrap();
        let err = h.router.exec("fetch /items").await.unwrap_err();
        assert!(matches!(
            err,
            CurlShellError::Repl(crate::error::ReplError::Router(
                ReplRouterError::CommandNotFound { .. }
            ))
        ));
        h.router.report(&err).unwrap();
        assert_eq!(h.out.lines(), vec![r#"command not found: "fetch /items""#]);
        assert_eq!(h.router.session().base_url(), "http://api");
        assert!(h.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn bye_and_exit_request_exit() {
        let mut h = harness(&[]);
        for cmd in ["bye", "exit"] {
            let err = h.router.exec(cmd).await.unwrap_err();
            assert!(err.is_exit_request());
        }
    }

    #[tokio::test]
    async fn help_prints_command_tree() {
        let mut h = harness(&[]);
        h.router.exec("help").await.unwrap();
        let out = h.out.contents();
        assert!(out.starts_with("commands:\n"));
        assert!(out.contains("    base-url\n"));
    }

    #[tokio::test]
    async fn mode_switches_and_reports() {
        let mut h = harness(&[]);
        h.router.exec("mode").await.unwrap();
        h.router.exec("mode vi").await.unwrap();
        h.router.exec("mode").await.unwrap();
        h.router.exec("mode nano").await.unwrap();
        assert_eq!(h.editor.0.lock().unwrap().mode, EditMode::Vi);
        assert_eq!(
            h.out.lines(),
            vec!["current mode: emacs", "current mode: vi", "invalid mode: nano"]
        );
        h.router.exec("mode emacs").await.unwrap();
        assert_eq!(h.editor.0.lock().unwrap().mode, EditMode::Emacs);
    }

    #[tokio::test]
    async fn glued_prefix_is_not_a_command() {
        let mut h = harness(&[]);
        assert!(h.router.exec("modevi").await.is_err());
        assert!(h.router.exec("setpromptx").await.is_err());
    }

    #[tokio::test]
    async fn setprompt_keeps_rest_of_line() {
        let mut h = harness(&[]);
        h.router.exec("setprompt my  api> ").await.unwrap();
        assert_eq!(h.editor.prompt(), "my  api>");
        h.router.exec("setprompt").await.unwrap();
        assert_eq!(h.out.lines(), vec!["setprompt <prompt>"]);
    }

    #[tokio::test]
    async fn login_with_user_sets_basic_authorization() {
        let mut h = harness(&[]);
        h.editor.push_secret(Some("secret"));
        h.router.exec("login alice").await.unwrap();
        assert_eq!(
            h.router.session().header("Authorization"),
            "Basic YWxpY2U6c2VjcmV0"
        );
        let out = h.out.contents();
        assert!(!out.contains("secret"));
        assert_eq!(
            h.editor.0.lock().unwrap().masked_prompts,
            vec!["please enter your password: ".to_string()]
        );
    }

    #[tokio::test]
    async fn login_without_user_sets_bearer_token() {
        let mut h = harness(&[]);
        h.editor.push_secret(Some("t0k3n"));
        h.router.exec("login").await.unwrap();
        assert_eq!(h.router.session().header("Authorization"), "Bearer t0k3n");
    }

    #[tokio::test]
    async fn interrupted_login_leaves_headers_alone() {
        let mut h = harness(&[]);
        h.editor.push_secret(None);
        let err = h.router.exec("login").await.unwrap_err();
        assert!(matches!(err, CurlShellError::Ui(UiError::Interrupted)));
        assert!(h.router.session().headers().is_empty());
    }

    #[tokio::test]
    async fn empty_secret_is_rejected() {
        let mut h = harness(&[]);
        h.editor.push_secret(Some(""));
        let err = h.router.exec("login bob").await.unwrap_err();
        assert!(matches!(
            err,
            CurlShellError::Builtin(BuiltinError::InvalidArgs { .. })
        ));
    }

    #[tokio::test]
    async fn sleep_accepts_seconds() {
        let mut h = harness(&[]);
        h.router.exec("sleep 0").await.unwrap();
        assert_eq!(h.out.lines(), vec!["sleep 0 second"]);
        assert!(h.router.exec("sleep soon").await.is_err());
    }

    #[tokio::test]
    async fn persist_is_a_no_op_without_store() {
        let mut h = harness(&[]);
        h.router.persist().unwrap();
        assert_eq!(h.out.contents(), "");
    }

    #[tokio::test]
    async fn persist_writes_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curl-shell.state");
        let h = harness(&[]);
        let mut router = h.router.with_store(StateStore::new(&path));
        router.exec("base-url http://api").await.unwrap();
        router.exec("header K V").await.unwrap();
        router.persist().unwrap();

        let loaded = StateStore::new(&path).load().unwrap();
        assert_eq!(loaded, router.session().snapshot());
        assert!(h.out.contents().starts_with(&format!("save to {}\n", path.display())));
    }
}
