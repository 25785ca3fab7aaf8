use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, TransportError},
    transport::{Exchange, HttpRequest, Transport},
};

const JSON_CONTENT_TYPE: &str = "Content-type: application/json";

pub struct CurlTransport {
    program: String,
    extra_args: Vec<String>,
}

impl CurlTransport {
    pub fn new(program: &str, extra_args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            extra_args,
        }
    }

    pub fn build_args(&self, request: &HttpRequest) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.push("-X".to_string());
        args.push(request.method.to_string());
        if !request.body.is_empty() {
            args.push("-H".to_string());
            args.push(JSON_CONTENT_TYPE.to_string());
            args.push("-d".to_string());
            args.push(request.body.clone());
        }
        for (name, value) in &request.headers {
            args.push("-H".to_string());
            args.push(format!("{name}: {value}"));
        }
        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn send(&self, request: &HttpRequest) -> Result<Exchange> {
        let args = self.build_args(request);
        debug!(
            program = %self.program,
            method = %request.method,
            url = %request.url,
            argc = args.len(),
            "curl_send start"
        );
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| {
                warn!(program = %self.program, ?source, "curl_send spawn failed");
                TransportError::Spawn {
                    program: self.program.clone(),
                    source,
                }
            })?;

        let status = output.status.code();
        let body = output.stdout;
        let error = if output.status.success() {
            None
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let code = status
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            warn!(program = %self.program, code = %code, "curl_send nonzero exit");
            Some(if stderr.is_empty() {
                format!("exit status {code}")
            } else {
                format!("exit status {code}: {stderr}")
            })
        };
        info!(?status, bytes = body.len(), "curl_send ok");
        Ok(Exchange {
            status,
            body,
            error,
        })
    }

    fn describe(&self, request: &HttpRequest) -> String {
        format!("{} -X {} {}", self.program, request.method, request.url)
    }
}
