use tracing::{debug, info, warn};

use crate::{
    builtins::BuiltinContext,
    error::Result,
    transport::{HttpRequest, Method},
};

pub async fn handle(
    ctx: &mut dyn BuiltinContext,
    method: Method,
    path: &str,
    body: &str,
) -> Result<()> {
    debug!(method = %method, path = path, body_len = body.len(), "builtin_http_handle start");
    let request = HttpRequest {
        method,
        url: ctx.session().url_for(path),
        headers: ctx.session().headers(),
        body: body.to_string(),
    };
    let echo = ctx.describe(&request);
    ctx.emit(&echo)?;

    let exchange = ctx.send(&request).await?;
    if let Some(err) = &exchange.error {
        warn!(error = %err, "builtin_http_handle request failed");
        ctx.emit(err)?;
    }
    if !exchange.body.is_empty() {
        ctx.emit_bytes(&exchange.body)?;
    }
    info!(status = ?exchange.status, bytes = exchange.body.len(), "builtin_http_handle ok");
    Ok(())
}
