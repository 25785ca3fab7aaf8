use tracing::{debug, info};

use crate::{
    builtins::{BuiltinContext, format_header_line},
    error::Result,
};

pub fn handle(ctx: &mut dyn BuiltinContext) -> Result<()> {
    debug!("builtin_status_handle start");
    let state = ctx.session().snapshot();
    ctx.emit(&format!("base-url: {}", state.base_url))?;
    for (name, value) in &state.headers {
        ctx.emit(&format_header_line(name, value))?;
    }
    info!(headers = state.headers.len(), "builtin_status_handle ok");
    Ok(())
}
