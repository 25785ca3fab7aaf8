use tracing::{debug, info};

use crate::{builtins::BuiltinContext, error::Result};

pub fn handle(ctx: &mut dyn BuiltinContext, url: &str) -> Result<()> {
    debug!(url = url, "builtin_base_url_handle start");
    if url.is_empty() {
        let current = ctx.session().base_url();
        ctx.emit(&current)?;
    } else {
        ctx.session().set_base_url(url);
    }
    info!("builtin_base_url_handle ok");
    Ok(())
}
