use std::time::Duration;

use tracing::{debug, info};

use crate::{
    builtins::BuiltinContext,
    error::{BuiltinError, Result},
};

const DEFAULT_SECS: u64 = 4;

pub async fn handle(ctx: &mut dyn BuiltinContext, secs: &str) -> Result<()> {
    debug!(secs = secs, "builtin_sleep_handle start");
    let secs = if secs.is_empty() {
        DEFAULT_SECS
    } else {
        secs.parse::<u64>().map_err(|_| BuiltinError::InvalidArgs {
            detail: format!("sleep expects whole seconds, got {secs:?}"),
        })?
    };
    ctx.emit(&format!("sleep {secs} second"))?;
    tokio::time::sleep(Duration::from_secs(secs)).await;
    info!(secs, "builtin_sleep_handle ok");
    Ok(())
}
