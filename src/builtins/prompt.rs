use tracing::{debug, info};

use crate::{
    builtins::BuiltinContext,
    error::{ReplRouterError, Result},
};

const NAME: &str = "setprompt";
const USAGE: &str = "setprompt <prompt>";

pub fn handle(ctx: &mut dyn BuiltinContext, line: &str) -> Result<()> {
    debug!(line = line, "builtin_prompt_handle start");
    let rest = line.strip_prefix(NAME).unwrap_or_default();
    match rest.strip_prefix(' ') {
        Some(text) if !text.is_empty() => {
            ctx.set_prompt(text);
            info!("builtin_prompt_handle ok");
            Ok(())
        }
        Some(_) => ctx.emit(USAGE),
        None if rest.is_empty() => ctx.emit(USAGE),
        None => Err(ReplRouterError::CommandNotFound {
            line: line.to_string(),
        }
        .into()),
    }
}
