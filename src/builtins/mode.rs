use tracing::{debug, info, warn};

use crate::{
    builtins::BuiltinContext,
    error::{ReplRouterError, Result},
    runtime::config::EditMode,
};

const NAME: &str = "mode";

pub fn handle(ctx: &mut dyn BuiltinContext, line: &str) -> Result<()> {
    debug!(line = line, "builtin_mode_handle start");
    let rest = line.strip_prefix(NAME).unwrap_or_default();
    if rest.is_empty() {
        let current = ctx.edit_mode();
        return ctx.emit(&format!("current mode: {current}"));
    }
    if !rest.starts_with(' ') {
        return Err(ReplRouterError::CommandNotFound {
            line: line.to_string(),
        }
        .into());
    }
    match rest.trim() {
        "vi" => ctx.set_edit_mode(EditMode::Vi),
        "emacs" => ctx.set_edit_mode(EditMode::Emacs),
        other => {
            warn!(mode = other, "builtin_mode_handle invalid");
            return ctx.emit(&format!("invalid mode: {other}"));
        }
    }
    info!(mode = %ctx.edit_mode(), "builtin_mode_handle ok");
    Ok(())
}
