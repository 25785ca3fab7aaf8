use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{debug, info, warn};

use crate::{
    builtins::BuiltinContext,
    error::{BuiltinError, Result},
};

const PASSWORD_PROMPT: &str = "please enter your password: ";
const AUTHORIZATION: &str = "Authorization";

pub fn handle(ctx: &mut dyn BuiltinContext, user: &str) -> Result<()> {
    debug!(user = user, "builtin_login_handle start");
    let secret = ctx.read_masked_line(PASSWORD_PROMPT)?;
    if secret.is_empty() {
        warn!("builtin_login_handle empty secret");
        return Err(BuiltinError::InvalidArgs {
            detail: "empty password".to_string(),
        }
        .into());
    }

    let (scheme, value) = if user.is_empty() {
        ("bearer", format!("Bearer {secret}"))
    } else {
        let token = STANDARD.encode(format!("{user}:{secret}"));
        ("basic", format!("Basic {token}"))
    };
    ctx.session().set_header(AUTHORIZATION, &value);
    ctx.emit(&format!("{AUTHORIZATION} header set ({scheme})"))?;
    info!(scheme = scheme, "builtin_login_handle ok");
    Ok(())
}
