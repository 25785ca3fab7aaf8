use tracing::{debug, info};

use crate::{
    builtins::{BuiltinContext, format_header_line},
    error::{BuiltinError, Result},
};

pub fn handle(ctx: &mut dyn BuiltinContext, key: &str, value: &str) -> Result<()> {
    debug!(key = key, set = !value.is_empty(), "builtin_header_handle start");
    match (key, value) {
        ("", "") => {
            let headers = ctx.session().headers();
            for (name, v) in &headers {
                ctx.emit(&format_header_line(name, v))?;
            }
        }
        ("", _) => {
            return Err(BuiltinError::InvalidArgs {
                detail: "header name is empty".to_string(),
            }
            .into());
        }
        (key, "") => {
            let v = ctx.session().header(key);
            ctx.emit(&v)?;
        }
        (key, value) => ctx.session().set_header(key, value),
    }
    info!("builtin_header_handle ok");
    Ok(())
}
