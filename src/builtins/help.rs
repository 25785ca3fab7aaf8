use crate::{builtins::BuiltinContext, error::Result};

pub fn handle(ctx: &mut dyn BuiltinContext) -> Result<()> {
    let text = ctx.help_text();
    ctx.emit(text.trim_end())
}
