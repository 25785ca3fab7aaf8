use tracing::info;

use crate::{
    builtins::BuiltinContext,
    error::{BuiltinError, Result},
};

pub fn handle(_ctx: &mut dyn BuiltinContext) -> Result<()> {
    info!("quit requested");
    Err(BuiltinError::ExitRequested.into())
}
