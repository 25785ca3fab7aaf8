use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use curl_shell::{
    repl,
    runtime::{self, AppParts},
};

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let AppParts {
        mut router,
        log_control: _log_control,
    } = runtime::bootstrap(&args.overrides())?;
    debug!("main start");

    repl::run_line(&mut router).await?;

    info!("main ok");
    Ok(())
}
