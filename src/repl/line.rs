use tracing::{debug, error, info};

use crate::{error::Result, repl::Router, ui::ReadOutcome};

const BANNER: &str = "type 'help' for the list of commands";
const INTERRUPT_HINT: &str = "^C (press Ctrl-C again to quit)";
const EOF_NOTICE: &str = "exit";
const MAX_INTERRUPTS: u8 = 2;

// Only the exit command saves the session.
pub async fn run(router: &mut Router) -> Result<()> {
    debug!("repl_line_run start");
    router.notice(BANNER)?;

    let mut interrupts = 0u8;
    loop {
        match router.read_line()? {
            ReadOutcome::Line(line) => {
                interrupts = 0;
                match router.exec(&line).await {
                    Ok(()) => {}
                    Err(e) if e.is_exit_request() => {
                        info!("quit via builtin");
                        router.persist()?;
                        break;
                    }
                    Err(e) => {
                        error!(?e, "router exec failed");
                        router.report(&e)?;
                    }
                }
            }
            ReadOutcome::Interrupted => {
                interrupts += 1;
                if interrupts >= MAX_INTERRUPTS {
                    info!("quit via interrupt");
                    break;
                }
                router.notice(INTERRUPT_HINT)?;
            }
            ReadOutcome::Cleared => {
                debug!("repl_line_run input cleared");
                interrupts = 0;
            }
            ReadOutcome::Eof => {
                info!("quit via end of input");
                router.notice(EOF_NOTICE)?;
                break;
            }
        }
    }

    info!("repl_line_run ok");
    Ok(())
}
