use std::path::PathBuf;

use clap::{ArgAction, Parser};
use curl_shell::runtime::{Overrides, config::EditMode};

#[derive(Parser, Debug)]
#[command(name = "curl-shell")]
#[command(version, about = "Interactive shell for HTTP APIs, backed by curl")]
pub struct Cli {
    #[arg(short, long, help = "Config file (default ~/.curl-shell/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Restore the session at start and save it on bye/exit")]
    pub persist: bool,
    #[arg(long)]
    pub state_file: Option<PathBuf>,
    #[arg(long)]
    pub history_file: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub edit_mode: Option<EditMode>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            persist: self.persist,
            state_file: self.state_file.clone(),
            history_file: self.history_file.clone(),
            edit_mode: self.edit_mode,
            verbosity: self.verbose,
        }
    }
}
