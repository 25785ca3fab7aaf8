use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use directories::BaseDirs;
use nu_ansi_term::Color;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, RuntimeError},
    transport::TransportSpec,
};

const CONFIG_ENV: &str = "CURL_SHELL_CONFIG";
const CONFIG_DIR: &str = ".curl-shell";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PROMPT: &str = "curl-shell> ";
const DEFAULT_HISTORY_FILE: &str = "/tmp/curl-shell.history";
const DEFAULT_HISTORY_SIZE: usize = 1000;
const DEFAULT_STATE_FILE: &str = "/tmp/curl-shell.state";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EditMode {
    #[default]
    Emacs,
    Vi,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Emacs => f.write_str("emacs"),
            EditMode::Vi => f.write_str("vi"),
        }
    }
}

pub fn parse_edit_mode(name: &str) -> Option<EditMode> {
    match name.trim().to_ascii_lowercase().as_str() {
        "vi" | "vim" => Some(EditMode::Vi),
        "emacs" => Some(EditMode::Emacs),
        _ => None,
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ShellConfig {
    pub logging: Option<LoggingSection>,
    pub repl: Option<ReplSection>,
    pub state: Option<StateSection>,
    pub transport: Option<TransportSpec>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingSection {
    pub file: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ReplSection {
    pub prompt: Option<String>,
    pub edit_mode: Option<String>,
    pub history_file: Option<String>,
    pub history_size: Option<usize>,
    pub colors: Option<ReplColors>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ReplColors {
    pub prompt: Option<String>,
    pub command: Option<String>,
    pub unknown: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StateSection {
    pub persist: Option<bool>,
    pub file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReplSettings {
    pub prompt: String,
    pub edit_mode: EditMode,
    pub history_file: PathBuf,
    pub history_size: usize,
    pub color_prompt: Color,
    pub color_command: Color,
    pub color_unknown: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSettings {
    pub persist: bool,
    pub file: PathBuf,
}

pub fn parse_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "lightgrey" | "lightgray" => Some(Color::LightGray),
        "darkgrey" | "darkgray" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "red" => Some(Color::Red),
        "lightgreen" => Some(Color::LightGreen),
        "green" => Some(Color::Green),
        "lightyellow" => Some(Color::LightYellow),
        "yellow" => Some(Color::Yellow),
        "lightblue" => Some(Color::LightBlue),
        "blue" => Some(Color::Blue),
        "lightmagenta" => Some(Color::LightMagenta),
        "magenta" => Some(Color::Magenta),
        "lightcyan" => Some(Color::LightCyan),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

pub fn repl_settings_from_config(cfg: &ShellConfig) -> ReplSettings {
    debug!("repl_settings_from_config start");
    let repl = cfg.repl.clone().unwrap_or_default();
    let colors = repl.colors.unwrap_or_default();

    let edit_mode = match repl.edit_mode.as_deref() {
        Some(name) => parse_edit_mode(name).unwrap_or_else(|| {
            warn!(mode = name, "repl_settings_from_config unknown edit_mode");
            EditMode::default()
        }),
        None => EditMode::default(),
    };

    let settings = ReplSettings {
        prompt: repl.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        edit_mode,
        history_file: repl
            .history_file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
        history_size: repl.history_size.unwrap_or(DEFAULT_HISTORY_SIZE),
        color_prompt: colors
            .prompt
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::Red),
        color_command: colors
            .command
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::Green),
        color_unknown: colors
            .unknown
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::Red),
    };
    info!(mode = %settings.edit_mode, "repl_settings_from_config ok");
    settings
}

pub fn state_settings_from_config(cfg: &ShellConfig) -> StateSettings {
    let section = cfg.state.clone().unwrap_or_default();
    StateSettings {
        persist: section.persist.unwrap_or(false),
        file: section
            .file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
    }
}

pub fn transport_spec_from_config(cfg: &ShellConfig) -> TransportSpec {
    cfg.transport.clone().unwrap_or_default()
}

pub fn read_config(path: &Path) -> Result<ShellConfig> {
    let raw = fs::read_to_string(path).map_err(|source| RuntimeError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let cfg = toml::from_str::<ShellConfig>(&raw).map_err(|source| {
        RuntimeError::ConfigParse {
            path: path.display().to_string(),
            source,
        }
    })?;
    Ok(cfg)
}

pub fn load_config(explicit: Option<&Path>) -> (ShellConfig, PathBuf) {
    debug!("load_config start");
    let path = explicit.map(Path::to_path_buf).unwrap_or_else(config_path);
    match read_config(&path) {
        Ok(cfg) => {
            info!(path = %path.display(), "load_config ok");
            (cfg, path)
        }
        Err(e) => {
            warn!(path = %path.display(), ?e, "load_config failed_using_defaults");
            (ShellConfig::default(), path)
        }
    }
}

fn config_path() -> PathBuf {
    debug!("config_path start");
    let path = if let Ok(p) = env::var(CONFIG_ENV) {
        PathBuf::from(p)
    } else if let Some(base) = BaseDirs::new() {
        base.home_dir().join(CONFIG_DIR).join(CONFIG_FILE)
    } else if let Ok(home) = env::var("HOME") {
        Path::new(&home).join(CONFIG_DIR).join(CONFIG_FILE)
    } else {
        PathBuf::from(CONFIG_DIR).join(CONFIG_FILE)
    };
    info!(path = %path.display(), "config_path ok");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurlShellError;

    #[test]
    fn empty_config_yields_defaults() {
        let cfg = ShellConfig::default();
        let repl = repl_settings_from_config(&cfg);
        assert_eq!(repl.prompt, DEFAULT_PROMPT);
        assert_eq!(repl.edit_mode, EditMode::Emacs);
        assert_eq!(repl.history_file, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert_eq!(repl.color_prompt, Color::Red);

        let state = state_settings_from_config(&cfg);
        assert!(!state.persist);
        assert_eq!(state.file, PathBuf::from(DEFAULT_STATE_FILE));

        assert_eq!(transport_spec_from_config(&cfg).program, "curl");
    }

    #[test]
    fn toml_sections_are_applied() {
        let cfg: ShellConfig = toml::from_str(
            r#"
            [repl]
            prompt = "api> "
            edit_mode = "vi"
            [repl.colors]
            prompt = "Cyan"
            [state]
            persist = true
            file = "/var/tmp/s.json"
            [transport]
            extra_args = ["-s"]
            "#,
        )
        .unwrap();
        let repl = repl_settings_from_config(&cfg);
        assert_eq!(repl.prompt, "api> ");
        assert_eq!(repl.edit_mode, EditMode::Vi);
        assert_eq!(repl.color_prompt, Color::Cyan);
        assert_eq!(repl.color_command, Color::Green);

        let state = state_settings_from_config(&cfg);
        assert!(state.persist);
        assert_eq!(state.file, PathBuf::from("/var/tmp/s.json"));

        let spec = transport_spec_from_config(&cfg);
        assert_eq!(spec.program, "curl");
        assert_eq!(spec.extra_args, vec!["-s".to_string()]);
    }

    #[test]
    fn unknown_edit_mode_falls_back_to_emacs() {
        let cfg: ShellConfig = toml::from_str("[repl]\nedit_mode = \"ed\"").unwrap();
        assert_eq!(repl_settings_from_config(&cfg).edit_mode, EditMode::Emacs);
    }

    #[test]
    fn edit_mode_names() {
        assert_eq!(parse_edit_mode("vi"), Some(EditMode::Vi));
        assert_eq!(parse_edit_mode(" Emacs "), Some(EditMode::Emacs));
        assert_eq!(parse_edit_mode("nano"), None);
        assert_eq!(EditMode::Vi.to_string(), "vi");
    }

    #[test]
    fn color_names_are_case_insensitive() {
        assert_eq!(parse_color("LightBlue"), Some(Color::LightBlue));
        assert_eq!(parse_color("grey"), None);
    }

    #[test]
    fn broken_config_reports_parse_error_but_load_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[repl\nprompt =").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(CurlShellError::Runtime(RuntimeError::ConfigParse { .. }))
        ));
        let (cfg, used) = load_config(Some(path.as_path()));
        assert_eq!(used, path);
        assert!(cfg.repl.is_none());
    }
}
