use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry, fmt,
    layer::{Layer, Layered},
    prelude::*,
    reload,
};

use crate::error::{Result, RuntimeError};

type FmtLayer = Box<dyn Layer<Registry> + Send + Sync>;
type FilteredRegistry = Layered<reload::Layer<FmtLayer, Registry>, Registry>;

const LOG_DIR: &str = "curl-shell";
const LOG_FILE: &str = "curl-shell.log";
const VERBOSITY_INFO: u8 = 0;
const VERBOSITY_DEBUG: u8 = 1;
const DEFAULT_LEVEL: &str = "info";

pub struct LogControl {
    pub guards: Vec<WorkerGuard>,
    fmt_handle: reload::Handle<FmtLayer, Registry>,
    filter_handle: reload::Handle<EnvFilter, FilteredRegistry>,
}

fn log_dir() -> PathBuf {
    env::temp_dir().join(LOG_DIR)
}

fn filter_for(verbosity: u8, configured: Option<&str>) -> EnvFilter {
    match verbosity {
        VERBOSITY_INFO => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(configured.unwrap_or(DEFAULT_LEVEL))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        }),
        VERBOSITY_DEBUG => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

pub fn init_logging_early(verbosity: u8) -> LogControl {
    let dir = log_dir();
    let _ = fs::create_dir_all(&dir);

    let (writer, guard) = non_blocking(rolling::daily(&dir, LOG_FILE));
    let fmt_layer = fmt::layer().with_writer(writer).with_ansi(false).boxed();
    let (fmt_layer, fmt_handle) = reload::Layer::new(fmt_layer);
    let (filter, filter_handle) = reload::Layer::new(filter_for(verbosity, None));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();

    info!(dir = %dir.display(), "init_logging_early ok");

    LogControl {
        guards: vec![guard],
        fmt_handle,
        filter_handle,
    }
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| RuntimeError::LogFileOpen {
            path: path.display().to_string(),
            source,
        })?;
    Ok(file)
}

pub fn reconfigure_logging_path(
    control: &mut LogControl,
    file_path: Option<PathBuf>,
) -> Result<()> {
    debug!("reconfigure_logging_path start");
    let (writer, guard) = match file_path {
        Some(p) => non_blocking(open_log_file(&p)?),
        None => non_blocking(rolling::daily(log_dir(), LOG_FILE)),
    };

    let new_fmt: FmtLayer = fmt::layer().with_writer(writer).with_ansi(false).boxed();
    let _ = control.fmt_handle.reload(new_fmt);
    control.guards = vec![guard];

    info!("reconfigure_logging_path ok");
    Ok(())
}

pub fn set_verbosity(control: &mut LogControl, verbosity: u8, configured: Option<&str>) {
    debug!(verbosity, configured = ?configured, "set_verbosity start");
    let _ = control
        .filter_handle
        .reload(filter_for(verbosity, configured));
    info!("set_verbosity ok");
}
