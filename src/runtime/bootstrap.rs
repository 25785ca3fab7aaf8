use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    error::Result,
    registry::Registry,
    repl::Router,
    runtime::{
        config::{self, EditMode, ReplSettings, StateSettings},
        logging::{LogControl, init_logging_early, reconfigure_logging_path, set_verbosity},
    },
    state::{Session, SessionState, StateStore},
    transport::factory,
    ui::ReedlineEditor,
};

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub persist: bool,
    pub state_file: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub edit_mode: Option<EditMode>,
    pub verbosity: u8,
}

pub struct AppParts {
    pub router: Router,
    pub log_control: LogControl,
}

fn build_base_registry() -> Registry {
    debug!("build_base_registry start");
    let r = Registry::with_builtins();
    info!("build_base_registry ok");
    r
}

pub fn apply_overrides(
    repl: &mut ReplSettings,
    state: &mut StateSettings,
    overrides: &Overrides,
) {
    if overrides.persist {
        state.persist = true;
    }
    if let Some(p) = &overrides.state_file {
        state.file = p.clone();
    }
    if let Some(p) = &overrides.history_file {
        repl.history_file = p.clone();
    }
    if let Some(mode) = overrides.edit_mode {
        repl.edit_mode = mode;
    }
}

// A missing or broken state file is fatal once persistence is on.
pub fn initial_session(state: &StateSettings) -> Result<Session> {
    if !state.persist {
        info!("initial_session empty");
        return Ok(Session::new(SessionState::default()));
    }
    let loaded = StateStore::new(&state.file).load()?;
    info!(path = %state.file.display(), "initial_session restored");
    Ok(Session::new(loaded))
}

pub fn bootstrap(overrides: &Overrides) -> Result<AppParts> {
    let mut log_control = init_logging_early(overrides.verbosity);
    debug!("bootstrap start");

    let (cfg, cfg_path) = config::load_config(overrides.config.as_deref());
    info!(config = %cfg_path.display(), "config loaded");

    let logging = cfg.logging.clone().unwrap_or_default();
    reconfigure_logging_path(&mut log_control, logging.file.map(PathBuf::from))?;
    set_verbosity(&mut log_control, overrides.verbosity, logging.level.as_deref());

    let mut repl_settings = config::repl_settings_from_config(&cfg);
    let mut state_settings = config::state_settings_from_config(&cfg);
    apply_overrides(&mut repl_settings, &mut state_settings, overrides);

    let session = initial_session(&state_settings)?;
    let registry = build_base_registry();
    let transport = factory::build(&config::transport_spec_from_config(&cfg));
    let editor = ReedlineEditor::new(&repl_settings, &registry, session.clone())?;

    let mut router = Router::new(registry, session, transport, Box::new(editor));
    if state_settings.persist {
        router = router.with_store(StateStore::new(&state_settings.file));
    }
    info!(persist = state_settings.persist, "router initialized");

    info!("bootstrap ok");
    Ok(AppParts {
        router,
        log_control,
    })
}
