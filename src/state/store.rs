use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    error::{Result, StateError},
    state::SessionState,
};

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SessionState> {
        debug!(path = %self.path.display(), "state_load start");
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            warn!(path = %self.path.display(), ?source, "state_load read failed");
            StateError::Read {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        let state: SessionState =
            serde_json::from_str(&raw).map_err(|source| StateError::Parse {
                path: self.path.display().to_string(),
                source,
            })?;
        info!(
            path = %self.path.display(),
            headers = state.headers.len(),
            "state_load ok"
        );
        Ok(state)
    }

    pub fn save(&self, state: &SessionState) -> Result<String> {
        debug!(path = %self.path.display(), "state_save start");
        let json = serde_json::to_string(state).map_err(StateError::Encode)?;
        fs::write(&self.path, &json).map_err(|source| StateError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        info!(path = %self.path.display(), bytes = json.len(), "state_save ok");
        Ok(json)
    }
}
