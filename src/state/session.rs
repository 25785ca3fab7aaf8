use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "BaseURL", default)]
    pub base_url: String,
    #[serde(rename = "Headers", default, deserialize_with = "null_as_empty")]
    pub headers: BTreeMap<String, String>,
}

fn null_as_empty<'de, D>(d: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(d)?.unwrap_or_default())
}

#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new(state: SessionState) -> Self {
        debug!(headers = state.headers.len(), "session_new start");
        let s = Self {
            inner: Arc::new(RwLock::new(state)),
        };
        info!("session_new ok");
        s
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.read().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn base_url(&self) -> String {
        self.inner
            .read()
            .map(|g| g.base_url.clone())
            .unwrap_or_default()
    }

    pub fn set_base_url(&self, url: &str) {
        debug!(url = url, "session_set_base_url start");
        if let Ok(mut w) = self.inner.write() {
            w.base_url = url.to_string();
        }
        info!("session_set_base_url ok");
    }

    /// Value of `key`, or an empty string when it was never set.
    pub fn header(&self, key: &str) -> String {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.headers.get(key).cloned())
            .unwrap_or_default()
    }

    pub fn set_header(&self, key: &str, value: &str) {
        debug!(key = key, "session_set_header start");
        if let Ok(mut w) = self.inner.write() {
            w.headers.insert(key.to_string(), value.to_string());
        }
        info!(key = key, "session_set_header ok");
    }

    pub fn headers(&self) -> BTreeMap<String, String> {
        self.inner
            .read()
            .map(|g| g.headers.clone())
            .unwrap_or_default()
    }

    pub fn header_names(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.headers.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}
