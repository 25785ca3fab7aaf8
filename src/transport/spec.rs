use serde::{Deserialize, Serialize};

const DEFAULT_PROGRAM: &str = "curl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSpec {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for TransportSpec {
    fn default() -> Self {
        Self {
            program: default_program(),
            extra_args: Vec::new(),
        }
    }
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}
