pub mod actions;
mod defaults;
pub mod handlers;
pub mod loader;
pub mod resolver;

use std::collections::BTreeMap;

pub use actions::*;
pub use defaults::DEFAULT_API_SCRIPT;
pub use handlers::{ActionTable, DEFAULT_MODAL_KEY, HandlerSpec, SectionConfig};
pub use loader::{load, load_from};
pub use resolver::SettingsResolver;
use serde::{Deserialize, Serialize};

use crate::page::Namespace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub prefix: String,
}

impl NamespaceConfig {
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.prefix.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Script that loads the video platform's embed API.
    pub api_script: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub namespace: NamespaceConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionConfig>,
}
