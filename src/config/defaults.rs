use crate::config::{NamespaceConfig, VideoConfig};
use crate::page::DEFAULT_PREFIX;

pub const DEFAULT_API_SCRIPT: &str = "https://www.youtube.com/iframe_api";

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            api_script: DEFAULT_API_SCRIPT.to_string(),
            width: "100%".to_string(),
            height: "100%".to_string(),
        }
    }
}
