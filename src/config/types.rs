use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Remote store endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Scheme + host + port of the store (e.g., "http://127.0.0.1:3000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Collection path under the base URL (default: "items").
    #[serde(default = "default_items_path")]
    pub items_path: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_items_path() -> String {
    "items".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_timeout() -> u32 {
    30
}

impl StoreConfig {
    /// URL of the item collection, e.g. `http://host/items`.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.items_path.trim_matches('/')
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            items_path: default_items_path(),
            connect_timeout_seconds: default_connect_timeout(),
            timeout_seconds: default_timeout(),
        }
    }
}
