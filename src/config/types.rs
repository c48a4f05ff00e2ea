use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::operation::StalePolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
}

/// Settings of the library screen store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Hold on image provider emissions, in milliseconds (default: 50).
    #[serde(default = "default_image_provider_delay_ms")]
    pub image_provider_delay_ms: u64,
    /// Request code passed to the auth collaborator on login (default: 0).
    #[serde(default)]
    pub login_request_code: i32,
    /// User whose profile is fetched (default: "me").
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Publication policy for overlapping user detail fetches.
    #[serde(default)]
    pub stale_results: StalePolicy,
}

fn default_image_provider_delay_ms() -> u64 {
    50
}

fn default_user_id() -> String {
    "me".to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            image_provider_delay_ms: default_image_provider_delay_ms(),
            login_request_code: 0,
            user_id: default_user_id(),
            stale_results: StalePolicy::default(),
        }
    }
}

impl LibraryConfig {
    pub fn image_provider_delay(&self) -> Duration {
        Duration::from_millis(self.image_provider_delay_ms)
    }
}
