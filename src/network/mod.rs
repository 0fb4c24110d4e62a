pub mod api_client;
pub mod config;
pub mod workflows;

pub use api_client::ApiClient;

use std::sync::RwLock;

use lazy_static::lazy_static;

use config::ApiConfig;

lazy_static! {
    static ref API_CONFIG: RwLock<ApiConfig> = RwLock::new(ApiConfig::default());
}

/// Install the backend base URL. Called once from `start()`.
pub fn init_api_config(base_url: &str) {
    if let Ok(mut config) = API_CONFIG.write() {
        *config = ApiConfig::from_url(base_url);
    }
}

pub(crate) fn api_base_url() -> String {
    API_CONFIG
        .read()
        .map(|c| c.base_url().to_string())
        .unwrap_or_default()
}
