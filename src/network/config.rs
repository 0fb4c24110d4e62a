/// Backend route configuration.
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Development fallback used before `init_api_config()` runs (and in
    /// headless tests). Production start-up always installs the real URL.
    fn default() -> Self {
        Self {
            base_url: option_env!("API_BASE_URL")
                .unwrap_or("http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ApiConfig::from_url("https://api.example.com/");
        assert_eq!(config.base_url(), "https://api.example.com");
    }
}
