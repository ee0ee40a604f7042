//! Application constants, extraction service settings, and data paths.

use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Dairylog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed submission metadata: one client, one report section, monthly
/// granularity. These accompany every upload as multipart fields.
pub const CLIENT_NAME: &str = "Farm_Zero_C";
pub const SECTION: &str = "dairyProduction";
pub const PERIOD_GRANULARITY: &str = "MONTHLY";

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Dairylog/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Location of the persisted report collection blob.
pub fn reports_path() -> PathBuf {
    app_data_dir().join("reports.json")
}

/// Connection settings for the extraction service.
///
/// The API key is a static credential; there is no session management
/// beyond sending it with every request.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: String,
    pub client_name: String,
    pub section: String,
    pub period: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client_name: CLIENT_NAME.to_string(),
            section: SECTION.to_string(),
            period: PERIOD_GRANULARITY.to_string(),
        }
    }

    /// Read endpoint and credential from `DAIRYLOG_API_BASE` and
    /// `DAIRYLOG_API_KEY`. Returns `None` if either is unset.
    pub fn from_env() -> Option<Self> {
        let base = std::env::var("DAIRYLOG_API_BASE").ok()?;
        let key = std::env::var("DAIRYLOG_API_KEY").ok()?;
        Some(Self::new(base, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Dairylog"));
    }

    #[test]
    fn reports_path_under_app_data() {
        let path = reports_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("reports.json"));
    }

    #[test]
    fn service_config_trims_trailing_slash() {
        let config = ServiceConfig::new("http://reports.example/", "key");
        assert_eq!(config.base_url, "http://reports.example");
    }

    #[test]
    fn service_config_carries_fixed_metadata() {
        let config = ServiceConfig::new("http://reports.example", "key");
        assert_eq!(config.client_name, CLIENT_NAME);
        assert_eq!(config.section, SECTION);
        assert_eq!(config.period, "MONTHLY");
    }

    #[test]
    fn default_filter_names_crate() {
        assert!(default_log_filter().contains("dairylog=debug"));
    }
}
