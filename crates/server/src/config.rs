use shared_types::{AppConfig, BackendConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable that overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "CASE_API_URL";

/// Parse config text, falling back to defaults when it does not parse.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(error = %e, path = CONFIG_PATH, "Failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Apply an optional base URL override. Blank values are ignored.
pub fn with_backend_override(mut config: AppConfig, url: Option<String>) -> AppConfig {
    if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        config.backend.base_url = url;
    }
    config
}

/// Read `config.toml` and `.env`, and store the result in the global
/// `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file leaves every flag off and the backend at
/// its default URL.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::info!(error = %e, path = CONFIG_PATH, "Config file not found, using defaults");
                AppConfig::default()
            }
        };
        let config = with_backend_override(config, std::env::var(BACKEND_URL_ENV).ok());
        tracing::info!(
            features = ?config.features,
            backend = %config.backend.base_url,
            "Configuration loaded"
        );
        config
    })
}

/// Get the loaded feature flags. All-false defaults until [`load_config`] runs.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        demo: false,
    };
    CONFIG.get().map(|c| &c.features).unwrap_or(&DEFAULT)
}

/// Backend location, loading the config on first use.
pub fn backend_config() -> &'static BackendConfig {
    &load_config().backend
}
