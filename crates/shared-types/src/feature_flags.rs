use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
    /// Serve every endpoint from the in-memory demo store instead of the REST backend.
    #[serde(default)]
    pub demo: bool,
}

/// Where the case REST backend lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl BackendConfig {
    /// Join an endpoint path onto the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_all_false() {
        let flags = FeatureFlags::default();
        assert!(!flags.telemetry);
        assert!(!flags.demo);
    }

    #[test]
    fn deserialize_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.features, FeatureFlags::default());
        assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn deserialize_partial_toml_defaults_missing_fields() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            demo = true
            "#,
        )
        .unwrap();
        assert!(config.features.demo);
        assert!(!config.features.telemetry);
        assert_eq!(config.backend, BackendConfig::default());
    }

    #[test]
    fn deserialize_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://cases.example.org/"

            [features]
            telemetry = true
            demo = true
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
        assert!(config.features.demo);
        assert_eq!(config.backend.base_url, "https://cases.example.org/");
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let backend = BackendConfig {
            base_url: "http://localhost:3001/".into(),
        };
        assert_eq!(
            backend.endpoint("/auth/data/getdata"),
            "http://localhost:3001/auth/data/getdata"
        );
        assert_eq!(
            BackendConfig::default().endpoint("auth/api/login"),
            "http://localhost:3001/auth/api/login"
        );
    }

    #[test]
    fn flags_round_trip_through_json() {
        let flags = FeatureFlags {
            telemetry: true,
            demo: false,
        };
        let json = serde_json::to_string(&flags).unwrap();
        let back: FeatureFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(flags, back);
    }
}
