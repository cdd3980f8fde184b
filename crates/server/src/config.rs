use shared_types::{AppConfig, BackendConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable that overrides `backend.base_url`.
pub const SCHOOL_API_URL_ENV: &str = "SCHOOL_API_URL";

/// Read `.env` and `config.toml`, apply environment overrides, and store
/// the result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file leaves every flag off and points the
/// backend at its default URL.
pub fn load_config() {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::warn!("{CONFIG_PATH} not found ({e}), using defaults");
                AppConfig::default()
            }
        };
        let config = apply_env_overrides(config, std::env::var(SCHOOL_API_URL_ENV).ok());
        tracing::info!(
            features = ?config.features,
            backend = %config.backend.base_url,
            "configuration loaded"
        );
        config
    });
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::error!("failed to parse {CONFIG_PATH}: {e}, using defaults");
        AppConfig::default()
    })
}

fn apply_env_overrides(mut config: AppConfig, api_url: Option<String>) -> AppConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.backend.base_url = url.trim().to_string();
    }
    config.backend.base_url = config.backend.base_url.trim_end_matches('/').to_string();
    config
}

fn config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

/// Loaded feature flags, or all-off defaults before `load_config()` ran.
pub fn feature_flags() -> &'static FeatureFlags {
    &config().features
}

/// Loaded school API settings, or defaults before `load_config()` ran.
pub fn backend_config() -> &'static BackendConfig {
    &config().backend
}
