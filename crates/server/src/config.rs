use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Default request body cap. The only JSON body we accept is a password.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Parse `config.toml` contents. Invalid TOML falls back to defaults.
pub fn parse_app_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse {CONFIG_PATH}: {e}; defaulting all flags off");
        AppConfig::default()
    })
}

/// Read `config.toml` into the global config. Only the first call has effect.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_app_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_app_config(&contents);
            tracing::info!("Feature flags: {:?}", config.features);
            config
        }
        Err(e) => {
            tracing::info!("{CONFIG_PATH} not found ({e}); defaulting all flags off");
            AppConfig::default()
        }
    })
}

/// Request body limit from `MAX_UPLOAD_BYTES`, defaulting to 64 KiB.
pub fn max_body_bytes() -> usize {
    parse_max_body_bytes(std::env::var("MAX_UPLOAD_BYTES").ok().as_deref())
}

fn parse_max_body_bytes(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_MAX_BODY_BYTES)
}
