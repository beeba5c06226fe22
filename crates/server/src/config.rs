use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Default cap on request bodies; a 5 MB photo grows by a third as base64.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Parse the contents of `config.toml`, defaulting every flag off on error.
pub fn parse_feature_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.features,
        Err(e) => {
            tracing::warn!("Failed to parse {CONFIG_PATH}: {e}; defaulting all flags off");
            FeatureFlags::default()
        }
    }
}

/// Read `config.toml`, parse feature flags, and store them in the global
/// `OnceLock`. Safe to call multiple times; only the first call has effect.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let flags = parse_feature_flags(&contents);
            tracing::info!("Feature flags: {:?}", flags);
            flags
        }
        Err(e) => {
            tracing::info!("{CONFIG_PATH} not found ({e}); defaulting all flags off");
            FeatureFlags::default()
        }
    });
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_feature_flags()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        s3: false,
        telemetry: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Maximum request body size, from `MAX_UPLOAD_BYTES`.
pub fn max_upload_bytes() -> usize {
    std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}
