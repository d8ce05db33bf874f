//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use finsight_core::error::{Result, FinsightError};

pub use schema::{
    AnalyticsSection, DatabaseSection, FinsightConfig, LoaderSection, MalformedPolicy, OutputMode,
    OutputSection, ServerSection,
};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "FINSIGHT_CONFIG";
/// Env var overriding `database.uri`, so credentials stay out of the YAML.
pub const MONGO_URI_ENV: &str = "FINSIGHT_MONGO_URI";

pub fn load_from_file(path: &str) -> Result<FinsightConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FinsightError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FinsightConfig> {
    let cfg: FinsightConfig = serde_yaml::from_str(s)
        .map_err(|e| FinsightError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `$FINSIGHT_CONFIG` (default `finsight.yaml`) and apply env overrides.
pub fn load_from_env() -> Result<FinsightConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "finsight.yaml".into());
    let mut cfg = load_from_file(&path)?;
    if let Ok(uri) = std::env::var(MONGO_URI_ENV) {
        override_mongo_uri(&mut cfg, uri)?;
    }
    Ok(cfg)
}

/// Replace `database.uri` and re-check the database section.
pub fn override_mongo_uri(cfg: &mut FinsightConfig, uri: String) -> Result<()> {
    cfg.database.uri = uri;
    cfg.database.validate()
}
