//! # Configuration Loader / 配置加载器
//!
//! Layers, later wins:
//! 1. built-in defaults
//! 2. optional TOML file named by `WEICOPY_CONFIG`
//! 3. environment variables (a `.env` file is loaded first if present)
//!
//! A value that does not parse is ignored with a warning, leaving whatever
//! the earlier layer provided.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use wc_core::config::AppConfig;

pub const CONFIG_PATH_ENV: &str = "WEICOPY_CONFIG";

/// Insecure fallback secret. Startup warns loudly when it is in use.
pub const DEFAULT_JWT_SECRET: &str = "weicopy_secret_key";
pub const DEFAULT_JWT_EXPIRATION_HOURS: u64 = 24;
pub const DEFAULT_DB_PATH: &str = "./data/weicopy.db";
pub const DEFAULT_UPLOAD_PATH: &str = "./uploads";
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 50;
pub const DEFAULT_PORT: u16 = 8080;

const SECS_PER_HOUR: u64 = 3600;

/// Raw shape of the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub auth: AuthSection,
    pub storage: StorageSection,
    pub server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: Option<u64>,
    pub enable_registration: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub database_path: Option<PathBuf>,
    pub upload_path: Option<PathBuf>,
    pub max_upload_size_mb: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub log_dir: Option<PathBuf>,
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
pub fn load_config_file(config_path: &Path) -> anyhow::Result<FileConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

/// Builds the process configuration from defaults, the optional file and
/// the real environment.
pub fn load_config() -> anyhow::Result<AppConfig> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let config_path = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());
    let file = match config_path {
        Some(path) => Some(load_config_file(Path::new(&path))?),
        None => None,
    };

    Ok(resolve_config(file, |key| std::env::var(key).ok()))
}

/// Pure merge step. `lookup` stands in for the environment so the layering
/// can be exercised without touching process state.
pub fn resolve_config(file: Option<FileConfig>, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let file = file.unwrap_or_default();

    let jwt_secret = env_value(&lookup, "JWT_SECRET")
        .or(file.auth.jwt_secret.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

    let expiration_hours = parsed(&lookup, "JWT_EXPIRATION_HOURS")
        .or(file.auth.jwt_expiration_hours)
        .filter(|hours| *hours > 0)
        .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS);

    let registration_enabled = parsed(&lookup, "ENABLE_REGISTRATION")
        .or(file.auth.enable_registration)
        .unwrap_or(false);

    let database_path = env_value(&lookup, "DB_PATH")
        .map(PathBuf::from)
        .or(file.storage.database_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

    let upload_path = env_value(&lookup, "UPLOAD_PATH")
        .map(PathBuf::from)
        .or(file.storage.upload_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_PATH));

    let max_upload_size_mb = parsed(&lookup, "MAX_UPLOAD_SIZE_MB")
        .or(file.storage.max_upload_size_mb)
        .filter(|mb| *mb > 0)
        .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

    let port = parsed(&lookup, "PORT")
        .or(file.server.port)
        .unwrap_or(DEFAULT_PORT);

    let log_dir = env_value(&lookup, "LOG_DIR")
        .map(PathBuf::from)
        .or(file.server.log_dir);

    AppConfig {
        jwt_secret,
        token_ttl: Duration::from_secs(expiration_hours.saturating_mul(SECS_PER_HOUR)),
        max_upload_size_mb,
        registration_enabled,
        upload_path,
        database_path,
        port,
        log_dir,
    }
}

/// Empty values count as unset.
fn env_value(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env_value(lookup, key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
