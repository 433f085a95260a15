//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTO only. Defaults and parsing live in the loader of the
//! server crate; nothing here validates or computes values.

use std::path::PathBuf;
use std::time::Duration;

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Clone)]
pub struct AppConfig {
    /// Symmetric signing secret for bearer tokens
    pub jwt_secret: String,

    /// Token lifetime
    pub token_ttl: Duration,

    /// Upper bound for a single uploaded blob, in MiB
    pub max_upload_size_mb: u64,

    /// Whether `register` is open
    pub registration_enabled: bool,

    /// Root directory for stored blobs
    pub upload_path: PathBuf,

    /// SQLite database file
    pub database_path: PathBuf,

    /// HTTP listen port
    pub port: u16,

    /// Optional directory for a log file
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("max_upload_size_mb", &self.max_upload_size_mb)
            .field("registration_enabled", &self.registration_enabled)
            .field("upload_path", &self.upload_path)
            .field("database_path", &self.database_path)
            .field("port", &self.port)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}
