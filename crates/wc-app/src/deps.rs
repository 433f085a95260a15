//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for [`crate::App`] construction. Not a builder: no
//! defaults, no optional fields, no hidden logic.

use std::sync::Arc;
use std::time::Duration;
use wc_core::ports::*;

pub struct AppDeps {
    // Persistence / 持久化
    pub users: Arc<dyn UserRepositoryPort>,
    pub items: Arc<dyn ClipboardItemRepositoryPort>,

    // Storage / 存储
    pub blobs: Arc<dyn BlobStorePort>,

    // Security / 安全
    pub hasher: Arc<dyn PasswordHasherPort>,
    pub token_codec: Arc<dyn TokenCodecPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
}

/// Policy knobs taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    pub token_ttl: Duration,
    pub registration_enabled: bool,
}
