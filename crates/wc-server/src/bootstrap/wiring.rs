//! Dependency wiring / 依赖注入
//!
//! The only place that knows which adapter implements which port.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

use wc_app::{App, AppDeps, AuthSettings};
use wc_core::config::AppConfig;
use wc_infra::db::mappers::{ClipboardItemRowMapper, UserRowMapper};
use wc_infra::db::repositories::{DieselClipboardItemRepository, DieselUserRepository};
use wc_infra::db::{init_db_pool, DbPool, DieselSqliteExecutor};
use wc_infra::{Argon2PasswordHasher, FsBlobStore, JwtTokenCodec, SystemClock};

use crate::state::AppState;

/// Opens the database (running migrations) and builds the state served by
/// the router. Parent directories for the database and uploads are created
/// when missing.
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    ensure_parent_dir(&config.database_path)?;
    std::fs::create_dir_all(&config.upload_path).with_context(|| {
        format!(
            "Failed to create upload directory: {}",
            config.upload_path.display()
        )
    })?;

    let database_url = config
        .database_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    let pool = init_db_pool(database_url)?;

    Ok(AppState::new(
        build_app(config, pool),
        config.max_upload_size_bytes(),
    ))
}

/// Wires every port to its production adapter.
pub fn build_app(config: &AppConfig, pool: DbPool) -> App {
    let deps = AppDeps {
        users: Arc::new(DieselUserRepository::new(
            DieselSqliteExecutor::new(pool.clone()),
            UserRowMapper,
            UserRowMapper,
        )),
        items: Arc::new(DieselClipboardItemRepository::new(
            DieselSqliteExecutor::new(pool),
            ClipboardItemRowMapper,
            ClipboardItemRowMapper,
        )),
        blobs: Arc::new(FsBlobStore::new(
            config.upload_path.clone(),
            config.max_upload_size_bytes(),
        )),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        token_codec: Arc::new(JwtTokenCodec::new(&config.jwt_secret)),
        clock: Arc::new(SystemClock),
    };

    App::new(
        deps,
        AuthSettings {
            token_ttl: config.token_ttl,
            registration_enabled: config.registration_enabled,
        },
    )
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory: {}", parent.display())),
        _ => Ok(()),
    }
}
