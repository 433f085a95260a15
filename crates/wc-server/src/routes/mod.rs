//! Router assembly / 路由装配

pub mod auth;
pub mod clipboard;
pub mod dto;
pub mod error;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN};
use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Headroom for multipart framing around an upload of exactly the maximum
/// size. The blob store enforces the real limit on the file bytes.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

pub fn router(state: AppState) -> Router {
    let text_limit =
        DefaultBodyLimit::max(usize::try_from(state.max_upload_bytes).unwrap_or(usize::MAX));
    let upload_limit = DefaultBodyLimit::max(
        usize::try_from(state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES))
            .unwrap_or(usize::MAX),
    );

    let auth: Router<AppState> = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me));

    let clipboard: Router<AppState> = Router::new()
        .route("/api/clipboard", get(clipboard::list_items))
        .route("/api/clipboard/", get(clipboard::list_items))
        .route("/api/clipboard/latest", get(clipboard::latest_item))
        .route(
            "/api/clipboard/text",
            post(clipboard::add_text).layer(text_limit),
        )
        .route(
            "/api/clipboard/file",
            post(clipboard::upload_file).layer(upload_limit),
        )
        .route(
            "/api/clipboard/image",
            post(clipboard::upload_image).layer(upload_limit),
        )
        .route("/api/clipboard/file/:id", get(clipboard::get_file))
        .route("/api/clipboard/:id", delete(clipboard::delete_item));

    Router::new()
        .merge(auth)
        .merge(clipboard)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin may call the API. Credentials travel in the `Authorization`
/// header, never in cookies, so no credentialed CORS is needed.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION])
        .expose_headers([CONTENT_LENGTH])
}
