//! Access gate as an axum extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use wc_app::AccessError;
use wc_core::User;

use crate::routes::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Handlers taking this never run for anonymous
/// requests.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AccessError::MalformedHeader)?),
            None => None,
        };

        let user = state.app.access_gate.authenticate(header).await?;
        Ok(CurrentUser(user))
    }
}
