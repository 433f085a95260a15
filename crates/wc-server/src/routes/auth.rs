use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use wc_core::user::{MIN_PASSWORD_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN};

use super::dto::{AuthRequest, LoginResponse, MeResponse, RegisterResponse, UserSummary};
use super::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Shape checks shared by register and login, done before any lookup.
fn parse_auth_request(payload: Result<Json<AuthRequest>, JsonRejection>) -> Result<AuthRequest, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::invalid_request(rejection.body_text()))?;

    let username_len = req.username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username_len) {
        return Err(ApiError::invalid_request(format!(
            "username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::invalid_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(req)
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    state.app.register.ensure_enabled()?;
    let req = parse_auth_request(payload)?;

    let user = state.app.register.execute(&req.username, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user: UserSummary::from(&user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let req = parse_auth_request(payload)?;

    let outcome = state.app.login.execute(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        user: UserSummary::from(&outcome.user),
        token: outcome.token,
    }))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(&user))
}
