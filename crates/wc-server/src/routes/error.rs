//! Error → HTTP mapping / 错误到 HTTP 的映射
//!
//! Every failure leaves the server as `{"error": code, "message": text}`.
//! Server-side failures are logged here and answered with a generic message.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use wc_app::{AccessError, ContentError, CredentialError, LoginError, RegistrationError};
use wc_core::ports::BlobStoreError;

#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    /// Logs `detail` and hides it from the client.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Every rejection reads the same to the client; the kind is logged only.
impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Internal(detail) => ApiError::internal(detail),
            other => {
                debug!(reason = %other, "Request rejected by access gate");
                unauthorized()
            }
        }
    }
}

fn unauthorized() -> ApiError {
    ApiError::new(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "Invalid or expired token",
    )
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidUsername | CredentialError::PasswordTooShort => {
                ApiError::invalid_request(err.to_string())
            }
            CredentialError::UsernameTaken => ApiError::new(
                StatusCode::CONFLICT,
                "username_taken",
                "Username is already taken",
            ),
            CredentialError::NotFound => ApiError::not_found("User not found"),
            CredentialError::Internal(detail) => ApiError::internal(detail),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Disabled => ApiError::new(
                StatusCode::FORBIDDEN,
                "registration_disabled",
                "Registration is currently disabled",
            ),
            RegistrationError::Credential(inner) => inner.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid username or password",
            ),
            LoginError::Internal(detail) => ApiError::internal(detail),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::EmptyContent => ApiError::invalid_request("Text content cannot be empty"),
            ContentError::NotFound => ApiError::not_found("Item not found"),
            ContentError::NotABlobType => ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_item_type",
                "Item is not a file or image",
            ),
            ContentError::InvalidContentType => ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_file_type",
                "File must be an image",
            ),
            ContentError::BlobMissing => ApiError::new(
                StatusCode::NOT_FOUND,
                "file_not_found",
                "File not found on server",
            ),
            ContentError::Blob(blob) => blob_error(blob),
            ContentError::Internal(detail) => ApiError::internal(detail),
        }
    }
}

fn blob_error(err: BlobStoreError) -> ApiError {
    match err {
        BlobStoreError::TooLarge { limit_bytes } => too_large(limit_bytes),
        BlobStoreError::NotFound => ApiError::new(
            StatusCode::NOT_FOUND,
            "file_not_found",
            "File not found on server",
        ),
        // The upload stream itself failed: the multipart body was cut off
        // or exceeded the request limit.
        BlobStoreError::Io(io) => match io.get_ref().and_then(|e| e.downcast_ref::<MultipartError>()) {
            Some(multipart) => multipart_error(multipart),
            None => ApiError::internal(io),
        },
        other @ BlobStoreError::InvalidLocator => ApiError::internal(other),
    }
}

pub fn too_large(limit_bytes: u64) -> ApiError {
    ApiError::new(
        StatusCode::PAYLOAD_TOO_LARGE,
        "file_too_large",
        format!("File exceeds the maximum upload size of {limit_bytes} bytes"),
    )
}

pub fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "file_too_large",
            "Upload exceeds the maximum size",
        )
    } else {
        ApiError::invalid_request("No file uploaded or invalid form")
    }
}

/// A raw request body that could not be read, usually because it is over
/// the route's limit.
pub fn body_error(rejection: &BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "content_too_large",
            "Content exceeds the maximum size",
        )
    } else {
        ApiError::invalid_request("Request body could not be read")
    }
}
