//! Clipboard routes / 剪贴板路由

use axum::body::{Body, Bytes};
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};

use wc_app::{ContentError, UploadRequest};
use wc_core::clipboard::mime;
use wc_core::{BlobKind, ItemId, LatestItem, UserId};

use super::dto::{ItemDto, MessageResponse};
use super::error::{body_error, multipart_error, ApiError};
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

pub async fn list_items(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = state.app.content.list(user.id).await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// Text comes back as the body itself, blobs as a redirect to their
/// download route.
pub async fn latest_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, ApiError> {
    let latest = state.app.content.latest_view(user.id).await.map_err(|err| match err {
        ContentError::NotFound => ApiError::not_found("No clipboard items found"),
        other => other.into(),
    })?;

    Ok(match latest {
        LatestItem::Inline { content } => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            content,
        )
            .into_response(),
        LatestItem::Redirect { item_id, .. } => (
            StatusCode::FOUND,
            [(LOCATION, format!("/api/clipboard/file/{item_id}"))],
        )
            .into_response(),
    })
}

/// The raw request body is the text. Its size is capped by the route's
/// body limit.
pub async fn add_text(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    let body = body.map_err(|rejection| body_error(&rejection))?;
    let content = String::from_utf8(body.to_vec())
        .map_err(|_| ApiError::invalid_request("Text content must be valid UTF-8"))?;

    let item = state.app.content.add_text(user.id, content).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn upload_file(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    upload(state, user.id, multipart, BlobKind::File).await
}

pub async fn upload_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    upload(state, user.id, multipart, BlobKind::Image).await
}

async fn upload(
    state: AppState,
    owner: UserId,
    multipart: Result<Multipart, MultipartRejection>,
    kind: BlobKind,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    let mut multipart =
        multipart.map_err(|_| ApiError::invalid_request("No file uploaded or invalid form"))?;

    // Skip unrelated fields until the file part shows up.
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return Err(ApiError::invalid_request("No file uploaded or invalid form")),
            Err(err) => return Err(multipart_error(&err)),
        }
    };

    let display_name = field
        .file_name()
        .and_then(base_name)
        .ok_or_else(|| ApiError::invalid_request("No file uploaded or invalid form"))?;
    let content_type = field.content_type().map(str::to_string);

    let source = StreamReader::new(field.map_err(std::io::Error::other));
    let item = state
        .app
        .content
        .upload(
            owner,
            UploadRequest {
                display_name,
                content_type,
                kind,
                source: Box::pin(source),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Last path component of a client-supplied file name.
fn base_name(raw: &str) -> Option<String> {
    raw.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
}

pub async fn get_file(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let (blob, opened) = state
        .app
        .content
        .open_blob(&ItemId::from(id), user.id)
        .await?;

    let disposition = format!("inline; filename=\"{}\"", header_safe(&blob.filename));
    Ok((
        [
            (CONTENT_TYPE, mime::content_type_for(&blob.filename).to_string()),
            (CONTENT_LENGTH, opened.size_bytes.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(ReaderStream::new(opened.reader)),
    )
        .into_response())
}

/// Replaces anything that would break a quoted header parameter.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub async fn delete_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.app.content.delete(&ItemId::from(id), user.id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted successfully",
    }))
}
