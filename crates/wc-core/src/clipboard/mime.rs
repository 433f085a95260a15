//! Content-type helpers for blob uploads and downloads.

use std::path::Path;

const IMAGE_PREFIX: &str = "image/";
const OCTET_STREAM: &str = "application/octet-stream";

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with(IMAGE_PREFIX)
}

/// Extension (with leading dot) for an image MIME type; `.bin` if unknown.
pub fn image_extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".bin",
    }
}

/// Extension of `filename` with its leading dot, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

/// Content type used when serving a stored blob back.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = extension_of(filename).map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some(".jpg") | Some(".jpeg") => "image/jpeg",
        Some(".png") => "image/png",
        Some(".gif") => "image/gif",
        Some(".webp") => "image/webp",
        Some(".txt") => "text/plain; charset=utf-8",
        Some(".pdf") => "application/pdf",
        _ => OCTET_STREAM,
    }
}
