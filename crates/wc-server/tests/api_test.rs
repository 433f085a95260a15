//! End-to-end HTTP tests against the real adapters (SQLite file, blob
//! directory, argon2, HS256), driven through `tower::ServiceExt::oneshot`.

use std::time::Duration;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use wc_core::config::AppConfig;
use wc_core::ports::TokenCodecPort;
use wc_core::{TokenClaims, UserId};
use wc_infra::JwtTokenCodec;
use wc_server::bootstrap::wiring::build_state;
use wc_server::router;

const SECRET: &str = "api-test-secret";
const BOUNDARY: &str = "weicopy-test-boundary";
const MAX_UPLOAD_MB: u64 = 1;

struct TestServer {
    router: Router,
    _dir: TempDir,
}

fn server(registration_enabled: bool) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        jwt_secret: SECRET.into(),
        token_ttl: Duration::from_secs(3600),
        max_upload_size_mb: MAX_UPLOAD_MB,
        registration_enabled,
        upload_path: dir.path().join("uploads"),
        database_path: dir.path().join("data").join("weicopy.db"),
        port: 0,
        log_dir: None,
    };
    let state = build_state(&config).expect("build state");
    TestServer {
        router: router(state),
        _dir: dir,
    }
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

async fn send(server: &TestServer, req: Request<Body>) -> Reply {
    let resp = server.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        headers,
        body,
    }
}

fn request(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    request(method, uri, None)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(uri: &str, token: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    request("POST", uri, Some(token))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn register(server: &TestServer, username: &str, password: &str) -> Reply {
    send(
        server,
        json_request(
            "POST",
            "/api/auth/register",
            json!({"username": username, "password": password}),
        ),
    )
    .await
}

async fn login(server: &TestServer, username: &str, password: &str) -> Reply {
    send(
        server,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"username": username, "password": password}),
        ),
    )
    .await
}

async fn signed_in(server: &TestServer, username: &str) -> String {
    let reply = register(server, username, "password1").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let reply = login(server, username, "password1").await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.json()["token"].as_str().unwrap().to_string()
}

async fn post_text(server: &TestServer, token: &str, text: &str) -> Reply {
    send(
        server,
        request("POST", "/api/clipboard/text", Some(token))
            .body(Body::from(text.to_string()))
            .unwrap(),
    )
    .await
}

async fn get(server: &TestServer, uri: &str, token: Option<&str>) -> Reply {
    send(server, request("GET", uri, token).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn registration_can_be_disabled() {
    let server = server(false);

    let reply = register(&server, "alice", "password1").await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.json()["error"], "registration_disabled");

    // Disabled wins even over a malformed body.
    let reply = send(
        &server,
        request("POST", "/api/auth/register", None)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = login(&server, "alice", "password1").await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.json()["error"], "invalid_credentials");
}

#[tokio::test]
async fn register_login_and_me() {
    let server = server(true);

    let reply = register(&server, "alice", "password1").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let body = reply.json();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["username"], "alice");
    let id = body["user"]["id"].as_i64().unwrap();

    let reply = register(&server, "alice", "password2").await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.json()["error"], "username_taken");

    let reply = register(&server, "bob", "12345").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["error"], "invalid_request");

    let reply = login(&server, "alice", "password2").await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.json()["error"], "invalid_credentials");

    let reply = login(&server, "alice", "password1").await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["user"]["id"], id);
    let token = body["token"].as_str().unwrap();

    let reply = get(&server, "/api/auth/me", Some(token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["username"], "alice");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn clipboard_requires_a_valid_bearer_token() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;

    let reply = get(&server, "/api/clipboard/", None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.json()["error"], "unauthorized");

    let reply = send(
        &server,
        request("GET", "/api/clipboard/", None)
            .header(AUTHORIZATION, format!("Token {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = get(&server, "/api/clipboard/", Some("not.a.jwt")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = get(&server, "/api/clipboard/", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn text_items_flow() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;

    let reply = get(&server, "/api/clipboard/latest", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["error"], "not_found");

    let reply = post_text(&server, &token, "").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["error"], "invalid_request");

    let reply = post_text(&server, &token, "first").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let first = reply.json();
    assert_eq!(first["type"], "text");
    assert_eq!(first["content"], "first");
    assert!(first.get("filename").is_none());

    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(post_text(&server, &token, "second").await.status, StatusCode::CREATED);

    let reply = get(&server, "/api/clipboard/latest", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.headers[CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    assert_eq!(&reply.body[..], b"second");

    let reply = get(&server, "/api/clipboard/", Some(&token)).await;
    let items = reply.json();
    let contents: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, ["second", "first"]);
}

#[tokio::test]
async fn file_items_are_private_to_their_owner() {
    let server = server(true);
    let alice = signed_in(&server, "alice").await;
    let bob = signed_in(&server, "bob").await;

    let reply = send(
        &server,
        multipart_request("/api/clipboard/file", &alice, "notes.txt", "text/plain", b"hello file"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let item = reply.json();
    assert_eq!(item["type"], "file");
    assert_eq!(item["filename"], "notes.txt");
    let id = item["id"].as_str().unwrap().to_string();
    let file_uri = format!("/api/clipboard/file/{id}");

    let reply = get(&server, "/api/clipboard/latest", Some(&alice)).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.headers[LOCATION], file_uri.as_str());

    let reply = get(&server, &file_uri, Some(&alice)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(&reply.body[..], b"hello file");

    // Another user cannot tell the item exists.
    let reply = get(&server, &file_uri, Some(&bob)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["error"], "not_found");

    let delete_uri = format!("/api/clipboard/{id}");
    let reply = send(&server, request("DELETE", &delete_uri, Some(&bob)).body(Body::empty()).unwrap()).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&server, request("DELETE", &delete_uri, Some(&alice)).body(Body::empty()).unwrap()).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["message"], "Item deleted successfully");

    let reply = get(&server, &file_uri, Some(&alice)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn text_item_is_not_downloadable_as_file() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;

    let id = post_text(&server, &token, "just text").await.json()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let reply = get(&server, &format!("/api/clipboard/file/{id}"), Some(&token)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["error"], "invalid_item_type");
}

#[tokio::test]
async fn image_uploads() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;

    let reply = send(
        &server,
        multipart_request("/api/clipboard/image", &token, "fake.png", "text/plain", b"nope"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["error"], "invalid_file_type");

    let reply = send(
        &server,
        multipart_request("/api/clipboard/image", &token, "clipboard", "image/png", b"\x89PNG\r\n"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let item = reply.json();
    assert_eq!(item["type"], "image");
    assert_eq!(item["filename"], "image.png");

    let reply = get(
        &server,
        &format!("/api/clipboard/file/{}", item["id"].as_str().unwrap()),
        Some(&token),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers[CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn upload_limits_and_malformed_forms() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;

    let too_big = vec![b'x'; (MAX_UPLOAD_MB * 1024 * 1024) as usize + 1];
    let reply = send(
        &server,
        multipart_request("/api/clipboard/file", &token, "big.bin", "application/octet-stream", &too_big),
    )
    .await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply.json()["error"], "file_too_large");

    let reply = send(
        &server,
        request("POST", "/api/clipboard/file", Some(&token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["error"], "invalid_request");

    let reply = get(&server, "/api/clipboard/", Some(&token)).await;
    assert_eq!(reply.json(), json!([]));
}

fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn every_rejected_credential_gets_the_same_answer() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;
    let me = get(&server, "/api/auth/me", Some(&token)).await.json();
    let alice = UserId::new(me["id"].as_i64().unwrap());

    let forged = JwtTokenCodec::new("some-other-secret")
        .sign(&TokenClaims::new(alice, now_secs(), 3600))
        .unwrap();
    let expired = JwtTokenCodec::new(SECRET)
        .sign(&TokenClaims::new(alice, now_secs() - 7200, 3600))
        .unwrap();
    let for_missing_user = JwtTokenCodec::new(SECRET)
        .sign(&TokenClaims::new(UserId::new(9_999), now_secs(), 3600))
        .unwrap();

    let mut replies = vec![
        get(&server, "/api/clipboard/", None).await,
        get(&server, "/api/clipboard/", Some("a.b.c")).await,
        get(&server, "/api/clipboard/", Some(&forged)).await,
        get(&server, "/api/clipboard/", Some(&expired)).await,
        get(&server, "/api/clipboard/", Some(&for_missing_user)).await,
    ];
    replies.push(
        send(
            &server,
            request("GET", "/api/clipboard/", None)
                .header(AUTHORIZATION, format!("Token {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await,
    );

    let reference = &replies[0];
    assert_eq!(reference.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reference.json()["error"], "unauthorized");
    for reply in &replies[1..] {
        assert_eq!(reply.status, reference.status);
        assert_eq!(reply.body, reference.body);
    }

    // The genuine token still works.
    assert_eq!(get(&server, "/api/clipboard/", Some(&token)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_text_is_refused_as_json() {
    let server = server(true);
    let token = signed_in(&server, "alice").await;

    let too_long = "x".repeat((MAX_UPLOAD_MB * 1024 * 1024) as usize + 1);
    let reply = post_text(&server, &token, &too_long).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply.json()["error"], "content_too_large");

    let at_limit = "y".repeat((MAX_UPLOAD_MB * 1024 * 1024) as usize);
    let reply = post_text(&server, &token, &at_limit).await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let reply = get(&server, "/api/clipboard/", Some(&token)).await;
    assert_eq!(reply.json().as_array().unwrap().len(), 1);
}
