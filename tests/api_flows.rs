//! End-to-end API flows over the assembled router.
//!
//! Every request must come back as a structured envelope, success or
//! failure, with the HTTP status mirrored in the body.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use vidhub::config::{AppConfig, MediaSettings};
use vidhub::http::{AppState, HttpServer};

const BOUNDARY: &str = "vidhub-test-boundary";

fn test_state(temp: &TempDir) -> AppState {
    let config = AppConfig {
        media: MediaSettings {
            root: temp.path().join("media"),
            public_base_url: "https://media.test".to_string(),
            staging_dir: temp.path().join("staging"),
        },
        ..Default::default()
    };
    AppState::new(config)
}

fn test_router(state: AppState) -> axum::Router {
    HttpServer::with_state(state).router()
}

async fn send_raw(router: &axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, request).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    with_auth(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    with_auth(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json"),
        token,
    )
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn with_auth(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn file_part(name: &str, filename: &str, contents: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n"
    )
}

fn multipart_request(method: &str, uri: &str, token: Option<&str>, parts: &[String]) -> Request<Body> {
    let mut body = parts.concat();
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    with_auth(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ),
        token,
    )
    .body(Body::from(body))
    .unwrap()
}

fn register_parts(username: &str, email: &str, with_avatar: bool) -> Vec<String> {
    let mut parts = vec![
        text_part("fullName", "Ann Lee"),
        text_part("email", email),
        text_part("username", username),
        text_part("password", "p@ss1234"),
    ];
    if with_avatar {
        parts.push(file_part("avatar", "avatar.png", "fake png bytes"));
    }
    parts
}

async fn register(router: &axum::Router, username: &str, email: &str) -> Value {
    let (status, body) = send(
        router,
        multipart_request(
            "POST",
            "/api/v1/users/register",
            None,
            &register_parts(username, email, true),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

async fn login(router: &axum::Router, username: &str) -> String {
    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/api/v1/users/login",
            None,
            json!({ "username": username, "password": "p@ss1234" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["tokens"]["accessToken"]
        .as_str()
        .expect("access token in login response")
        .to_string()
}

#[tokio::test]
async fn healthcheck_is_enveloped() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    let (status, body) = send(&router, get_request("/api/v1/healthcheck", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "OK");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn register_without_avatar_mentions_the_requirement() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    let (status, body) = send(
        &router,
        multipart_request(
            "POST",
            "/api/v1/users/register",
            None,
            &register_parts("annlee", "ann@x.com", false),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(
        body["message"].as_str().unwrap().contains("Avatar"),
        "message should mention the avatar requirement: {body}"
    );
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;

    let (status, body) = send(
        &router,
        multipart_request(
            "POST",
            "/api/v1/users/register",
            None,
            &register_parts("annlee", "fresh@x.com", true),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_cleans_staged_files_and_stores_the_avatar() {
    let temp = TempDir::new().unwrap();
    let state = test_state(&temp);
    let router = test_router(state);

    let body = register(&router, "annlee", "ann@x.com").await;

    // Avatar landed on the media host
    let avatar_url = body["data"]["avatarUrl"].as_str().unwrap();
    assert!(avatar_url.starts_with("https://media.test/"));
    assert!(temp.path().join("media").read_dir().unwrap().next().is_some());

    // The staged temporary copy is gone
    let staged: Vec<_> = match temp.path().join("staging").read_dir() {
        Ok(entries) => entries.collect(),
        Err(_) => Vec::new(),
    };
    assert!(staged.is_empty(), "staging dir should be empty");
}

#[tokio::test]
async fn failed_register_still_cleans_staged_files() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    // Cover image staged, avatar missing: request fails 400
    let mut parts = register_parts("annlee", "ann@x.com", false);
    parts.push(file_part("coverImage", "cover.png", "cover bytes"));

    let (status, _) = send(
        &router,
        multipart_request("POST", "/api/v1/users/register", None, &parts),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let staged: Vec<_> = match temp.path().join("staging").read_dir() {
        Ok(entries) => entries.collect(),
        Err(_) => Vec::new(),
    };
    assert!(staged.is_empty(), "staging dir should be empty after failure");
}

#[tokio::test]
async fn login_and_current_user_round_trip() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let token = login(&router, "annlee").await;

    let (status, body) = send(
        &router,
        get_request("/api/v1/users/current-user", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "annlee");
    // Password hash never crosses the wire
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn unauthenticated_write_is_401_envelope() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    let (status, body) = send(
        &router,
        json_request("POST", "/api/v1/tweets", None, json!({ "content": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 401);
}

#[tokio::test]
async fn toggle_like_alternates_over_http() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let token = login(&router, "annlee").await;

    // Publish a fresh video to like
    let (status, body) = send(
        &router,
        multipart_request(
            "POST",
            "/api/v1/videos",
            Some(&token),
            &[
                text_part("title", "First upload"),
                text_part("description", "hello"),
                file_part("videoFile", "clip.mp4", "mp4 bytes"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "publish failed: {body}");
    let video_id = body["data"]["id"].as_str().unwrap().to_string();

    let like_uri = format!("/api/v1/likes/toggle/v/{video_id}");

    let (status, body) = send(&router, json_request("POST", &like_uri, Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Video liked successfully");
    assert_eq!(body["data"]["target"]["kind"], "video");
    assert_eq!(body["data"]["target"]["id"], video_id);

    let (status, body) = send(&router, json_request("POST", &like_uri, Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Video unliked successfully");
    assert_eq!(body["data"], json!({}));
}

#[tokio::test]
async fn malformed_ids_are_400_envelopes_never_500() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let token = login(&router, "annlee").await;

    for uri in [
        "/api/v1/videos/not-an-id".to_string(),
        "/api/v1/playlists/12345".to_string(),
        "/api/v1/dashboard/stats/xyz".to_string(),
    ] {
        let (status, body) = send(&router, get_request(&uri, Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid"));
    }
}

#[tokio::test]
async fn deleting_an_absent_comment_is_404() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let token = login(&router, "annlee").await;

    let absent = uuid::Uuid::new_v4();
    let (status, body) = send(
        &router,
        with_auth(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/comments/c/{absent}")),
            Some(&token),
        )
        .body(Body::empty())
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Comment not found");
}

#[tokio::test]
async fn dashboard_for_empty_channel_is_all_zeros() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    let channel = uuid::Uuid::new_v4();
    let (status, body) = send(
        &router,
        get_request(&format!("/api/v1/dashboard/stats/{channel}"), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalSubscribers"], 0);
    assert_eq!(body["data"]["totalVideos"], 0);
    assert_eq!(body["data"]["totalViews"], 0);
    assert_eq!(body["data"]["totalLikes"], 0);
}

#[tokio::test]
async fn subscription_toggle_round_trip() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let channel_body = register(&router, "bobray", "bob@x.com").await;
    let channel_id = channel_body["data"]["id"].as_str().unwrap().to_string();

    let token = login(&router, "annlee").await;
    let uri = format!("/api/v1/subscriptions/c/{channel_id}");

    let (status, body) = send(&router, json_request("POST", &uri, Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Subscribed successfully");

    // The channel now lists one subscriber, enriched with the username
    let (status, body) = send(&router, get_request(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "annlee");

    let (status, body) = send(&router, json_request("POST", &uri, Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Unsubscribed successfully");
}

#[tokio::test]
async fn comment_listing_paginates_over_http() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let token = login(&router, "annlee").await;

    let video_id = uuid::Uuid::new_v4();
    for i in 0..5 {
        let (status, _) = send(
            &router,
            json_request(
                "POST",
                &format!("/api/v1/comments/{video_id}"),
                Some(&token),
                json!({ "content": format!("comment {i}") }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &router,
        get_request(&format!("/api/v1/comments/{video_id}?page=2&limit=2"), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["limit"], 2);

    // Past the end: empty items, same total
    let (_, body) = send(
        &router,
        get_request(&format!("/api/v1/comments/{video_id}?page=9&limit=2"), None),
    )
    .await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["total"], 5);
}

#[tokio::test]
async fn reads_are_idempotent_without_writes() {
    let temp = TempDir::new().unwrap();
    let router = test_router(test_state(&temp));

    register(&router, "annlee", "ann@x.com").await;
    let token = login(&router, "annlee").await;

    let (_, body) = send(
        &router,
        multipart_request(
            "POST",
            "/api/v1/videos",
            Some(&token),
            &[
                text_part("title", "Stable read"),
                text_part("description", "same bytes every time"),
                file_part("videoFile", "clip.mp4", "mp4 bytes"),
            ],
        ),
    )
    .await;
    let video_id = body["data"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/videos/{video_id}");
    let (_, first) = send_raw(&router, get_request(&uri, None)).await;
    let (_, second) = send_raw(&router, get_request(&uri, None)).await;

    assert_eq!(first, second);
}
